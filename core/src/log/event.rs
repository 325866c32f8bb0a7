use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed set of event categories produced by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Combat,
    Loot,
    Skill,
    Mining,
    Healing,
    Death,
    Equipment,
    Effect,
    Global,
    Social,
    Vehicle,
    Position,
    Transaction,
    System,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Combat => "combat",
            EventCategory::Loot => "loot",
            EventCategory::Skill => "skill",
            EventCategory::Mining => "mining",
            EventCategory::Healing => "healing",
            EventCategory::Death => "death",
            EventCategory::Equipment => "equipment",
            EventCategory::Effect => "effect",
            EventCategory::Global => "global",
            EventCategory::Social => "social",
            EventCategory::Vehicle => "vehicle",
            EventCategory::Position => "position",
            EventCategory::Transaction => "transaction",
            EventCategory::System => "system",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single JSON-compatible field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl From<f64> for EventValue {
    fn from(value: f64) -> Self {
        EventValue::Number(value)
    }
}

impl From<bool> for EventValue {
    fn from(value: bool) -> Self {
        EventValue::Bool(value)
    }
}

impl From<&str> for EventValue {
    fn from(value: &str) -> Self {
        EventValue::Text(value.to_string())
    }
}

impl From<String> for EventValue {
    fn from(value: String) -> Self {
        EventValue::Text(value)
    }
}

/// A classified log line.
///
/// `raw` keeps the verbatim line for auditing; `data` is an open map whose
/// numeric fields may be missing when the log text was malformed. Consumers
/// read numbers through [`ParsedEvent::number`], which treats a missing field
/// as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedEvent {
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub raw: String,
    pub category: EventCategory,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub data: BTreeMap<String, EventValue>,
}

impl ParsedEvent {
    pub fn new(timestamp: i64, raw: &str, category: EventCategory, event_type: &str) -> Self {
        Self {
            timestamp,
            raw: raw.to_string(),
            category,
            event_type: event_type.to_string(),
            data: BTreeMap::new(),
        }
    }

    /// Builder-style field insert.
    pub fn with(mut self, key: &str, value: impl Into<EventValue>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }

    pub fn is(&self, event_type: &str) -> bool {
        self.event_type == event_type
    }

    pub fn get_number(&self, key: &str) -> Option<f64> {
        match self.data.get(key) {
            Some(EventValue::Number(n)) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    /// Numeric field, zero when absent or not a number.
    pub fn number(&self, key: &str) -> f64 {
        self.get_number(key).unwrap_or(0.0)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.data.get(key) {
            Some(EventValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn flag(&self, key: &str) -> bool {
        matches!(self.data.get(key), Some(EventValue::Bool(true)))
    }
}
