//! Line classifier
//!
//! Turns a raw chat log line into at most one [`ParsedEvent`]:
//!
//! 1. Parse the `YYYY-MM-DD HH:MM:SS` prefix (wall clock when absent).
//! 2. Parse the `[Channel] [Subchannel]` header.
//! 3. `Globals` lines try the broadcast matchers first and bypass the gate.
//! 4. Anything not on the player's own `System` channel is dropped.
//! 5. System lines run through [`CASCADE`] in order; first match wins.
//! 6. Unmatched system lines become `system/UNKNOWN`.
//!
//! Each matcher is a pure `fn(&str) -> Option<Classified>` over the message
//! text, so priority is the order of the tables below and nothing else.

/// Declare a lazily compiled classifier pattern.
macro_rules! pattern {
    ($name:ident, $re:expr) => {
        static $name: std::sync::LazyLock<regex::Regex> =
            std::sync::LazyLock::new(|| regex::Regex::new($re).expect("invalid classifier pattern"));
    };
}

mod combat;
mod global;
pub mod header;
mod loot;
mod skill;
mod status;
mod world;

use std::collections::BTreeMap;

use regex::Captures;

use crate::log::{EventCategory, EventValue, ParsedEvent, event_type};
pub use header::{Header, parse_header, parse_timestamp};

/// Channel the player's own combat/loot/skill messages are written to.
pub const SYSTEM_CHANNEL: &str = "System";

/// Broadcast channel carrying globals and Hall of Fame entries.
pub const GLOBALS_CHANNEL: &str = "Globals";

/// Result of a single matcher: the type discriminator plus its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Classified {
    pub event_type: &'static str,
    pub data: BTreeMap<String, EventValue>,
}

impl Classified {
    pub fn new(event_type: &'static str) -> Self {
        Self {
            event_type,
            data: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<EventValue>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }

    /// Numeric capture; a malformed number leaves the field absent.
    pub fn number(mut self, key: &str, caps: &Captures<'_>, group: usize) -> Self {
        if let Some(v) = caps.get(group).and_then(|m| parse_number(m.as_str())) {
            self.data.insert(key.to_string(), EventValue::Number(v));
        }
        self
    }

    /// Text capture, skipped when the group did not participate.
    pub fn text(mut self, key: &str, caps: &Captures<'_>, group: usize) -> Self {
        if let Some(m) = caps.get(group) {
            let s = m.as_str().trim();
            if !s.is_empty() {
                self.data.insert(key.to_string(), EventValue::Text(s.to_string()));
            }
        }
        self
    }
}

/// Parse a captured number, rejecting NaN/inf and thousands separators.
pub fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

pub type Matcher = fn(&str) -> Option<Classified>;

/// Category matchers in priority order for `System` channel lines.
pub static CASCADE: &[(EventCategory, &[Matcher])] = &[
    (EventCategory::Combat, combat::COMBAT_MATCHERS),
    (EventCategory::Death, combat::DEATH_MATCHERS),
    (EventCategory::Loot, loot::LOOT_MATCHERS),
    (EventCategory::Skill, skill::SKILL_MATCHERS),
    (EventCategory::Mining, loot::MINING_MATCHERS),
    (EventCategory::Healing, status::HEALING_MATCHERS),
    (EventCategory::Effect, status::EFFECT_MATCHERS),
    (EventCategory::Equipment, status::EQUIPMENT_MATCHERS),
    (EventCategory::Vehicle, status::VEHICLE_MATCHERS),
    (EventCategory::Position, world::POSITION_MATCHERS),
    (EventCategory::Social, world::SOCIAL_MATCHERS),
    (EventCategory::Transaction, world::TRANSACTION_MATCHERS),
    (EventCategory::System, world::SYSTEM_MATCHERS),
];

/// Category order of the system-channel cascade.
pub fn cascade_order() -> Vec<EventCategory> {
    CASCADE.iter().map(|(category, _)| *category).collect()
}

/// Run the cascade over a system-channel message.
pub fn classify_message(message: &str) -> Option<(EventCategory, Classified)> {
    CASCADE.iter().find_map(|(category, matchers)| {
        matchers
            .iter()
            .find_map(|matcher| matcher(message))
            .map(|hit| (*category, hit))
    })
}

/// Classify one raw log line.
///
/// Never fails: lines outside the player's channels yield `None`, unmatched
/// system lines yield `system/UNKNOWN`.
pub fn classify(line: &str) -> Option<ParsedEvent> {
    let raw = line.trim_end_matches(['\r', '\n']);
    let (rest, timestamp) = match parse_timestamp(raw) {
        Some((rest, dt)) => (rest, header::to_epoch_ms(dt)),
        None => (raw, header::now_ms()),
    };
    let header = parse_header(rest)?;

    if header.channel == GLOBALS_CHANNEL {
        if let Some(hit) = global::classify_global(header.message) {
            return Some(build(timestamp, raw, EventCategory::Global, hit));
        }
    }

    if header.channel != SYSTEM_CHANNEL {
        return None;
    }

    let event = match classify_message(header.message) {
        Some((category, hit)) => build(timestamp, raw, category, hit),
        None => ParsedEvent::new(timestamp, raw, EventCategory::System, event_type::UNKNOWN)
            .with("message", header.message),
    };
    Some(event)
}

fn build(timestamp: i64, raw: &str, category: EventCategory, hit: Classified) -> ParsedEvent {
    ParsedEvent {
        timestamp,
        raw: raw.to_string(),
        category,
        event_type: hit.event_type.to_string(),
        data: hit.data,
    }
}
