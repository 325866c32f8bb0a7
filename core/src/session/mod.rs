//! Session event store.
//!
//! A [`Session`] is the ordered record of everything classified while it was
//! active. Each event is tagged with the loadout in use when it arrived, and
//! the loadout's price is frozen the first time the loadout appears so later
//! edits never rewrite a session's history.

use std::collections::BTreeMap;
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classifier::header::now_ms;
use crate::loadout::{Loadout, LoadoutCostModel};
use crate::log::ParsedEvent;

/// Bucket for events recorded without an active loadout.
pub const MANUAL_BUCKET: &str = "manual";

/// Loadout identity and price captured on first use within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadoutSnapshot {
    pub id: String,
    pub name: String,
    pub cost_per_shot: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEvent {
    #[serde(flatten)]
    pub event: ParsedEvent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loadout_id: Option<String>,
}

impl SessionEvent {
    /// Economics bucket: the loadout id, or [`MANUAL_BUCKET`] when untagged.
    pub fn bucket(&self) -> &str {
        self.loadout_id.as_deref().unwrap_or(MANUAL_BUCKET)
    }
}

impl Deref for SessionEvent {
    type Target = ParsedEvent;

    fn deref(&self) -> &ParsedEvent {
        &self.event
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub name: String,
    pub started_at: i64,
    #[serde(default)]
    pub ended_at: Option<i64>,
    #[serde(default)]
    pub events: Vec<SessionEvent>,
    #[serde(default)]
    pub loadout_snapshots: BTreeMap<String, LoadoutSnapshot>,
    /// Price per shot for untagged events.
    #[serde(default)]
    pub manual_cost_per_shot: f64,
}

impl Session {
    pub fn new(name: impl Into<String>, manual_cost_per_shot: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            started_at: now_ms(),
            ended_at: None,
            events: Vec::new(),
            loadout_snapshots: BTreeMap::new(),
            manual_cost_per_shot,
        }
    }

    /// Append an event, tagging it with the active loadout.
    ///
    /// The loadout's snapshot is captured on its first appearance and never
    /// updated afterwards.
    pub fn add_event(
        &mut self,
        event: ParsedEvent,
        active_loadout: Option<&Loadout>,
        costs: &dyn LoadoutCostModel,
    ) -> &SessionEvent {
        let loadout_id = active_loadout.map(|loadout| {
            self.loadout_snapshots
                .entry(loadout.id.clone())
                .or_insert_with(|| LoadoutSnapshot {
                    id: loadout.id.clone(),
                    name: loadout.name.clone(),
                    cost_per_shot: costs.effective_cost_per_shot(loadout),
                });
            loadout.id.clone()
        });

        let idx = self.events.len();
        self.events.push(SessionEvent { event, loadout_id });
        &self.events[idx]
    }

    pub fn end(&mut self) {
        self.end_at(now_ms());
    }

    pub fn end_at(&mut self, timestamp: i64) {
        self.ended_at = Some(timestamp);
    }

    /// Reopen an ended session so new events can be appended.
    pub fn resume(&mut self) {
        self.ended_at = None;
    }

    pub fn is_active(&self) -> bool {
        self.ended_at.is_none()
    }

    /// End of the session for duration purposes: `endedAt`, else the last event.
    pub fn effective_end(&self) -> i64 {
        self.ended_at
            .or_else(|| self.events.last().map(|e| e.timestamp))
            .unwrap_or(self.started_at)
    }

    pub fn duration_ms(&self) -> i64 {
        (self.effective_end() - self.started_at).max(0)
    }

    /// Frozen cost per shot for a bucket, falling back to the manual price.
    pub fn cost_per_shot(&self, bucket: &str) -> f64 {
        self.loadout_snapshots
            .get(bucket)
            .map(|s| s.cost_per_shot)
            .unwrap_or(self.manual_cost_per_shot)
    }
}
