use std::sync::Arc;

use crate::classifier::classify;
use crate::loadout::{Loadout, LoadoutCostModel};
use crate::log::ParsedEvent;
use crate::session::{Session, SessionEvent};
use crate::stats::{SessionStats, compute_stats};

/// Receives every event appended to a live session.
pub trait EventHandler {
    fn handle_event(&mut self, event: &SessionEvent);
}

/// A session being recorded: owns the event store, the active loadout and
/// the listeners notified as events arrive.
pub struct LiveSession {
    session: Session,
    active_loadout: Option<Loadout>,
    costs: Arc<dyn LoadoutCostModel>,
    handlers: Vec<Box<dyn EventHandler + Send + Sync>>,
}

impl LiveSession {
    pub fn new(session: Session, costs: Arc<dyn LoadoutCostModel>) -> Self {
        Self {
            session,
            active_loadout: None,
            costs,
            handlers: Vec::new(),
        }
    }

    /// Register a handler to receive appended events
    pub fn add_event_handler(&mut self, handler: Box<dyn EventHandler + Send + Sync>) {
        self.handlers.push(handler);
    }

    /// Switch loadouts. Later events are tagged with the new one.
    pub fn set_active_loadout(&mut self, loadout: Option<Loadout>) {
        match &loadout {
            Some(l) => tracing::info!(id = %l.id, name = %l.name, "Active loadout set"),
            None => tracing::info!("Active loadout cleared"),
        }
        self.active_loadout = loadout;
    }

    pub fn active_loadout(&self) -> Option<&Loadout> {
        self.active_loadout.as_ref()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Classify one raw line and record it. Returns `false` for lines that
    /// produce no event or arrive after the session ended.
    pub fn ingest_line(&mut self, line: &str) -> bool {
        match classify(line) {
            Some(event) => self.ingest_event(event),
            None => false,
        }
    }

    pub fn ingest_lines<I, S>(&mut self, lines: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .filter(|line| self.ingest_line(line.as_ref()))
            .count()
    }

    /// Record an already classified event and notify handlers.
    pub fn ingest_event(&mut self, event: ParsedEvent) -> bool {
        if !self.session.is_active() {
            tracing::debug!(event_type = %event.event_type, "Session ended, dropping event");
            return false;
        }
        let recorded =
            self.session
                .add_event(event, self.active_loadout.as_ref(), self.costs.as_ref());
        for handler in &mut self.handlers {
            handler.handle_event(recorded);
        }
        true
    }

    pub fn ingest_events(&mut self, events: Vec<ParsedEvent>) -> usize {
        let mut recorded = 0;
        for event in events {
            if self.ingest_event(event) {
                recorded += 1;
            }
        }
        recorded
    }

    /// Current statistics, priced with the active loadout.
    pub fn stats(&self, player_name: Option<&str>) -> SessionStats {
        compute_stats(
            &self.session,
            player_name,
            self.active_loadout.as_ref(),
            self.costs.as_ref(),
        )
    }

    pub fn end(&mut self) {
        self.session.end();
        tracing::info!(
            id = %self.session.id,
            events = self.session.events.len(),
            "Session ended"
        );
    }

    pub fn resume(&mut self) {
        self.session.resume();
        tracing::info!(id = %self.session.id, "Session resumed");
    }

    pub fn into_session(self) -> Session {
        self.session
    }
}
