//! Kill inference.
//!
//! The chat log never says "you killed X". A kill is inferred when loot
//! arrives after at least one shot was fired since the previous loot. This is
//! an approximation: looting someone else's kill after shooting is counted,
//! and several kills inside one burst collapse into one.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KillInference {
    shots_since_loot: u32,
    inferred: u32,
}

impl KillInference {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an ammo-consuming event.
    pub fn on_shot(&mut self) {
        self.shots_since_loot += 1;
    }

    /// Record a loot event. Returns `true` when it completes an inferred kill.
    pub fn on_loot(&mut self) -> bool {
        if self.shots_since_loot == 0 {
            return false;
        }
        self.shots_since_loot = 0;
        self.inferred += 1;
        true
    }

    pub fn inferred(&self) -> u32 {
        self.inferred
    }
}
