//! Session statistics
//!
//! [`compute_stats`] folds a session's events once, in order, into combat,
//! skill, loot and economic breakdowns. The result is derived data: it is
//! never persisted and recomputing it over the same inputs yields the same
//! value.
//!
//! ```text
//! SessionEvent ─┬─► CombatBreakdown
//!               ├─► SkillBreakdown
//!               ├─► LootBreakdown ──► KillInference
//!               ├─► GlobalSummary
//!               └─► EconomyTracker (per-loadout spend, loot attribution, decay)
//! ```

mod combat;
mod economy;
mod kills;
mod loot;
mod skills;

#[cfg(test)]
mod stats_tests;

use serde::{Deserialize, Serialize};

pub use combat::CombatBreakdown;
pub use economy::{DecayBreakdown, EconomyBreakdown, FALLBACK_DECAY_PER_SHOT, LoadoutBreakdown};
pub use kills::KillInference;
pub use loot::{GlobalSummary, ItemStat, LootBreakdown, SHRAPNEL, UNIVERSAL_AMMO, is_universal_ammo};
pub use skills::{CategoryTotal, SkillBreakdown, SkillCategory, SkillStat, skill_category};

use crate::loadout::{Loadout, LoadoutCostModel};
use crate::log::event_type::{is_ammo_consuming, is_armor_hit};
use crate::session::Session;
use economy::EconomyTracker;
use loot::LootKind;

const MS_PER_HOUR: f64 = 3_600_000.0;

/// Division that yields 0 instead of NaN or infinity.
#[inline]
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }
    let result = numerator / denominator;
    if result.is_finite() { result } else { 0.0 }
}

/// Skill gained relative to what it cost.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillEfficiency {
    pub per_ped_spent: f64,
    pub per_shot: f64,
    pub per_hour: f64,
    pub per_kill: f64,
    pub per_loot_ped: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub session_id: String,
    pub event_count: usize,
    pub duration_ms: i64,
    pub combat: CombatBreakdown,
    pub skills: SkillBreakdown,
    pub loot: LootBreakdown,
    pub globals: GlobalSummary,
    pub economy: EconomyBreakdown,
    pub skill_efficiency: SkillEfficiency,
}

/// Fold a session into its statistics.
///
/// `player_name` filters global broadcasts to the player's own; offensive and
/// defensive decay are priced from `active_loadout`.
pub fn compute_stats(
    session: &Session,
    player_name: Option<&str>,
    active_loadout: Option<&Loadout>,
    costs: &dyn LoadoutCostModel,
) -> SessionStats {
    let player_name = player_name.map(str::trim).filter(|name| !name.is_empty());

    let mut combat = CombatBreakdown::default();
    let mut skills = SkillBreakdown::default();
    let mut loot = LootBreakdown::default();
    let mut globals = GlobalSummary::default();
    let mut kills = KillInference::new();
    let mut economy = EconomyTracker::new(active_loadout, costs);

    for event in &session.events {
        combat.record(event);
        skills.record(event);
        globals.record(event, player_name);

        if is_ammo_consuming(&event.event_type) {
            kills.on_shot();
            economy.on_shot(event);
        } else if is_armor_hit(&event.event_type) {
            economy.on_armor_hit();
        } else if let Some(LootKind::Item(value)) = loot.record(event) {
            kills.on_loot();
            economy.on_loot(event, value);
        }
    }

    combat.finish(kills.inferred());
    skills.finish();
    loot.finish();
    let economy = economy.finish(session);

    let duration_ms = session.duration_ms();
    let total_skill = skills.total_skill;
    let skill_efficiency = SkillEfficiency {
        per_ped_spent: safe_div(total_skill, economy.total_spend),
        per_shot: safe_div(total_skill, combat.shots as f64),
        per_hour: safe_div(total_skill, duration_ms as f64 / MS_PER_HOUR),
        per_kill: safe_div(total_skill, combat.kills as f64),
        per_loot_ped: safe_div(total_skill, loot.total_value),
    };

    SessionStats {
        session_id: session.id.clone(),
        event_count: session.events.len(),
        duration_ms,
        combat,
        skills,
        loot,
        globals,
        economy,
        skill_efficiency,
    }
}
