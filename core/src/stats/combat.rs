use serde::{Deserialize, Serialize};

use super::safe_div;
use crate::log::{ParsedEvent, event_type::*};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatBreakdown {
    // Offense
    pub shots: u32,
    pub hits: u32,
    /// Plain misses plus dodged, evaded and resisted shots.
    pub misses: u32,
    pub criticals: u32,
    pub dodges: u32,
    pub evades: u32,
    pub resists: u32,
    pub out_of_range: u32,
    pub damage_dealt: f64,
    pub max_hit: f64,
    pub avg_damage_per_hit: f64,

    // Defense
    pub damage_taken: f64,
    pub critical_damage_taken: f64,
    pub damage_reduced: f64,
    pub hits_taken: u32,
    pub deflects: u32,
    pub player_dodges: u32,
    pub player_evades: u32,
    pub enemy_misses: u32,

    // Healing
    pub self_healing: f64,
    pub healing_given: f64,
    pub healing_received: f64,

    pub deaths: u32,
    pub revives: u32,
    /// Mirrors `kills_inferred`: the log has no explicit kill line.
    pub kills: u32,
    pub kills_inferred: u32,

    /// Percent of shots that hit.
    pub hit_rate: f64,
    /// Percent of hits that were critical.
    pub crit_rate: f64,
    pub dps: f64,
    pub combat_window_ms: i64,

    #[serde(skip)]
    first_shot: Option<i64>,
    #[serde(skip)]
    last_shot: Option<i64>,
}

impl CombatBreakdown {
    pub(crate) fn record(&mut self, event: &ParsedEvent) {
        match event.event_type.as_str() {
            HIT | CRITICAL_HIT => {
                let damage = event.number("damage");
                self.hits += 1;
                if event.is(CRITICAL_HIT) {
                    self.criticals += 1;
                }
                self.damage_dealt += damage;
                self.max_hit = self.max_hit.max(damage);
            }
            MISS => self.misses += 1,
            TARGET_DODGED => {
                self.misses += 1;
                self.dodges += 1;
            }
            TARGET_EVADED => {
                self.misses += 1;
                self.evades += 1;
            }
            TARGET_RESISTED => {
                self.misses += 1;
                self.resists += 1;
            }
            OUT_OF_RANGE => self.out_of_range += 1,

            DAMAGE_TAKEN => {
                self.damage_taken += event.number("damage");
                self.hits_taken += 1;
            }
            CRITICAL_DAMAGE_TAKEN => {
                let damage = event.number("damage");
                self.damage_taken += damage;
                self.critical_damage_taken += damage;
                self.hits_taken += 1;
            }
            DAMAGE_REDUCED => self.damage_reduced += event.number("amount"),
            DEFLECT => self.deflects += 1,
            PLAYER_DODGED => self.player_dodges += 1,
            PLAYER_EVADED => self.player_evades += 1,
            ENEMY_MISSED => self.enemy_misses += 1,

            SELF_HEAL => self.self_healing += event.number("amount"),
            HEAL_GIVEN => self.healing_given += event.number("amount"),
            HEAL_RECEIVED => self.healing_received += event.number("amount"),

            PLAYER_DEATH => self.deaths += 1,
            REVIVED => self.revives += 1,
            _ => return,
        }

        if is_ammo_consuming(&event.event_type) {
            self.shots += 1;
            self.first_shot.get_or_insert(event.timestamp);
            self.last_shot = Some(event.timestamp);
        }
    }

    pub(crate) fn finish(&mut self, kills_inferred: u32) {
        self.kills_inferred = kills_inferred;
        self.kills = kills_inferred;

        self.avg_damage_per_hit = safe_div(self.damage_dealt, self.hits as f64);
        self.hit_rate = safe_div(self.hits as f64, self.shots as f64) * 100.0;
        self.crit_rate = safe_div(self.criticals as f64, self.hits as f64) * 100.0;

        self.combat_window_ms = match (self.first_shot, self.last_shot) {
            (Some(first), Some(last)) => (last - first).max(0),
            _ => 0,
        };
        self.dps = safe_div(self.damage_dealt, self.combat_window_ms as f64 / 1000.0);
    }
}
