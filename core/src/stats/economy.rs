use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::safe_div;
use crate::loadout::{Loadout, LoadoutCostModel};
use crate::session::{MANUAL_BUCKET, Session, SessionEvent};

/// Offensive decay per shot when the active loadout carries no decay data.
/// Booked as unlimited.
pub const FALLBACK_DECAY_PER_SHOT: f64 = 0.01;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadoutBreakdown {
    pub loadout_id: String,
    pub name: String,
    pub shots: u32,
    pub cost_per_shot: f64,
    pub spend: f64,
    pub loot_value: f64,
    pub profit: f64,
    pub return_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecayBreakdown {
    pub offensive: f64,
    pub offensive_limited: f64,
    pub offensive_unlimited: f64,
    pub defensive: f64,
    pub defensive_limited: f64,
    pub defensive_unlimited: f64,
    pub armor_hits: u32,
    pub total: f64,
    /// Decay on repairable (unlimited) items only.
    pub repair_bill: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomyBreakdown {
    pub loadouts: Vec<LoadoutBreakdown>,
    pub total_spend: f64,
    pub loot_value: f64,
    pub profit: f64,
    /// Loot as a percentage of spend; 0 when nothing was spent.
    pub return_rate: f64,
    pub decay: DecayBreakdown,
    pub net_profit: f64,
}

/// Limited/unlimited split of a per-use decay amount.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct DecaySplit {
    limited: f64,
    unlimited: f64,
}

impl DecaySplit {
    fn total(&self) -> f64 {
        self.limited + self.unlimited
    }

    fn add(&mut self, amount: f64, limited: bool) {
        if limited {
            self.limited += amount;
        } else {
            self.unlimited += amount;
        }
    }
}

fn offensive_split(loadout: Option<&Loadout>, costs: &dyn LoadoutCostModel) -> DecaySplit {
    let mut split = DecaySplit::default();
    if let Some(loadout) = loadout {
        for part in loadout.offensive_parts() {
            split.add(part.decay, costs.is_limited_item(&part.name));
        }
    }
    if split.total() <= 0.0 {
        split = DecaySplit {
            limited: 0.0,
            unlimited: FALLBACK_DECAY_PER_SHOT,
        };
    }
    split
}

fn defensive_split(loadout: Option<&Loadout>, costs: &dyn LoadoutCostModel) -> DecaySplit {
    let mut split = DecaySplit::default();
    let Some(loadout) = loadout else {
        return split;
    };
    if let Some(armor) = &loadout.armor {
        split.add(costs.armor_decay_per_hit(armor), costs.is_limited_item(&armor.name));
    }
    if !loadout.plates.is_empty() {
        let share = costs.single_plate_decay_per_hit(&loadout.plates);
        let limited = loadout
            .plates
            .iter()
            .filter(|p| costs.is_limited_item(&p.name))
            .count();
        let limited_fraction = limited as f64 / loadout.plates.len() as f64;
        split.limited += share * limited_fraction;
        split.unlimited += share * (1.0 - limited_fraction);
    }
    split
}

#[derive(Debug, Default)]
struct Bucket {
    shots: u32,
    loot_value: f64,
}

/// Per-loadout spend and loot attribution plus decay, folded event by event.
pub(crate) struct EconomyTracker {
    buckets: HashMap<String, Bucket>,
    /// Buckets in order of first appearance.
    order: Vec<String>,
    last_shot_bucket: Option<String>,
    per_shot: DecaySplit,
    per_armor_hit: DecaySplit,
    decay: DecayBreakdown,
}

impl EconomyTracker {
    pub(crate) fn new(active_loadout: Option<&Loadout>, costs: &dyn LoadoutCostModel) -> Self {
        Self {
            buckets: HashMap::new(),
            order: Vec::new(),
            last_shot_bucket: None,
            per_shot: offensive_split(active_loadout, costs),
            per_armor_hit: defensive_split(active_loadout, costs),
            decay: DecayBreakdown::default(),
        }
    }

    fn bucket(&mut self, id: &str) -> &mut Bucket {
        if !self.buckets.contains_key(id) {
            self.order.push(id.to_string());
        }
        self.buckets.entry(id.to_string()).or_default()
    }

    pub(crate) fn on_shot(&mut self, event: &SessionEvent) {
        let id = event.bucket();
        self.bucket(id).shots += 1;
        self.last_shot_bucket = Some(id.to_string());

        self.decay.offensive_limited += self.per_shot.limited;
        self.decay.offensive_unlimited += self.per_shot.unlimited;
    }

    /// Credit loot to the loadout that fired last (or the event's own bucket).
    pub(crate) fn on_loot(&mut self, event: &SessionEvent, value: f64) {
        let id = self
            .last_shot_bucket
            .clone()
            .unwrap_or_else(|| event.bucket().to_string());
        self.bucket(&id).loot_value += value;
    }

    pub(crate) fn on_armor_hit(&mut self) {
        self.decay.armor_hits += 1;
        self.decay.defensive_limited += self.per_armor_hit.limited;
        self.decay.defensive_unlimited += self.per_armor_hit.unlimited;
    }

    pub(crate) fn finish(mut self, session: &Session) -> EconomyBreakdown {
        let mut economy = EconomyBreakdown::default();

        for id in &self.order {
            let Some(bucket) = self.buckets.get(id) else {
                continue;
            };
            let cost_per_shot = session.cost_per_shot(id);
            let spend = bucket.shots as f64 * cost_per_shot;
            let name = match session.loadout_snapshots.get(id) {
                Some(snapshot) => snapshot.name.clone(),
                None if id == MANUAL_BUCKET => "Manual".to_string(),
                None => id.clone(),
            };
            economy.total_spend += spend;
            economy.loot_value += bucket.loot_value;
            economy.loadouts.push(LoadoutBreakdown {
                loadout_id: id.clone(),
                name,
                shots: bucket.shots,
                cost_per_shot,
                spend,
                loot_value: bucket.loot_value,
                profit: bucket.loot_value - spend,
                return_rate: safe_div(bucket.loot_value, spend) * 100.0,
            });
        }

        economy.profit = economy.loot_value - economy.total_spend;
        economy.return_rate = safe_div(economy.loot_value, economy.total_spend) * 100.0;

        let decay = &mut self.decay;
        decay.offensive = decay.offensive_limited + decay.offensive_unlimited;
        decay.defensive = decay.defensive_limited + decay.defensive_unlimited;
        decay.total = decay.offensive + decay.defensive;
        decay.repair_bill = decay.offensive_unlimited + decay.defensive_unlimited;

        economy.net_profit = economy.profit - decay.total;
        economy.decay = self.decay;
        economy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loadout::{Armor, Equipment, Plate, StandardCostModel};

    fn part(name: &str, decay: f64) -> Option<Equipment> {
        Some(Equipment {
            name: name.to_string(),
            decay,
            ammo_burn: 0.0,
        })
    }

    #[test]
    fn test_offensive_split() {
        let loadout = Loadout {
            id: "a".into(),
            name: "A".into(),
            weapon: part("Opalo", 0.02),
            amplifier: part("A101 (L)", 0.01),
            ..Default::default()
        };
        let split = offensive_split(Some(&loadout), &StandardCostModel);
        assert_eq!(split.unlimited, 0.02);
        assert_eq!(split.limited, 0.01);
    }

    #[test]
    fn test_offensive_fallback() {
        let split = offensive_split(None, &StandardCostModel);
        assert_eq!(split.unlimited, FALLBACK_DECAY_PER_SHOT);
        assert_eq!(split.limited, 0.0);

        let empty = Loadout::default();
        assert_eq!(offensive_split(Some(&empty), &StandardCostModel).total(), FALLBACK_DECAY_PER_SHOT);
    }

    #[test]
    fn test_defensive_split() {
        let loadout = Loadout {
            armor: Some(Armor {
                name: "Pixie".into(),
                decay_per_hit: 0.001,
            }),
            plates: vec![
                Plate {
                    name: "Plate A".into(),
                    decay_per_hit: 0.002,
                },
                Plate {
                    name: "Plate B (L)".into(),
                    decay_per_hit: 0.004,
                },
            ],
            ..Default::default()
        };
        let split = defensive_split(Some(&loadout), &StandardCostModel);
        // share 0.003, half of it on the limited plate
        assert!((split.unlimited - 0.0025).abs() < 1e-12);
        assert!((split.limited - 0.0015).abs() < 1e-12);
    }

    #[test]
    fn test_no_loadout_means_no_defensive_decay() {
        assert_eq!(defensive_split(None, &StandardCostModel).total(), 0.0);
    }
}
