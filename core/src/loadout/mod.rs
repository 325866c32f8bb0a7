//! Hunting loadouts and the cost model that prices them.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ammo burn is quoted in ammo units; 10 000 units make one PED.
pub const AMMO_UNITS_PER_PED: f64 = 10_000.0;

/// Marker carried by the names of limited (non-repairable) items.
pub const LIMITED_MARKER: &str = "(L)";

#[derive(Debug, Error)]
pub enum LoadoutError {
    #[error("failed to read loadout file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid loadout file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize loadout: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// A weapon-side part: weapon, amplifier, scope or sight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub name: String,
    /// PED of decay per use.
    #[serde(default)]
    pub decay: f64,
    /// Ammo units consumed per use.
    #[serde(default)]
    pub ammo_burn: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Armor {
    pub name: String,
    #[serde(default)]
    pub decay_per_hit: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plate {
    pub name: String,
    #[serde(default)]
    pub decay_per_hit: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loadout {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub weapon: Option<Equipment>,
    #[serde(default)]
    pub amplifier: Option<Equipment>,
    #[serde(default)]
    pub scope: Option<Equipment>,
    #[serde(default)]
    pub sight: Option<Equipment>,
    #[serde(default)]
    pub armor: Option<Armor>,
    #[serde(default)]
    pub plates: Vec<Plate>,
}

impl Loadout {
    pub fn from_toml_str(s: &str) -> Result<Self, LoadoutError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadoutError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let loadout = Self::from_toml_str(&text)?;
        tracing::debug!(id = %loadout.id, name = %loadout.name, "Loaded loadout");
        Ok(loadout)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), LoadoutError> {
        std::fs::write(path.as_ref(), toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Parts that wear on every shot, in weapon → sight order.
    pub fn offensive_parts(&self) -> impl Iterator<Item = &Equipment> {
        [&self.weapon, &self.amplifier, &self.scope, &self.sight]
            .into_iter()
            .flatten()
    }

    /// Parts that consume ammo on every shot.
    pub fn ammo_parts(&self) -> impl Iterator<Item = &Equipment> {
        [&self.weapon, &self.amplifier].into_iter().flatten()
    }
}

/// Prices loadouts. Stats and session code only see this trait.
pub trait LoadoutCostModel: Send + Sync {
    /// Total PED spent per shot: decay plus ammo.
    fn effective_cost_per_shot(&self, loadout: &Loadout) -> f64;

    fn armor_decay_per_hit(&self, armor: &Armor) -> f64;

    /// Decay a single plate takes per hit, given the full plate set.
    fn single_plate_decay_per_hit(&self, plates: &[Plate]) -> f64;

    /// Limited items cannot be repaired, so their decay is not part of a repair bill.
    fn is_limited_item(&self, name: &str) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCostModel;

impl LoadoutCostModel for StandardCostModel {
    fn effective_cost_per_shot(&self, loadout: &Loadout) -> f64 {
        let decay: f64 = loadout.offensive_parts().map(|p| p.decay).sum();
        let ammo: f64 = loadout.ammo_parts().map(|p| p.ammo_burn).sum();
        decay + ammo / AMMO_UNITS_PER_PED
    }

    fn armor_decay_per_hit(&self, armor: &Armor) -> f64 {
        armor.decay_per_hit
    }

    fn single_plate_decay_per_hit(&self, plates: &[Plate]) -> f64 {
        if plates.is_empty() {
            return 0.0;
        }
        plates.iter().map(|p| p.decay_per_hit).sum::<f64>() / plates.len() as f64
    }

    fn is_limited_item(&self, name: &str) -> bool {
        name.contains(LIMITED_MARKER)
    }
}
