use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::log::{ParsedEvent, event_type};

/// Ammo handed back by the game. It is a refund, not loot.
pub const UNIVERSAL_AMMO: &str = "Universal Ammo";

pub const SHRAPNEL: &str = "Shrapnel";

pub fn is_universal_ammo(item: &str) -> bool {
    item.eq_ignore_ascii_case(UNIVERSAL_AMMO)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStat {
    pub quantity: f64,
    pub value: f64,
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LootBreakdown {
    pub items: BTreeMap<String, ItemStat>,
    pub unique_items: usize,
    /// TT value of everything looted, universal ammo excluded.
    pub total_value: f64,
    pub loot_events: u32,
    pub shrapnel_value: f64,
    pub ammo_returned_value: f64,
    pub ammo_returned_quantity: f64,
}

/// How a loot line was booked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum LootKind {
    /// Real loot worth this much PED.
    Item(f64),
    /// Universal ammo refund; ignored by kills and economics.
    AmmoRefund,
}

impl LootBreakdown {
    /// Book a `LOOT` event. Returns `None` for any other event type.
    pub(crate) fn record(&mut self, event: &ParsedEvent) -> Option<LootKind> {
        if !event.is(event_type::LOOT) {
            return None;
        }
        let item = event.text("item").unwrap_or("Unknown");
        let quantity = event.number("quantity");
        let value = event.number("value");

        if is_universal_ammo(item) {
            self.ammo_returned_value += value;
            self.ammo_returned_quantity += quantity;
            return Some(LootKind::AmmoRefund);
        }

        let stat = self.items.entry(item.to_string()).or_default();
        stat.quantity += quantity;
        stat.value += value;
        stat.count += 1;

        if item.eq_ignore_ascii_case(SHRAPNEL) {
            self.shrapnel_value += value;
        }
        self.total_value += value;
        self.loot_events += 1;
        Some(LootKind::Item(value))
    }

    pub(crate) fn finish(&mut self) {
        self.unique_items = self.items.len();
    }
}

/// Global and Hall of Fame broadcasts credited to the player.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSummary {
    pub count: u32,
    pub hof_count: u32,
    pub total_value: f64,
    pub best_value: f64,
}

impl GlobalSummary {
    /// Count a broadcast when it names `player` (any player when `None`).
    pub(crate) fn record(&mut self, event: &ParsedEvent, player: Option<&str>) {
        if !matches!(
            event.event_type.as_str(),
            event_type::GLOBAL_KILL | event_type::GLOBAL_MINING | event_type::GLOBAL_CRAFT
        ) {
            return;
        }
        if let Some(player) = player {
            let matches = event
                .text("player")
                .is_some_and(|name| name.trim().eq_ignore_ascii_case(player.trim()));
            if !matches {
                return;
            }
        }

        let value = event.number("value");
        self.count += 1;
        if event.flag("hof") {
            self.hof_count += 1;
        }
        self.total_value += value;
        self.best_value = self.best_value.max(value);
    }
}
