//! Event type discriminators emitted by the classifier.

// Combat
pub const HIT: &str = "HIT";
pub const CRITICAL_HIT: &str = "CRITICAL_HIT";
pub const MISS: &str = "MISS";
pub const TARGET_DODGED: &str = "TARGET_DODGED";
pub const TARGET_EVADED: &str = "TARGET_EVADED";
pub const TARGET_RESISTED: &str = "TARGET_RESISTED";
pub const OUT_OF_RANGE: &str = "OUT_OF_RANGE";
pub const DAMAGE_TAKEN: &str = "DAMAGE_TAKEN";
pub const CRITICAL_DAMAGE_TAKEN: &str = "CRITICAL_DAMAGE_TAKEN";
pub const DAMAGE_REDUCED: &str = "DAMAGE_REDUCED";
pub const DEFLECT: &str = "DEFLECT";
pub const PLAYER_DODGED: &str = "PLAYER_DODGED";
pub const PLAYER_EVADED: &str = "PLAYER_EVADED";
pub const ENEMY_MISSED: &str = "ENEMY_MISSED";

// Death
pub const PLAYER_DEATH: &str = "PLAYER_DEATH";
pub const REVIVED: &str = "REVIVED";

// Loot
pub const LOOT: &str = "LOOT";

// Skill
pub const SKILL_GAIN: &str = "SKILL_GAIN";
pub const ATTRIBUTE_GAIN: &str = "ATTRIBUTE_GAIN";
pub const SKILL_LEVEL: &str = "SKILL_LEVEL";
pub const NEW_SKILL: &str = "NEW_SKILL";

// Mining
pub const CLAIM: &str = "CLAIM";
pub const NO_FIND: &str = "NO_FIND";

// Healing
pub const SELF_HEAL: &str = "SELF_HEAL";
pub const HEAL_GIVEN: &str = "HEAL_GIVEN";
pub const HEAL_RECEIVED: &str = "HEAL_RECEIVED";

// Effect
pub const EFFECT_OVER_TIME: &str = "EFFECT_OVER_TIME";
pub const EFFECT_EXPIRED: &str = "EFFECT_EXPIRED";

// Equipment
pub const ENHANCER_BROKE: &str = "ENHANCER_BROKE";
pub const TIER_UP: &str = "TIER_UP";
pub const CONDITION_LOW: &str = "CONDITION_LOW";
pub const ITEM_BROKEN: &str = "ITEM_BROKEN";

// Vehicle
pub const VEHICLE_DAMAGE: &str = "VEHICLE_DAMAGE";
pub const VEHICLE_REPAIRED: &str = "VEHICLE_REPAIRED";
pub const VEHICLE_RETURNED: &str = "VEHICLE_RETURNED";

// Position
pub const POSITION: &str = "POSITION";
pub const ARRIVED: &str = "ARRIVED";

// Social
pub const FRIEND_ONLINE: &str = "FRIEND_ONLINE";
pub const FRIEND_OFFLINE: &str = "FRIEND_OFFLINE";
pub const TRADE_REQUEST: &str = "TRADE_REQUEST";
pub const TEAM_JOINED: &str = "TEAM_JOINED";

// Transaction
pub const TT_SALE: &str = "TT_SALE";
pub const AUCTION_WON: &str = "AUCTION_WON";
pub const AUCTION_SOLD: &str = "AUCTION_SOLD";
pub const TRANSACTION_COMPLETE: &str = "TRANSACTION_COMPLETE";

// System
pub const AFK_ON: &str = "AFK_ON";
pub const AFK_OFF: &str = "AFK_OFF";
pub const INVENTORY_FULL: &str = "INVENTORY_FULL";
pub const UNKNOWN: &str = "UNKNOWN";

// Global broadcasts
pub const GLOBAL_KILL: &str = "GLOBAL_KILL";
pub const GLOBAL_MINING: &str = "GLOBAL_MINING";
pub const GLOBAL_CRAFT: &str = "GLOBAL_CRAFT";

/// Events that consume ammo (one shot fired).
pub const AMMO_CONSUMING: &[&str] = &[
    HIT,
    CRITICAL_HIT,
    MISS,
    TARGET_DODGED,
    TARGET_EVADED,
    TARGET_RESISTED,
];

/// Events where the player's armor absorbed a hit.
pub const ARMOR_HITS: &[&str] = &[DAMAGE_TAKEN, CRITICAL_DAMAGE_TAKEN];

pub fn is_ammo_consuming(event_type: &str) -> bool {
    AMMO_CONSUMING.contains(&event_type)
}

pub fn is_armor_hit(event_type: &str) -> bool {
    ARMOR_HITS.contains(&event_type)
}
