//! Healing, effect, equipment and vehicle matchers.

use super::{Classified, Matcher};
use crate::log::event_type::*;

pub const HEALING_MATCHERS: &[Matcher] = &[self_heal, heal_given, heal_received];

pub const EFFECT_MATCHERS: &[Matcher] = &[effect_over_time, effect_expired];

pub const EQUIPMENT_MATCHERS: &[Matcher] = &[enhancer_broke, tier_up, condition_low, item_broken];

pub const VEHICLE_MATCHERS: &[Matcher] = &[vehicle_damage, vehicle_repaired, vehicle_returned];

pattern!(SELF_HEAL_RE, r"^You healed yourself (\S+) points");
pattern!(HEAL_GIVEN_RE, r"^You healed (.+?) with (\S+) points");
pattern!(HEAL_RECEIVED_RE, r"^You were healed (\S+) points by (.+?)\.?$");

pattern!(EFFECT_OVER_TIME_RE, r"^Received Effect Over Time: (.+)$");
pattern!(EFFECT_EXPIRED_RE, r"^The effect of (.+?) has worn off");

pattern!(ENHANCER_BROKE_RE, r"^Your enhancer (.+?) on your (.+?) broke");
pattern!(ENHANCERS_LEFT_RE, r"You have (\d+) enhancers? remaining");
pattern!(ENHANCER_SHRAPNEL_RE, r"You received (\S+) PED Shrapnel");
pattern!(TIER_UP_RE, r"^Your (.+?) has reached tier (\S+?)\.?$");
pattern!(CONDITION_LOW_RE, r"^Your (.+?) is close to reaching minimum condition");
pattern!(ITEM_BROKEN_RE, r"^Your (.+?) has reached minimum condition");

pattern!(VEHICLE_DAMAGE_RE, r"^Your vehicle took (\S+) points of damage");
pattern!(VEHICLE_RETURNED_RE, r"^Your vehicle has been returned to (.+?)\.?$");

fn self_heal(msg: &str) -> Option<Classified> {
    let caps = SELF_HEAL_RE.captures(msg)?;
    Some(Classified::new(SELF_HEAL).number("amount", &caps, 1))
}

fn heal_given(msg: &str) -> Option<Classified> {
    let caps = HEAL_GIVEN_RE.captures(msg)?;
    Some(
        Classified::new(HEAL_GIVEN)
            .text("target", &caps, 1)
            .number("amount", &caps, 2),
    )
}

fn heal_received(msg: &str) -> Option<Classified> {
    let caps = HEAL_RECEIVED_RE.captures(msg)?;
    Some(
        Classified::new(HEAL_RECEIVED)
            .number("amount", &caps, 1)
            .text("source", &caps, 2),
    )
}

fn effect_over_time(msg: &str) -> Option<Classified> {
    let caps = EFFECT_OVER_TIME_RE.captures(msg)?;
    Some(Classified::new(EFFECT_OVER_TIME).text("effect", &caps, 1))
}

fn effect_expired(msg: &str) -> Option<Classified> {
    let caps = EFFECT_EXPIRED_RE.captures(msg)?;
    Some(Classified::new(EFFECT_EXPIRED).text("effect", &caps, 1))
}

fn enhancer_broke(msg: &str) -> Option<Classified> {
    let caps = ENHANCER_BROKE_RE.captures(msg)?;
    let mut c = Classified::new(ENHANCER_BROKE)
        .text("enhancer", &caps, 1)
        .text("item", &caps, 2);
    if let Some(left) = ENHANCERS_LEFT_RE.captures(msg) {
        c = c.number("remaining", &left, 1);
    }
    if let Some(shrapnel) = ENHANCER_SHRAPNEL_RE.captures(msg) {
        c = c.number("shrapnel", &shrapnel, 1);
    }
    Some(c)
}

fn tier_up(msg: &str) -> Option<Classified> {
    let caps = TIER_UP_RE.captures(msg)?;
    Some(
        Classified::new(TIER_UP)
            .text("item", &caps, 1)
            .number("tier", &caps, 2),
    )
}

fn condition_low(msg: &str) -> Option<Classified> {
    let caps = CONDITION_LOW_RE.captures(msg)?;
    Some(Classified::new(CONDITION_LOW).text("item", &caps, 1))
}

fn item_broken(msg: &str) -> Option<Classified> {
    let caps = ITEM_BROKEN_RE.captures(msg)?;
    Some(Classified::new(ITEM_BROKEN).text("item", &caps, 1))
}

fn vehicle_damage(msg: &str) -> Option<Classified> {
    let caps = VEHICLE_DAMAGE_RE.captures(msg)?;
    Some(Classified::new(VEHICLE_DAMAGE).number("damage", &caps, 1))
}

fn vehicle_repaired(msg: &str) -> Option<Classified> {
    msg.starts_with("Your vehicle has been repaired")
        .then(|| Classified::new(VEHICLE_REPAIRED))
}

fn vehicle_returned(msg: &str) -> Option<Classified> {
    let caps = VEHICLE_RETURNED_RE.captures(msg)?;
    Some(Classified::new(VEHICLE_RETURNED).text("location", &caps, 1))
}
