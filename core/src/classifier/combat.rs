//! Combat and death matchers.
//!
//! Critical variants must stay ahead of their plain counterparts: the plain
//! patterns are unanchored and also match the critical line's text.

use super::{Classified, Matcher};
use crate::log::event_type::*;

pub const COMBAT_MATCHERS: &[Matcher] = &[
    critical_hit,
    hit,
    critical_damage_taken,
    damage_taken,
    damage_reduced,
    missed,
    target_avoided,
    out_of_range,
    deflected,
    player_avoided,
    enemy_missed,
];

pub const DEATH_MATCHERS: &[Matcher] = &[player_death, revived];

pattern!(CRITICAL_HIT_RE, r"^Critical hit\b.*?You inflicted (\S+) points of damage");
pattern!(HIT_RE, r"You inflicted (\S+) points of damage");
pattern!(CRITICAL_TAKEN_RE, r"^Critical hit\b.*?You took (\S+) points of damage");
pattern!(TAKEN_RE, r"You took (\S+) points of damage");
pattern!(REDUCED_RE, r"^Reduced (\S+) points of (.+?) damage");
pattern!(TARGET_AVOIDED_RE, r"^The target (Dodged|Evaded) your attack");
pattern!(PLAYER_AVOIDED_RE, r"^You (Dodged|Evaded) the attack");
pattern!(KILLED_BY_RE, r"^You were killed by (?:the |an? )?(.+?)\.?$");

fn critical_hit(msg: &str) -> Option<Classified> {
    let caps = CRITICAL_HIT_RE.captures(msg)?;
    Some(
        Classified::new(CRITICAL_HIT)
            .number("damage", &caps, 1)
            .with("critical", true),
    )
}

fn hit(msg: &str) -> Option<Classified> {
    let caps = HIT_RE.captures(msg)?;
    Some(Classified::new(HIT).number("damage", &caps, 1))
}

fn critical_damage_taken(msg: &str) -> Option<Classified> {
    let caps = CRITICAL_TAKEN_RE.captures(msg)?;
    Some(
        Classified::new(CRITICAL_DAMAGE_TAKEN)
            .number("damage", &caps, 1)
            .with("critical", true),
    )
}

fn damage_taken(msg: &str) -> Option<Classified> {
    let caps = TAKEN_RE.captures(msg)?;
    Some(Classified::new(DAMAGE_TAKEN).number("damage", &caps, 1))
}

fn damage_reduced(msg: &str) -> Option<Classified> {
    let caps = REDUCED_RE.captures(msg)?;
    Some(
        Classified::new(DAMAGE_REDUCED)
            .number("amount", &caps, 1)
            .text("damageType", &caps, 2),
    )
}

fn missed(msg: &str) -> Option<Classified> {
    msg.starts_with("You missed").then(|| Classified::new(MISS))
}

fn target_avoided(msg: &str) -> Option<Classified> {
    if msg.starts_with("The target resisted all damage") {
        return Some(Classified::new(TARGET_RESISTED));
    }
    let caps = TARGET_AVOIDED_RE.captures(msg)?;
    match &caps[1] {
        "Dodged" => Some(Classified::new(TARGET_DODGED)),
        _ => Some(Classified::new(TARGET_EVADED)),
    }
}

fn out_of_range(msg: &str) -> Option<Classified> {
    msg.starts_with("Target out of range")
        .then(|| Classified::new(OUT_OF_RANGE))
}

fn deflected(msg: &str) -> Option<Classified> {
    msg.starts_with("Damage deflected")
        .then(|| Classified::new(DEFLECT))
}

fn player_avoided(msg: &str) -> Option<Classified> {
    let caps = PLAYER_AVOIDED_RE.captures(msg)?;
    match &caps[1] {
        "Dodged" => Some(Classified::new(PLAYER_DODGED)),
        _ => Some(Classified::new(PLAYER_EVADED)),
    }
}

fn enemy_missed(msg: &str) -> Option<Classified> {
    msg.starts_with("The attack missed you")
        .then(|| Classified::new(ENEMY_MISSED))
}

fn player_death(msg: &str) -> Option<Classified> {
    let caps = KILLED_BY_RE.captures(msg)?;
    Some(Classified::new(PLAYER_DEATH).text("killer", &caps, 1))
}

fn revived(msg: &str) -> Option<Classified> {
    msg.starts_with("You have been revived")
        .then(|| Classified::new(REVIVED))
}
