//! Broadcast matchers for the `Globals` channel.
//!
//! These lines describe other players as often as the local one, so the
//! player name is captured and filtering is left to the stats layer.

use super::Classified;
use crate::log::event_type::{GLOBAL_CRAFT, GLOBAL_KILL, GLOBAL_MINING};

pattern!(
    KILL_RE,
    r"^(.+?) killed a creature \((.+?)\) with a value of (\S+) PED"
);
pattern!(
    MINING_RE,
    r"^(.+?) found a deposit \((.+?)\) with a value of (\S+) PED"
);
pattern!(
    CRAFT_RE,
    r"^(.+?) constructed an item \((.+?)\) worth (\S+) PED"
);

const HALL_OF_FAME: &str = "Hall of Fame";

/// Match a `Globals` channel message, or `None` for other broadcasts.
pub fn classify_global(msg: &str) -> Option<Classified> {
    let (event_type, caps) = [
        (GLOBAL_KILL, &*KILL_RE),
        (GLOBAL_MINING, &*MINING_RE),
        (GLOBAL_CRAFT, &*CRAFT_RE),
    ]
    .into_iter()
    .find_map(|(event_type, re)| re.captures(msg).map(|caps| (event_type, caps)))?;

    Some(
        Classified::new(event_type)
            .text("player", &caps, 1)
            .text("target", &caps, 2)
            .number("value", &caps, 3)
            .with("hof", msg.contains(HALL_OF_FAME)),
    )
}
