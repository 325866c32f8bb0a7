//! Skill and attribute gain matchers.

use super::{Classified, Matcher};
use crate::log::event_type::*;

pub const SKILL_MATCHERS: &[Matcher] = &[skill_gain, attribute_gain, skill_level, new_skill];

pattern!(SKILL_GAIN_RE, r"^You have gained (\S+) experience in your (.+?) skill");
pattern!(
    ATTRIBUTE_GAIN_RE,
    r"^You have gained (\S+) (Agility|Intelligence|Psyche|Stamina|Strength|Health)\b"
);
pattern!(SKILL_LEVEL_RE, r"^You have advanced to level (\S+) in (.+?)!?$");
pattern!(NEW_SKILL_RE, r"^You have acquired a new skill[;:] (.+?)!?$");

fn skill_gain(msg: &str) -> Option<Classified> {
    let caps = SKILL_GAIN_RE.captures(msg)?;
    Some(
        Classified::new(SKILL_GAIN)
            .number("value", &caps, 1)
            .text("skill", &caps, 2),
    )
}

fn attribute_gain(msg: &str) -> Option<Classified> {
    let caps = ATTRIBUTE_GAIN_RE.captures(msg)?;
    Some(
        Classified::new(ATTRIBUTE_GAIN)
            .number("value", &caps, 1)
            .text("skill", &caps, 2),
    )
}

fn skill_level(msg: &str) -> Option<Classified> {
    let caps = SKILL_LEVEL_RE.captures(msg)?;
    Some(
        Classified::new(SKILL_LEVEL)
            .number("level", &caps, 1)
            .text("skill", &caps, 2),
    )
}

fn new_skill(msg: &str) -> Option<Classified> {
    let caps = NEW_SKILL_RE.captures(msg)?;
    Some(Classified::new(NEW_SKILL).text("skill", &caps, 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::EventValue;

    #[test]
    fn test_skill_gain() {
        let c = skill_gain("You have gained 0.3452 experience in your Rifle skill").unwrap();
        assert_eq!(c.data["skill"], EventValue::from("Rifle"));
        assert_eq!(c.data["value"], EventValue::Number(0.3452));
    }

    #[test]
    fn test_attribute_gain_is_not_a_skill_gain() {
        assert!(skill_gain("You have gained 0.0201 Agility").is_none());
        let c = attribute_gain("You have gained 0.0201 Agility").unwrap();
        assert_eq!(c.event_type, ATTRIBUTE_GAIN);
        assert_eq!(c.data["skill"], EventValue::from("Agility"));
    }

    #[test]
    fn test_skill_level_and_new_skill() {
        let c = skill_level("You have advanced to level 12 in Laser Weaponry Technology").unwrap();
        assert_eq!(c.data["level"], EventValue::Number(12.0));
        assert_eq!(c.data["skill"], EventValue::from("Laser Weaponry Technology"));

        let c = new_skill("You have acquired a new skill; Anatomy").unwrap();
        assert_eq!(c.data["skill"], EventValue::from("Anatomy"));
    }
}
