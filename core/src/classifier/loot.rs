//! Loot and mining matchers.

use super::{Classified, Matcher};
use crate::log::event_type::*;

pub const LOOT_MATCHERS: &[Matcher] = &[loot];

pub const MINING_MATCHERS: &[Matcher] = &[claim, no_find];

// "You received Shrapnel x (4012) Value: 0.4012 PED"
pattern!(LOOT_RE, r"^You received (.+?) x \((\S+)\) Value: (\S+) PED");
pattern!(CLAIM_RE, r"^You have claimed a resource! \((.+?)\)");

fn loot(msg: &str) -> Option<Classified> {
    let caps = LOOT_RE.captures(msg)?;
    Some(
        Classified::new(LOOT)
            .text("item", &caps, 1)
            .number("quantity", &caps, 2)
            .number("value", &caps, 3),
    )
}

fn claim(msg: &str) -> Option<Classified> {
    let caps = CLAIM_RE.captures(msg)?;
    Some(Classified::new(CLAIM).text("resource", &caps, 1))
}

fn no_find(msg: &str) -> Option<Classified> {
    (msg.starts_with("No resources found") || msg.starts_with("This area seems to be depleted"))
        .then(|| Classified::new(NO_FIND))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify_message;
    use crate::log::{EventCategory, EventValue};

    #[test]
    fn test_loot_fields() {
        let c = loot("You received Animal Oil Residue x (131) Value: 1.3100 PED").unwrap();
        assert_eq!(c.event_type, LOOT);
        assert_eq!(c.data["item"], EventValue::from("Animal Oil Residue"));
        assert_eq!(c.data["quantity"], EventValue::Number(131.0));
        assert_eq!(c.data["value"], EventValue::Number(1.31));
    }

    #[test]
    fn test_loot_item_with_parentheses() {
        let c = loot("You received Opalo (L) x (1) Value: 0.0500 PED").unwrap();
        assert_eq!(c.data["item"], EventValue::from("Opalo (L)"));
    }

    #[test]
    fn test_loot_malformed_value() {
        let c = loot("You received Shrapnel x (12) Value: n/a PED").unwrap();
        assert!(c.data.contains_key("quantity"));
        assert!(!c.data.contains_key("value"));
    }

    #[test]
    fn test_mining_messages() {
        let (category, c) = classify_message("You have claimed a resource! (Lysterium Stone)").unwrap();
        assert_eq!(category, EventCategory::Mining);
        assert_eq!(c.event_type, CLAIM);
        assert_eq!(c.data["resource"], EventValue::from("Lysterium Stone"));

        let (category, c) = classify_message("No resources found").unwrap();
        assert_eq!(category, EventCategory::Mining);
        assert_eq!(c.event_type, NO_FIND);
    }
}
