//! Position, social, transaction and client-state matchers.

use super::{Classified, Matcher};
use crate::log::event_type::*;

pub const POSITION_MATCHERS: &[Matcher] = &[position, arrived];

pub const SOCIAL_MATCHERS: &[Matcher] = &[friend_status, trade_request, team_joined];

pub const TRANSACTION_MATCHERS: &[Matcher] = &[tt_sale, auction_won, auction_sold, transaction_complete];

pub const SYSTEM_MATCHERS: &[Matcher] = &[afk, inventory_full];

// "[Calypso, 61234, 75121, 112, Waypoint]"
pattern!(
    POSITION_RE,
    r"^\[([^,\]]+), (-?\d+(?:\.\d+)?), (-?\d+(?:\.\d+)?), (-?\d+(?:\.\d+)?)(?:, ([^\]]*))?\]"
);
pattern!(ARRIVED_RE, r"^You have arrived at (.+?)\.?$");

pattern!(FRIEND_RE, r"^Your friend (.+?) is now (online|offline)");
pattern!(TRADE_REQUEST_RE, r"^(.+?) wants to trade with you");
pattern!(TEAM_JOINED_RE, r"^You have joined the team (.+?)\.?$");

pattern!(TT_SALE_RE, r"^You sold (.+?)(?: x \((\S+)\))? for (\S+) PED");
pattern!(AUCTION_WON_RE, r"^You won the auction for (.+?) at (\S+) PED");
pattern!(AUCTION_SOLD_RE, r"^Your auction of (.+?) has been sold for (\S+) PED");

fn position(msg: &str) -> Option<Classified> {
    let caps = POSITION_RE.captures(msg)?;
    Some(
        Classified::new(POSITION)
            .text("planet", &caps, 1)
            .number("x", &caps, 2)
            .number("y", &caps, 3)
            .number("z", &caps, 4)
            .text("label", &caps, 5),
    )
}

fn arrived(msg: &str) -> Option<Classified> {
    let caps = ARRIVED_RE.captures(msg)?;
    Some(Classified::new(ARRIVED).text("location", &caps, 1))
}

fn friend_status(msg: &str) -> Option<Classified> {
    let caps = FRIEND_RE.captures(msg)?;
    let event_type = if &caps[2] == "online" {
        FRIEND_ONLINE
    } else {
        FRIEND_OFFLINE
    };
    Some(Classified::new(event_type).text("player", &caps, 1))
}

fn trade_request(msg: &str) -> Option<Classified> {
    let caps = TRADE_REQUEST_RE.captures(msg)?;
    Some(Classified::new(TRADE_REQUEST).text("player", &caps, 1))
}

fn team_joined(msg: &str) -> Option<Classified> {
    let caps = TEAM_JOINED_RE.captures(msg)?;
    Some(Classified::new(TEAM_JOINED).text("team", &caps, 1))
}

fn tt_sale(msg: &str) -> Option<Classified> {
    let caps = TT_SALE_RE.captures(msg)?;
    Some(
        Classified::new(TT_SALE)
            .text("item", &caps, 1)
            .number("quantity", &caps, 2)
            .number("value", &caps, 3),
    )
}

fn auction_won(msg: &str) -> Option<Classified> {
    let caps = AUCTION_WON_RE.captures(msg)?;
    Some(
        Classified::new(AUCTION_WON)
            .text("item", &caps, 1)
            .number("value", &caps, 2),
    )
}

fn auction_sold(msg: &str) -> Option<Classified> {
    let caps = AUCTION_SOLD_RE.captures(msg)?;
    Some(
        Classified::new(AUCTION_SOLD)
            .text("item", &caps, 1)
            .number("value", &caps, 2),
    )
}

fn transaction_complete(msg: &str) -> Option<Classified> {
    msg.starts_with("Transaction completed")
        .then(|| Classified::new(TRANSACTION_COMPLETE))
}

fn afk(msg: &str) -> Option<Classified> {
    if msg.starts_with("You are now away from keyboard") {
        Some(Classified::new(AFK_ON))
    } else if msg.starts_with("You are no longer away from keyboard") {
        Some(Classified::new(AFK_OFF))
    } else {
        None
    }
}

fn inventory_full(msg: &str) -> Option<Classified> {
    msg.starts_with("Your inventory is full")
        .then(|| Classified::new(INVENTORY_FULL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify_message;
    use crate::log::{EventCategory, EventValue};

    #[test]
    fn test_position_with_label() {
        let c = position("[Calypso, 61234, 75121, 112, Waypoint]").unwrap();
        assert_eq!(c.data["planet"], EventValue::from("Calypso"));
        assert_eq!(c.data["x"], EventValue::Number(61234.0));
        assert_eq!(c.data["y"], EventValue::Number(75121.0));
        assert_eq!(c.data["z"], EventValue::Number(112.0));
        assert_eq!(c.data["label"], EventValue::from("Waypoint"));
    }

    #[test]
    fn test_position_without_label() {
        let c = position("[Arkadia, 1000, 2000, -5]").unwrap();
        assert_eq!(c.data["z"], EventValue::Number(-5.0));
        assert!(!c.data.contains_key("label"));
    }

    #[test]
    fn test_social() {
        let (category, c) = classify_message("Your friend Jane Doe is now online").unwrap();
        assert_eq!(category, EventCategory::Social);
        assert_eq!(c.event_type, FRIEND_ONLINE);
        assert_eq!(c.data["player"], EventValue::from("Jane Doe"));

        let (_, c) = classify_message("Your friend Jane Doe is now offline").unwrap();
        assert_eq!(c.event_type, FRIEND_OFFLINE);

        let (_, c) = classify_message("You have joined the team Hunters").unwrap();
        assert_eq!(c.data["team"], EventValue::from("Hunters"));
    }

    #[test]
    fn test_transactions() {
        let (category, c) = classify_message("You sold Animal Hide x (10) for 0.50 PED").unwrap();
        assert_eq!(category, EventCategory::Transaction);
        assert_eq!(c.event_type, TT_SALE);
        assert_eq!(c.data["item"], EventValue::from("Animal Hide"));
        assert_eq!(c.data["quantity"], EventValue::Number(10.0));
        assert_eq!(c.data["value"], EventValue::Number(0.5));

        let (_, c) = classify_message("You sold Opalo for 12.00 PED").unwrap();
        assert_eq!(c.data["item"], EventValue::from("Opalo"));
        assert!(!c.data.contains_key("quantity"));

        let (_, c) =
            classify_message("You won the auction for Animal Oil Residue at 12.30 PED").unwrap();
        assert_eq!(c.event_type, AUCTION_WON);

        let (_, c) =
            classify_message("Your auction of Animal Oil Residue has been sold for 12.30 PED")
                .unwrap();
        assert_eq!(c.event_type, AUCTION_SOLD);
        assert_eq!(c.data["value"], EventValue::Number(12.3));
    }

    #[test]
    fn test_client_state() {
        let (category, c) = classify_message("You are now away from keyboard").unwrap();
        assert_eq!(category, EventCategory::System);
        assert_eq!(c.event_type, AFK_ON);

        let (_, c) = classify_message("You are no longer away from keyboard").unwrap();
        assert_eq!(c.event_type, AFK_OFF);

        let (_, c) = classify_message("Your inventory is full").unwrap();
        assert_eq!(c.event_type, INVENTORY_FULL);
    }
}
