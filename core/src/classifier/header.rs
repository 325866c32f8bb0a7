//! Line prefix parsing: timestamp and `[Channel] [Subchannel]` header.

use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};
use memchr::memchr;

/// Length of the `YYYY-MM-DD HH:MM:SS` prefix.
const TIMESTAMP_LEN: usize = 19;

/// Channel header of a chat line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header<'a> {
    pub channel: &'a str,
    pub subchannel: &'a str,
    pub message: &'a str,
}

#[inline]
fn digits(b: &[u8]) -> Option<u32> {
    let mut value = 0u32;
    for &c in b {
        if !c.is_ascii_digit() {
            return None;
        }
        value = value * 10 + (c - b'0') as u32;
    }
    Some(value)
}

/// Parse a leading `YYYY-MM-DD HH:MM:SS` prefix.
///
/// Returns the remaining input and the parsed local date-time, or `None` if
/// the prefix is missing or names an impossible date.
pub fn parse_timestamp(input: &str) -> Option<(&str, NaiveDateTime)> {
    let b = input.as_bytes();
    if b.len() < TIMESTAMP_LEN
        || b[4] != b'-'
        || b[7] != b'-'
        || b[10] != b' '
        || b[13] != b':'
        || b[16] != b':'
    {
        return None;
    }

    let year = digits(&b[0..4])?;
    let month = digits(&b[5..7])?;
    let day = digits(&b[8..10])?;
    let hour = digits(&b[11..13])?;
    let minute = digits(&b[14..16])?;
    let second = digits(&b[17..19])?;

    let dt = NaiveDate::from_ymd_opt(year as i32, month, day)?.and_hms_opt(hour, minute, second)?;
    Some((&input[TIMESTAMP_LEN..], dt))
}

/// Convert a log timestamp (written in the player's local time) to epoch ms.
pub fn to_epoch_ms(dt: NaiveDateTime) -> i64 {
    match Local.from_local_datetime(&dt).earliest() {
        Some(local) => local.timestamp_millis(),
        // Skipped by a DST jump; treat as UTC rather than dropping the line.
        None => dt.and_utc().timestamp_millis(),
    }
}

pub fn now_ms() -> i64 {
    Local::now().timestamp_millis()
}

/// Extract one `[...]` segment, returning its contents and the rest.
fn bracket_segment(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    let bytes = input.as_bytes();
    if bytes.first() != Some(&b'[') {
        return None;
    }
    let end = memchr(b']', bytes)?;
    Some((&input[1..end], &input[end + 1..]))
}

/// Parse `[Channel] [Subchannel] message`.
///
/// A missing subchannel segment is tolerated; a missing channel is not.
pub fn parse_header(input: &str) -> Option<Header<'_>> {
    let (channel, rest) = bracket_segment(input)?;
    let (subchannel, rest) = match bracket_segment(rest) {
        Some(seg) => seg,
        None => ("", rest),
    };
    Some(Header {
        channel: channel.trim(),
        subchannel: subchannel.trim(),
        message: rest.trim(),
    })
}
