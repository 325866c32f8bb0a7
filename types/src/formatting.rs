//! Centralized number formatting utilities.
//!
//! All PED amounts, rates and durations printed by the CLI go through this
//! module so the output stays consistent and can switch to European-style
//! number formatting (swapping `.` and `,`).

/// Apply European number format by swapping `.` and `,` in a formatted string.
fn europeanize(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '.' => result.push(','),
            ',' => result.push('.'),
            _ => result.push(c),
        }
    }
    result
}

/// Apply European formatting conditionally.
#[inline]
fn maybe_eu(s: String, european: bool) -> String {
    if european { europeanize(&s) } else { s }
}

/// Format a PED amount with 2 decimals and the currency suffix.
///
/// # Examples
/// ```
/// use pedtrack_types::formatting::format_ped;
/// assert_eq!(format_ped(1.5, false), "1.50 PED");
/// assert_eq!(format_ped(-0.254, false), "-0.25 PED");
/// assert_eq!(format_ped(1.5, true), "1,50 PED");
/// ```
pub fn format_ped(value: f64, european: bool) -> String {
    maybe_eu(format!("{:.2} PED", value), european)
}

/// Format a small PED amount (decay, cost per shot) with 4 decimals.
///
/// # Examples
/// ```
/// use pedtrack_types::formatting::format_ped_precise;
/// assert_eq!(format_ped_precise(0.0021, false), "0.0021 PED");
/// assert_eq!(format_ped_precise(0.0021, true), "0,0021 PED");
/// ```
pub fn format_ped_precise(value: f64, european: bool) -> String {
    maybe_eu(format!("{:.4} PED", value), european)
}

/// Format a large f64 number with K/M suffix for compact display.
///
/// - Values >= 1,000,000 are formatted as `X.XXM`
/// - Values >= 1,000 are formatted as `X.XXK`
/// - Values below 1,000 are rounded to whole numbers
///
/// # Examples
/// ```
/// use pedtrack_types::formatting::format_compact;
/// assert_eq!(format_compact(500.0, false), "500");
/// assert_eq!(format_compact(1_500.0, false), "1.50K");
/// assert_eq!(format_compact(1_500_000.0, false), "1.50M");
/// assert_eq!(format_compact(1_500.0, true), "1,50K");
/// ```
pub fn format_compact(n: f64, european: bool) -> String {
    let n_abs = n.abs();
    let s = if n_abs >= 1_000_000.0 {
        format!("{:.2}M", n / 1_000_000.0)
    } else if n_abs >= 1_000.0 {
        format!("{:.2}K", n / 1_000.0)
    } else {
        format!("{:.0}", n)
    };
    maybe_eu(s, european)
}

/// Format a percentage value with 1 decimal place.
///
/// # Examples
/// ```
/// use pedtrack_types::formatting::format_pct;
/// assert_eq!(format_pct(92.7, false), "92.7%");
/// assert_eq!(format_pct(92.7, true), "92,7%");
/// ```
pub fn format_pct(n: f64, european: bool) -> String {
    maybe_eu(format!("{:.1}%", n), european)
}

/// Format a decimal f64 number with the specified precision.
///
/// # Examples
/// ```
/// use pedtrack_types::formatting::format_decimal;
/// assert_eq!(format_decimal(1.234, 3, false), "1.234");
/// assert_eq!(format_decimal(1.234, 3, true), "1,234");
/// ```
pub fn format_decimal(n: f64, precision: usize, european: bool) -> String {
    maybe_eu(format!("{:.prec$}", n, prec = precision), european)
}

/// Format a duration as `H:MM:SS`, or `M:SS` below one hour.
///
/// # Examples
/// ```
/// use pedtrack_types::formatting::format_duration;
/// assert_eq!(format_duration(125), "2:05");
/// assert_eq!(format_duration(3_725), "1:02:05");
/// assert_eq!(format_duration(0), "0:00");
/// ```
pub fn format_duration(secs: i64) -> String {
    let secs = secs.max(0);
    let hours = secs / 3_600;
    let mins = (secs % 3_600) / 60;
    let secs = secs % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{}:{:02}", mins, secs)
    }
}

/// Format a millisecond span as a duration (see [`format_duration`]).
pub fn format_duration_ms(ms: i64) -> String {
    format_duration(ms / 1_000)
}
