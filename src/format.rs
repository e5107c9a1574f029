//! Human-readable rendering of the decimal-string counts the YouTube API
//! hands back.
//!
//! Counts stay `String` end to end (they are unsigned longs upstream and can
//! exceed what fits losslessly in an `f64`); parsing happens only at the edges
//! where a number is actually needed for sorting, summing, or display.

/// Parses an upstream count string, treating anything unparseable as zero.
///
/// Only for ordering and aggregation. The original string is what gets stored
/// and displayed, so a malformed count never corrupts persisted data.
pub fn parse_count(raw: &str) -> u64 {
    raw.parse().unwrap_or(0)
}

/// Renders a count in the compact style dashboards use: `999`, `1.5K`, `2M`,
/// `1.3B`. One decimal place, with a trailing `.0` suppressed.
pub fn format_number(n: u64) -> String {
    match n {
        0..1_000 => n.to_string(),
        1_000..1_000_000 => scaled(n, 1_000, "K"),
        1_000_000..1_000_000_000 => scaled(n, 1_000_000, "M"),
        _ => scaled(n, 1_000_000_000, "B"),
    }
}

/// `format_number` applied straight to an upstream count string.
pub fn format_count(raw: &str) -> String {
    format_number(parse_count(raw))
}

fn scaled(n: u64, unit: u64, suffix: &str) -> String {
    let rendered = format!("{:.1}", n as f64 / unit as f64);
    let rendered = rendered.strip_suffix(".0").unwrap_or(&rendered);
    format!("{rendered}{suffix}")
}
