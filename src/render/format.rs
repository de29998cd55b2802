//! Formatting helpers
//!
//! Pure text formatting used by the renderers: fixed-width truncation,
//! compact elapsed-time strings, and UTC timestamp parsing.

use chrono::{DateTime, Utc};

/// Truncate `s` to `width` characters, ending with an ellipsis when it does
/// not fit, and pad shorter strings to exactly `width`.
pub fn ellipsize(s: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= width {
        let mut out = s.to_string();
        out.extend(std::iter::repeat_n(' ', width - chars.len()));
        out
    } else {
        let mut out: String = chars[..width - 1].iter().collect();
        out.push('…');
        out
    }
}

/// Format the elapsed time between two instants as a compact age string
///
/// Uses the largest unit that is non-zero: `36d`, `5h`, `12m`, `40s`.
/// A `from` in the future (clock skew) renders as `0s`.
pub fn format_age(from: DateTime<Utc>, to: DateTime<Utc>) -> String {
    let secs = (to - from).num_seconds().max(0);
    if secs >= 86_400 {
        format!("{}d", secs / 86_400)
    } else if secs >= 3_600 {
        format!("{}h", secs / 3_600)
    } else if secs >= 60 {
        format!("{}m", secs / 60)
    } else {
        format!("{}s", secs)
    }
}

/// Parse a UTC timestamp string as reported by the API server (RFC 3339)
pub fn parse_utc_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
