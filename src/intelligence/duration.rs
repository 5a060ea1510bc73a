// ABOUTME: Parses human-entered sleep durations like "7h 30m" into whole minutes
// ABOUTME: Also formats minute values back into the "<H>h <M>m" display form
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::SleepDataError;

/// Parse a duration token into minutes.
///
/// The token is case-insensitive and may contain whitespace anywhere. It must
/// contain exactly one `h` separating the hours from the minutes; a single
/// trailing `m` on the minutes is optional. Minutes of 60 or more are accepted
/// as written (`"1h90m"` is 150).
///
/// ```
/// use sleep_coach::intelligence::parse_duration;
///
/// assert_eq!(parse_duration("7h 30m").unwrap(), 450);
/// assert_eq!(parse_duration(" 8H0M ").unwrap(), 480);
/// assert!(parse_duration("7.5h").is_err());
/// ```
///
/// # Errors
///
/// Returns [`SleepDataError::InvalidDuration`] carrying the original token when
/// the shape does not match, a component is not a plain integer, or the total
/// does not fit in `u32`.
pub fn parse_duration(token: &str) -> Result<u32, SleepDataError> {
    let invalid = || SleepDataError::invalid_duration(token);

    let normalized = token
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    let (hours, rest) = normalized.split_once('h').ok_or_else(invalid)?;
    if rest.contains('h') {
        return Err(invalid());
    }
    let minutes = rest.strip_suffix('m').unwrap_or(rest);

    let hours = parse_component(hours).ok_or_else(invalid)?;
    let minutes = parse_component(minutes).ok_or_else(invalid)?;

    hours
        .checked_mul(60)
        .and_then(|total| total.checked_add(minutes))
        .ok_or_else(invalid)
}

/// Digits only: no sign, no decimal point, not empty
fn parse_component(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Format minutes as `"<H>h <M>m"`, flooring hours and truncating the
/// fractional minute (`487.5` formats as `"8h 7m"`).
#[must_use]
pub fn format_hours(minutes: f64) -> String {
    let hours = (minutes / 60.0).floor() as i64;
    let mins = minutes.rem_euclid(60.0) as i64;
    format!("{hours}h {mins}m")
}
