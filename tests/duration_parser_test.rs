// ABOUTME: Tests for sleep duration token parsing and hour formatting
// ABOUTME: Covers accepted spellings, malformed tokens, overflow and display form
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use sleep_coach::errors::SleepDataError;
use sleep_coach::intelligence::{format_hours, parse_duration};

#[test]
fn test_parse_compact_and_spaced_tokens() {
    assert_eq!(parse_duration("7h30m").unwrap(), 450);
    assert_eq!(parse_duration("7h 30m").unwrap(), 450);
    assert_eq!(parse_duration(" 8 h 0 m ").unwrap(), 480);
    assert_eq!(parse_duration("12h05m").unwrap(), 725);
}

#[test]
fn test_parse_is_case_insensitive() {
    assert_eq!(parse_duration("7H30M").unwrap(), 450);
    assert_eq!(parse_duration("6h45M").unwrap(), 405);
}

#[test]
fn test_trailing_minute_suffix_is_optional() {
    assert_eq!(parse_duration("7h30").unwrap(), 450);
}

#[test]
fn test_minutes_over_sixty_are_kept_as_written() {
    assert_eq!(parse_duration("1h90m").unwrap(), 150);
}

#[test]
fn test_zero_duration() {
    assert_eq!(parse_duration("0h0m").unwrap(), 0);
}

#[test]
fn test_every_well_formed_token_is_exact() {
    for hours in 0..=14_u32 {
        for minutes in (0..60_u32).step_by(7) {
            let expected = hours * 60 + minutes;
            assert_eq!(parse_duration(&format!("{hours}h{minutes}m")).unwrap(), expected);
            assert_eq!(
                parse_duration(&format!("{hours}h {minutes}m")).unwrap(),
                expected
            );
        }
    }
}

#[test]
fn test_malformed_tokens_are_rejected() {
    let malformed = [
        "",
        "   ",
        "730",
        "7:30",
        "7h30h",
        "7h3h0m",
        "h30m",
        "7hm",
        "7h",
        "-1h30m",
        "7h-5m",
        "+7h30m",
        "7.5h0m",
        "7h30mm",
        "sevenh30m",
        "7 hours 30 minutes",
    ];

    for token in malformed {
        assert!(parse_duration(token).is_err(), "accepted {token:?}");
    }
}

#[test]
fn test_error_carries_original_token() {
    let err = parse_duration("Seven H").unwrap_err();
    assert_eq!(
        err,
        SleepDataError::InvalidDuration {
            token: "Seven H".to_owned()
        }
    );
    assert_eq!(err.to_string(), "Invalid duration format: Seven H");
}

#[test]
fn test_overflow_is_a_format_error() {
    let err = parse_duration("99999999h0m").unwrap_err();
    assert!(matches!(err, SleepDataError::InvalidDuration { .. }));
    assert!(parse_duration("1h99999999999m").is_err());
}

#[test]
fn test_format_hours() {
    assert_eq!(format_hours(480.0), "8h 0m");
    assert_eq!(format_hours(450.0), "7h 30m");
    assert_eq!(format_hours(30.0), "0h 30m");
    assert_eq!(format_hours(0.0), "0h 0m");
    assert_eq!(format_hours(725.0), "12h 5m");
}

#[test]
fn test_format_hours_truncates_fractional_minutes() {
    assert_eq!(format_hours(487.5), "8h 7m");
    assert_eq!(format_hours(479.9), "7h 59m");
}
