// ABOUTME: Sleep metrics engine turning duration records into statistics and scores
// ABOUTME: Duration parsing, aggregation, pattern classification, scoring and narratives
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Intelligence Module
//!
//! Deterministic analysis of nightly sleep durations. Every function here is
//! pure except [`NarrativeComposer::compose`], which makes one call to the
//! text-generation provider and never fails.

/// `"7h 30m"` token parsing and `"<H>h <M>m"` formatting
pub mod duration;
/// Generated summary and recommendation with fixed fallback text
pub mod narrative;
/// Sleep score, deficit severity, grade and condition bands
pub mod sleep_scoring;
/// Aggregation of records and pattern classification
pub mod sleep_statistics;

pub use duration::{format_hours, parse_duration};
pub use narrative::{parse_narrative, NarrativeComposer, NarrativeResult};
pub use sleep_scoring::{
    assess_deficit, calculate_sleep_score, DeficitAssessment, DeficitSeverity, SleepCondition,
    SleepGrade,
};
pub use sleep_statistics::{
    analyze_sleep, classify_pattern, SleepPattern, SleepStatistics, TrendDirection,
};
