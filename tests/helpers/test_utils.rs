// ABOUTME: Sleep record and statistics fixtures shared across integration tests
// ABOUTME: Builds record batches from duration tokens and canned narrative responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use sleep_coach::config::SleepAnalysisConfig;
use sleep_coach::intelligence::{assess_deficit, DeficitAssessment, SleepStatistics};
use sleep_coach::models::SleepRecord;

/// Well-formed two-section narrative
pub const WELL_FORMED_NARRATIVE: &str = "Summary:\nYou averaged 8.00 hours with a score of 100.0%.\n\nRecommendation:\nKeep your bedtime steady to protect this result.";

/// Records with a `total_duration` for every token
pub fn records(tokens: &[&str]) -> Vec<SleepRecord> {
    tokens.iter().map(|t| SleepRecord::total(*t)).collect()
}

/// The three-night batch averaging exactly eight hours
pub fn eight_hour_batch() -> Vec<SleepRecord> {
    records(&["8h0m", "7h30m", "8h30m"])
}

/// Statistics and deficit for minute values under the default configuration
pub fn metrics_for(values: &[u32]) -> (SleepStatistics, DeficitAssessment) {
    let config = SleepAnalysisConfig::default();
    let stats = SleepStatistics::from_minutes(values, &config.pattern).unwrap();
    let deficit = assess_deficit(stats.average_minutes, &config);
    (stats, deficit)
}
