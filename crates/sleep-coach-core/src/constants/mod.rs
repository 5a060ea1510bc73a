// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Sleep thresholds, fixed narrative text, service names and env var keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by domain. Threshold values here seed the defaults of
//! the analysis configuration; the engine itself always reads them through
//! that configuration.

/// Sleep duration baseline and classification thresholds
pub mod sleep {
    /// Ideal nightly sleep (8 hours) in minutes
    pub const IDEAL_SLEEP_MINUTES: f64 = 480.0;
    /// Minimum number of nights needed to classify a pattern
    pub const MIN_NIGHTS_FOR_PATTERN: usize = 2;
    /// Spread (max - min) below which a series counts as consistent
    pub const CONSISTENT_VARIABILITY_MINUTES: u32 = 45;
    /// Last-minus-first change beyond which a series is improving or declining
    pub const TREND_CHANGE_MINUTES: i64 = 30;
    /// Deficit strictly above this is severe
    pub const SEVERE_DEFICIT_MINUTES: f64 = 90.0;
    /// Deficit strictly above this is moderate
    pub const MODERATE_DEFICIT_MINUTES: f64 = 45.0;
}

/// Score bands used for grades and condition labels
pub mod score_bands {
    /// Inclusive lower bound of the Excellent grade
    pub const GRADE_EXCELLENT: f64 = 95.0;
    /// Inclusive lower bound of the Good grade
    pub const GRADE_GOOD: f64 = 80.0;
    /// Inclusive lower bound of the Moderate grade
    pub const GRADE_MODERATE: f64 = 60.0;
    /// Scores below this are critically low
    pub const CONDITION_CRITICAL: f64 = 40.0;
    /// Scores below this are below recommended
    pub const CONDITION_BELOW_RECOMMENDED: f64 = 70.0;
    /// Scores below this are fair; at or above is the healthy range
    pub const CONDITION_FAIR: f64 = 90.0;
}

/// Fixed sentences used when the generated narrative is unavailable
pub mod narrative {
    /// Section header the model is asked to emit first
    pub const SUMMARY_MARKER: &str = "Summary:";
    /// Section header separating summary and recommendation
    pub const RECOMMENDATION_MARKER: &str = "Recommendation:";
    /// Recommendation used when the response carries no recommendation section
    pub const GENERIC_RECOMMENDATION: &str = "Consider improving sleep duration and consistency.";
    /// Summary used when generation fails
    pub const FALLBACK_SUMMARY: &str =
        "Sleep data indicates imbalance that may affect recovery and daily performance.";
    /// Recommendation used when generation fails
    pub const FALLBACK_RECOMMENDATION: &str = "Focus on structured sleep improvements.";
    /// Sentence appended to every final recommendation
    pub const CLOSING_SENTENCE: &str =
        "Consistency and gradual improvement remain key to restoring healthy sleep balance.";
}

/// Text-generation defaults
pub mod generation {
    /// Default hosted model
    pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
    /// Temperature for report narratives
    pub const REPORT_TEMPERATURE: f32 = 0.6;
    /// Output cap for report narratives
    pub const REPORT_MAX_OUTPUT_TOKENS: u32 = 350;
    /// Temperature for coach conversations
    pub const CHAT_TEMPERATURE: f32 = 0.3;
    /// Output cap for coach conversations
    pub const CHAT_MAX_OUTPUT_TOKENS: u32 = 300;
    /// Trailing turns resent with every chat request
    pub const DEFAULT_CHAT_HISTORY_LIMIT: usize = 10;
}

/// Service names for structured logging
pub mod service_names {
    /// Default service name
    pub const SLEEP_COACH: &str = "sleep-coach";
}

/// Environment variable names
pub mod env_config {
    /// API key for the Gemini text-generation service
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    /// Optional model override
    pub const MODEL: &str = "SLEEP_COACH_MODEL";
    /// Optional chat history limit override
    pub const HISTORY_LIMIT: &str = "SLEEP_COACH_HISTORY_LIMIT";
}
