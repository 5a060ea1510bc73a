// ABOUTME: Scores average sleep against the ideal baseline and rates the deficit
// ABOUTME: Grade and condition bands over the 0-100 sleep score
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Sleep Scoring Module
//!
//! The score penalizes deviation from the ideal in either direction, so nine
//! hours and seven hours score the same. The deficit only counts shortfall.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::config::{ConditionBandsConfig, GradeBandsConfig, SleepAnalysisConfig};

/// Score an average in `[0, 100]`, rounded to one decimal with ties to even
/// (an exact `96.25` becomes `96.2`).
///
/// `penalty = min(|avg - ideal| / ideal * 100, 100)`, `score = 100 - penalty`.
#[must_use]
pub fn calculate_sleep_score(average_minutes: f64, config: &SleepAnalysisConfig) -> f64 {
    let ideal = config.ideal_minutes;
    let deviation = (average_minutes - ideal).abs();
    let penalty = (deviation / ideal * 100.0).min(100.0);
    let score = (100.0 - penalty).max(0.0);
    (score * 10.0).round_ties_even() / 10.0
}

/// Deficit severity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeficitSeverity {
    /// At or above the ideal
    Healthy,
    /// Short, but within the moderate threshold
    Mild,
    /// Short by more than the moderate threshold
    Moderate,
    /// Short by more than the severe threshold
    Severe,
}

impl DeficitSeverity {
    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::Mild => "Mild",
            Self::Moderate => "Moderate",
            Self::Severe => "Severe",
        }
    }
}

impl Display for DeficitSeverity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shortfall against the ideal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeficitAssessment {
    /// Minutes short of the ideal, zero when at or above it
    pub deficit_minutes: f64,
    /// Severity tier
    pub severity: DeficitSeverity,
}

/// Rate the deficit of an average.
///
/// Severity is taken from the signed shortfall with strict thresholds: a
/// shortfall of exactly 90 minutes is `Moderate`, a surplus is `Healthy`.
/// The reported minutes are the same shortfall clamped at zero.
#[must_use]
pub fn assess_deficit(average_minutes: f64, config: &SleepAnalysisConfig) -> DeficitAssessment {
    let raw = config.ideal_minutes - average_minutes;
    let thresholds = &config.deficit;

    let severity = if raw > thresholds.severe_minutes {
        DeficitSeverity::Severe
    } else if raw > thresholds.moderate_minutes {
        DeficitSeverity::Moderate
    } else if raw > 0.0 {
        DeficitSeverity::Mild
    } else {
        DeficitSeverity::Healthy
    };

    DeficitAssessment {
        deficit_minutes: raw.max(0.0),
        severity,
    }
}

/// Caller-facing grade over the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SleepGrade {
    /// Top band
    Excellent,
    /// Second band
    Good,
    /// Third band
    Moderate,
    /// Everything below
    Poor,
}

impl SleepGrade {
    /// Grade a score; bands are inclusive lower bounds checked highest first
    #[must_use]
    pub fn from_score(score: f64, bands: &GradeBandsConfig) -> Self {
        if score >= bands.excellent {
            Self::Excellent
        } else if score >= bands.good {
            Self::Good
        } else if score >= bands.moderate {
            Self::Moderate
        } else {
            Self::Poor
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::Poor => "Poor",
        }
    }
}

impl Display for SleepGrade {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Condition phrase used in the data summary sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepCondition {
    /// Lowest band
    CriticallyLow,
    /// Second band
    BelowRecommended,
    /// Third band
    FairButCouldImprove,
    /// Everything above
    WithinHealthyRange,
}

impl SleepCondition {
    /// Classify a score; bands are exclusive upper bounds checked lowest first
    #[must_use]
    pub fn from_score(score: f64, bands: &ConditionBandsConfig) -> Self {
        if score < bands.critical_below {
            Self::CriticallyLow
        } else if score < bands.below_recommended_below {
            Self::BelowRecommended
        } else if score < bands.fair_below {
            Self::FairButCouldImprove
        } else {
            Self::WithinHealthyRange
        }
    }

    /// Phrase as it reads inside a sentence
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CriticallyLow => "critically low",
            Self::BelowRecommended => "below recommended",
            Self::FairButCouldImprove => "fair but could improve",
            Self::WithinHealthyRange => "within healthy range",
        }
    }
}

impl Display for SleepCondition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
