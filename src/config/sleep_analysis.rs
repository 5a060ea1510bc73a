// ABOUTME: Sleep analysis configuration with the ideal baseline and classification bands
// ABOUTME: Pattern, deficit, grade and condition thresholds with validated defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Sleep Analysis Configuration
//!
//! Every threshold the metrics engine uses lives here. Defaults come from
//! `constants::sleep` and `constants::score_bands`; the ideal baseline is the
//! 8 hour adult recommendation (Watson et al. 2015).

use serde::{Deserialize, Serialize};

use crate::constants::{score_bands, sleep};
use crate::errors::{AppError, AppResult};

/// Sleep analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepAnalysisConfig {
    /// Ideal nightly sleep in minutes
    pub ideal_minutes: f64,
    /// Pattern classification thresholds
    pub pattern: PatternConfig,
    /// Deficit severity thresholds
    pub deficit: DeficitConfig,
    /// Grade bands over the sleep score
    pub grades: GradeBandsConfig,
    /// Condition bands used in the data summary
    pub conditions: ConditionBandsConfig,
}

/// Thresholds for labelling a series of nights
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternConfig {
    /// Fewer nights than this yields `InsufficientData`
    pub min_nights: usize,
    /// Spread strictly below this is consistent
    pub consistent_variability_minutes: u32,
    /// Change strictly beyond this (either sign) is improving or declining
    pub trend_change_minutes: i64,
}

/// Deficit severity thresholds (strict lower bounds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeficitConfig {
    /// Deficit above this is severe
    pub severe_minutes: f64,
    /// Deficit above this is moderate
    pub moderate_minutes: f64,
}

/// Grade bands (inclusive lower bounds, evaluated highest first)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeBandsConfig {
    /// Excellent from this score
    pub excellent: f64,
    /// Good from this score
    pub good: f64,
    /// Moderate from this score
    pub moderate: f64,
}

/// Condition bands (exclusive upper bounds, evaluated lowest first)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionBandsConfig {
    /// Critically low below this score
    pub critical_below: f64,
    /// Below recommended below this score
    pub below_recommended_below: f64,
    /// Fair below this score
    pub fair_below: f64,
}

impl Default for SleepAnalysisConfig {
    fn default() -> Self {
        Self {
            ideal_minutes: sleep::IDEAL_SLEEP_MINUTES,
            pattern: PatternConfig::default(),
            deficit: DeficitConfig::default(),
            grades: GradeBandsConfig::default(),
            conditions: ConditionBandsConfig::default(),
        }
    }
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            min_nights: sleep::MIN_NIGHTS_FOR_PATTERN,
            consistent_variability_minutes: sleep::CONSISTENT_VARIABILITY_MINUTES,
            trend_change_minutes: sleep::TREND_CHANGE_MINUTES,
        }
    }
}

impl Default for DeficitConfig {
    fn default() -> Self {
        Self {
            severe_minutes: sleep::SEVERE_DEFICIT_MINUTES,
            moderate_minutes: sleep::MODERATE_DEFICIT_MINUTES,
        }
    }
}

impl Default for GradeBandsConfig {
    fn default() -> Self {
        Self {
            excellent: score_bands::GRADE_EXCELLENT,
            good: score_bands::GRADE_GOOD,
            moderate: score_bands::GRADE_MODERATE,
        }
    }
}

impl Default for ConditionBandsConfig {
    fn default() -> Self {
        Self {
            critical_below: score_bands::CONDITION_CRITICAL,
            below_recommended_below: score_bands::CONDITION_BELOW_RECOMMENDED,
            fair_below: score_bands::CONDITION_FAIR,
        }
    }
}

impl SleepAnalysisConfig {
    /// Check that thresholds are usable and ordered
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` when the ideal baseline is not positive, the
    /// pattern needs no nights, or any band is out of order.
    pub fn validate(&self) -> AppResult<()> {
        if !self.ideal_minutes.is_finite() || self.ideal_minutes <= 0.0 {
            return Err(AppError::config_invalid(format!(
                "ideal_minutes must be positive, got {}",
                self.ideal_minutes
            )));
        }

        if self.pattern.min_nights == 0 {
            return Err(AppError::config_invalid(
                "pattern.min_nights must be at least 1",
            ));
        }

        if !(self.deficit.severe_minutes > self.deficit.moderate_minutes
            && self.deficit.moderate_minutes >= 0.0)
        {
            return Err(AppError::config_invalid(format!(
                "deficit thresholds must satisfy severe > moderate >= 0, got {} / {}",
                self.deficit.severe_minutes, self.deficit.moderate_minutes
            )));
        }

        let grades = &self.grades;
        if !(grades.excellent > grades.good && grades.good > grades.moderate) {
            return Err(AppError::config_invalid(format!(
                "grade bands must be descending, got {} / {} / {}",
                grades.excellent, grades.good, grades.moderate
            )));
        }

        let conditions = &self.conditions;
        if !(conditions.critical_below < conditions.below_recommended_below
            && conditions.below_recommended_below < conditions.fair_below)
        {
            return Err(AppError::config_invalid(format!(
                "condition bands must be ascending, got {} / {} / {}",
                conditions.critical_below, conditions.below_recommended_below, conditions.fair_below
            )));
        }

        Ok(())
    }
}
