// ABOUTME: Aggregates nightly sleep records into average, range and trend statistics
// ABOUTME: Classifies the series as consistent, improving, declining or irregular
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Sleep Statistics Module
//!
//! Records are reduced in input order; order matters because the trend is the
//! last resolved night minus the first. Records without a duration field are
//! skipped, but a malformed duration fails the whole batch.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::duration::parse_duration;
use crate::config::{PatternConfig, SleepAnalysisConfig};
use crate::errors::SleepDataError;
use crate::models::SleepRecord;

/// Qualitative label for a series of nights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SleepPattern {
    /// Too few nights to say anything
    #[serde(rename = "Insufficient Data")]
    InsufficientData,
    /// Narrow spread between shortest and longest night
    #[serde(rename = "Consistent Sleep Pattern")]
    Consistent,
    /// Wide spread, and the last night is much longer than the first
    #[serde(rename = "Improving Sleep Habit")]
    Improving,
    /// Wide spread, and the last night is much shorter than the first
    #[serde(rename = "Declining Sleep Habit")]
    Declining,
    /// Wide spread without a clear direction
    #[serde(rename = "Irregular Sleep Pattern")]
    Irregular,
}

impl SleepPattern {
    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InsufficientData => "Insufficient Data",
            Self::Consistent => "Consistent Sleep Pattern",
            Self::Improving => "Improving Sleep Habit",
            Self::Declining => "Declining Sleep Habit",
            Self::Irregular => "Irregular Sleep Pattern",
        }
    }
}

impl Display for SleepPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sign of the last-minus-first change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendDirection {
    /// Last night longer than the first
    #[serde(rename = "Improving ⬆")]
    Improving,
    /// Last night shorter than the first
    #[serde(rename = "Declining ⬇")]
    Declining,
    /// No change
    #[serde(rename = "Stable ➖")]
    Stable,
}

impl TrendDirection {
    /// Direction of a signed change in minutes
    #[must_use]
    pub const fn from_change(change_minutes: i64) -> Self {
        if change_minutes > 0 {
            Self::Improving
        } else if change_minutes < 0 {
            Self::Declining
        } else {
            Self::Stable
        }
    }

    /// Display label with arrow glyph
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Improving => "Improving ⬆",
            Self::Declining => "Declining ⬇",
            Self::Stable => "Stable ➖",
        }
    }
}

impl Display for TrendDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Descriptive statistics over the resolved nights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepStatistics {
    /// Mean of the resolved nights in minutes
    pub average_minutes: f64,
    /// Shortest night in minutes
    pub min_minutes: u32,
    /// Longest night in minutes
    pub max_minutes: u32,
    /// Last night minus first night, in input order
    pub trend_change_minutes: i64,
    /// Pattern label for the series
    pub pattern: SleepPattern,
    /// Number of nights that contributed
    pub nights: usize,
}

impl SleepStatistics {
    /// Compute statistics from minute values in input order
    ///
    /// # Errors
    ///
    /// Returns [`SleepDataError::NoData`] for an empty slice.
    pub fn from_minutes(values: &[u32], config: &PatternConfig) -> Result<Self, SleepDataError> {
        let (Some(&first), Some(&last)) = (values.first(), values.last()) else {
            return Err(SleepDataError::NoData);
        };

        let (min_minutes, max_minutes) = min_max(values);
        let total: u64 = values.iter().map(|&v| u64::from(v)).sum();

        Ok(Self {
            average_minutes: total as f64 / values.len() as f64,
            min_minutes,
            max_minutes,
            trend_change_minutes: i64::from(last) - i64::from(first),
            pattern: classify_pattern(values, config),
            nights: values.len(),
        })
    }

    /// Direction of the trend change
    #[must_use]
    pub const fn trend_direction(&self) -> TrendDirection {
        TrendDirection::from_change(self.trend_change_minutes)
    }

    /// Average expressed in hours
    #[must_use]
    pub fn average_hours(&self) -> f64 {
        self.average_minutes / 60.0
    }
}

fn min_max(values: &[u32]) -> (u32, u32) {
    values
        .iter()
        .fold((u32::MAX, u32::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

/// Label a series of nights.
///
/// The spread check runs before the direction checks, so a tight series is
/// `Consistent` however far its last night moved from its first. Both
/// direction thresholds are strict.
#[must_use]
pub fn classify_pattern(values: &[u32], config: &PatternConfig) -> SleepPattern {
    if values.len() < config.min_nights {
        return SleepPattern::InsufficientData;
    }
    let (Some(&first), Some(&last)) = (values.first(), values.last()) else {
        return SleepPattern::InsufficientData;
    };

    let (min, max) = min_max(values);
    let variability = max - min;
    let change = i64::from(last) - i64::from(first);

    if variability < config.consistent_variability_minutes {
        SleepPattern::Consistent
    } else if change > config.trend_change_minutes {
        SleepPattern::Improving
    } else if change < -config.trend_change_minutes {
        SleepPattern::Declining
    } else {
        SleepPattern::Irregular
    }
}

/// Aggregate records into statistics.
///
/// # Errors
///
/// - [`SleepDataError::InvalidDuration`] if any resolved token is malformed
/// - [`SleepDataError::NoData`] if no record carries a duration
pub fn analyze_sleep(
    records: &[SleepRecord],
    config: &SleepAnalysisConfig,
) -> Result<SleepStatistics, SleepDataError> {
    let values = records
        .iter()
        .filter_map(SleepRecord::duration_token)
        .map(parse_duration)
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        records = records.len(),
        nights = values.len(),
        "Resolved sleep durations"
    );

    SleepStatistics::from_minutes(&values, &config.pattern)
}
