// ABOUTME: Input record types for nightly sleep durations
// ABOUTME: SleepRecord with ordered fallback between total and average duration fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Sleep input records
//!
//! Sources disagree on the field name for a night's duration: trackers export
//! `total_duration`, weekly digests export `average_duration`. Both are accepted
//! and resolved in that order. Any other keys in a record are ignored.

use serde::{Deserialize, Serialize};

use crate::errors::AppResult;

/// One nightly sleep entry as supplied by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepRecord {
    /// Total sleep for the night, e.g. `"7h 30m"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_duration: Option<String>,
    /// Average sleep for the period, used when no total is present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_duration: Option<String>,
}

impl SleepRecord {
    /// Record carrying a total duration
    #[must_use]
    pub fn total(duration: impl Into<String>) -> Self {
        Self {
            total_duration: Some(duration.into()),
            average_duration: None,
        }
    }

    /// Record carrying only an average duration
    #[must_use]
    pub fn average(duration: impl Into<String>) -> Self {
        Self {
            total_duration: None,
            average_duration: Some(duration.into()),
        }
    }

    /// Resolve the duration token: the first non-empty of `total_duration`
    /// then `average_duration`. `None` means the record is skipped.
    #[must_use]
    pub fn duration_token(&self) -> Option<&str> {
        [
            self.total_duration.as_deref(),
            self.average_duration.as_deref(),
        ]
        .into_iter()
        .flatten()
        .find(|token| !token.is_empty())
    }

    /// Parse a JSON array of records
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the document is not a JSON array of
    /// objects or a duration field is not a string.
    pub fn parse_batch(json: &str) -> AppResult<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }
}
