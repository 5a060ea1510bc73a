// ABOUTME: Domain errors raised while turning raw sleep records into statistics
// ABOUTME: Malformed duration tokens and empty data sets, convertible into AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

use super::{AppError, ErrorCode};

/// Errors raised by the sleep metrics engine.
///
/// Both variants abort the whole report: a single malformed record fails the
/// batch rather than being skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SleepDataError {
    /// A duration token did not match `<hours>h<minutes>m`
    #[error("Invalid duration format: {token}")]
    InvalidDuration {
        /// The offending token as supplied by the caller
        token: String,
    },
    /// No record carried a usable duration field
    #[error("No valid sleep duration data found.")]
    NoData,
}

impl SleepDataError {
    /// Create an invalid duration error for a token
    #[must_use]
    pub fn invalid_duration(token: impl Into<String>) -> Self {
        Self::InvalidDuration {
            token: token.into(),
        }
    }

    /// Error code used when converting to `AppError`
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidDuration { .. } => ErrorCode::InvalidFormat,
            Self::NoData => ErrorCode::NoUsableData,
        }
    }
}

impl From<SleepDataError> for AppError {
    fn from(error: SleepDataError) -> Self {
        Self::new(error.code(), error.to_string())
    }
}
