// ABOUTME: Core types and constants for the sleep coach
// ABOUTME: Foundation crate with error handling and sleep analysis constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Sleep Coach Core
//!
//! Foundation crate providing shared types and constants for the sleep coach.
//! This crate is designed to change infrequently, enabling incremental
//! compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and the
//!   domain-specific `SleepDataError`
//! - **constants**: Sleep analysis thresholds and fixed narrative text

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;
