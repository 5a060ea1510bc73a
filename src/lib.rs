// ABOUTME: Main library entry point for the sleep coach
// ABOUTME: Sleep metrics engine, generated narratives, and a conversational coach
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Sleep Coach
//!
//! Turns a series of nightly sleep durations into descriptive statistics, a
//! 0-100 sleep score, a deficit severity and a pattern label, then asks a hosted
//! language model for a short summary and recommendation.
//!
//! ## Pipeline
//!
//! 1. `intelligence::duration` parses `"7h 30m"` tokens into minutes
//! 2. `intelligence::sleep_statistics` aggregates records and classifies the pattern
//! 3. `intelligence::sleep_scoring` scores the average and rates the deficit
//! 4. `intelligence::narrative` composes the generated summary, with a fixed fallback
//! 5. `services::sleep_report` sequences the above into a `PredictionReport`
//!
//! ## Example
//!
//! ```rust,no_run
//! use sleep_coach::config::SleepAnalysisConfig;
//! use sleep_coach::llm::GeminiProvider;
//! use sleep_coach::models::SleepRecord;
//! use sleep_coach::services::sleep_report::SleepReportPipeline;
//!
//! # async fn example() -> Result<(), sleep_coach::errors::AppError> {
//! let provider = GeminiProvider::from_env()?;
//! let pipeline = SleepReportPipeline::new(&provider, SleepAnalysisConfig::default())?;
//! let records = vec![SleepRecord::total("7h 30m"), SleepRecord::total("8h 5m")];
//! let report = pipeline.run(&records).await?;
//! println!("{}", report.final_recommendation);
//! # Ok(())
//! # }
//! ```

/// Configuration for analysis thresholds and text generation
pub mod config;

/// Application constants re-exported from the core crate
pub mod constants;

/// Unified error handling re-exported from the core crate
pub mod errors;

/// Deterministic sleep metrics engine and narrative composer
pub mod intelligence;

/// LLM provider abstraction and Gemini implementation
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Input record types
pub mod models;

/// Report pipeline and coach conversation services
pub mod services;
