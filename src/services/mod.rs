// ABOUTME: Service layer sequencing the metrics engine and the text-generation provider
// ABOUTME: Report pipeline for one batch of records and the conversational coach session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Service layer
//!
//! Services own the orchestration around the pure engine in
//! [`crate::intelligence`]. Both borrow an [`crate::llm::LlmProvider`] so the
//! binaries use Gemini and tests use canned doubles.

/// Conversational coach with a bounded trailing history
pub mod chat_session;

/// Record batch to `PredictionReport` pipeline
pub mod sleep_report;

pub use chat_session::ChatSession;
pub use sleep_report::{PredictionReport, ReportMetrics, SleepReportPipeline};
