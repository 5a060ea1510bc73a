// ABOUTME: Configuration management for analysis thresholds and text generation
// ABOUTME: Environment-only settings with validated defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the sleep coach
//!
//! - **Sleep analysis**: ideal baseline and every classification threshold
//! - **LLM**: credentials, model selection and generation parameters
//!
//! Configuration is environment-only; there are no config files.

/// Sleep analysis thresholds
pub mod sleep_analysis;

/// LLM credentials and generation parameters
pub mod llm;

pub use llm::{ChatConfig, GenerationSettings, LlmConfig};
pub use sleep_analysis::{
    ConditionBandsConfig, DeficitConfig, GradeBandsConfig, PatternConfig, SleepAnalysisConfig,
};
