// ABOUTME: LLM credentials, model selection, and generation parameter presets
// ABOUTME: Reads GEMINI_API_KEY and optional overrides from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{env_config, generation};
use crate::errors::{AppError, AppResult};
use crate::llm::prompts::{SLEEP_COACH_SYSTEM_PROMPT, SLEEP_REPORT_SYSTEM_INSTRUCTION};

/// Credentials and model selection for the text-generation service
#[derive(Clone)]
pub struct LlmConfig {
    /// Gemini API key
    pub api_key: String,
    /// Model override from `SLEEP_COACH_MODEL`
    pub model: Option<String>,
}

impl LlmConfig {
    /// Load from the environment
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_MISSING` if `GEMINI_API_KEY` is unset or empty.
    pub fn from_env() -> AppResult<Self> {
        let api_key = env::var(env_config::GEMINI_API_KEY)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AppError::config_missing(format!(
                    "{} environment variable not set",
                    env_config::GEMINI_API_KEY
                ))
            })?;

        let model = env::var(env_config::MODEL)
            .ok()
            .filter(|model| !model.is_empty());
        if let Some(model) = &model {
            debug!(model = %model, "Using model override from {}", env_config::MODEL);
        }

        Ok(Self { api_key, model })
    }

    /// Model to request, falling back to the default
    #[must_use]
    pub fn model_or_default(&self) -> &str {
        self.model.as_deref().unwrap_or(generation::DEFAULT_MODEL)
    }
}

impl Debug for LlmConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("LlmConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

/// Parameters sent with every generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Model identifier
    pub model: String,
    /// Sampling temperature (0.0 - 2.0)
    pub temperature: f32,
    /// Output length cap
    pub max_output_tokens: u32,
    /// System instruction string
    pub system_instruction: String,
}

impl GenerationSettings {
    /// Preset for report narratives
    #[must_use]
    pub fn for_report() -> Self {
        Self {
            model: generation::DEFAULT_MODEL.to_owned(),
            temperature: generation::REPORT_TEMPERATURE,
            max_output_tokens: generation::REPORT_MAX_OUTPUT_TOKENS,
            system_instruction: SLEEP_REPORT_SYSTEM_INSTRUCTION.to_owned(),
        }
    }

    /// Preset for coach conversations
    #[must_use]
    pub fn for_chat() -> Self {
        Self {
            model: generation::DEFAULT_MODEL.to_owned(),
            temperature: generation::CHAT_TEMPERATURE,
            max_output_tokens: generation::CHAT_MAX_OUTPUT_TOKENS,
            system_instruction: SLEEP_COACH_SYSTEM_PROMPT.to_owned(),
        }
    }

    /// Override the model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Check parameter ranges
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` for an empty model, a temperature outside
    /// 0.0-2.0, or a zero output cap.
    pub fn validate(&self) -> AppResult<()> {
        if self.model.trim().is_empty() {
            return Err(AppError::config_invalid("model must not be empty"));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(AppError::config_invalid(format!(
                "temperature must be within 0.0-2.0, got {}",
                self.temperature
            )));
        }
        if self.max_output_tokens == 0 {
            return Err(AppError::config_invalid(
                "max_output_tokens must be positive",
            ));
        }
        Ok(())
    }
}

/// Conversation settings for the coach chat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Trailing turns resent with each request
    pub history_limit: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            history_limit: generation::DEFAULT_CHAT_HISTORY_LIMIT,
        }
    }
}

impl ChatConfig {
    /// Load from the environment, defaulting when unset
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` if `SLEEP_COACH_HISTORY_LIMIT` is set but is
    /// not a non-negative integer.
    pub fn from_env() -> AppResult<Self> {
        match env::var(env_config::HISTORY_LIMIT) {
            Ok(raw) => {
                let history_limit = raw.trim().parse().map_err(|_| {
                    AppError::config_invalid(format!(
                        "{} must be a non-negative integer, got '{raw}'",
                        env_config::HISTORY_LIMIT
                    ))
                })?;
                Ok(Self { history_limit })
            }
            Err(_) => Ok(Self::default()),
        }
    }
}
