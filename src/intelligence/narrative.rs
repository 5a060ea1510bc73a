// ABOUTME: Composes the generated sleep summary and recommendation through the LLM provider
// ABOUTME: Splits the response on its section headers and falls back to fixed text on failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Narrative Composer
//!
//! One request per report. Whatever happens to that request, [`NarrativeComposer::compose`]
//! returns a usable pair of sentences; generation failures are logged and replaced.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::sleep_scoring::DeficitAssessment;
use super::sleep_statistics::SleepStatistics;
use crate::config::GenerationSettings;
use crate::constants::narrative::{
    FALLBACK_RECOMMENDATION, FALLBACK_SUMMARY, GENERIC_RECOMMENDATION, RECOMMENDATION_MARKER,
    SUMMARY_MARKER,
};
use crate::llm::prompts::build_sleep_report_prompt;
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};

/// Generated (or substituted) report narrative
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeResult {
    /// Summary paragraph
    pub summary: String,
    /// Recommendation paragraph
    pub recommendation: String,
}

impl NarrativeResult {
    /// Fixed pair used when generation fails
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            summary: FALLBACK_SUMMARY.to_owned(),
            recommendation: FALLBACK_RECOMMENDATION.to_owned(),
        }
    }

    /// Whether this is the fixed failure pair
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.summary == FALLBACK_SUMMARY && self.recommendation == FALLBACK_RECOMMENDATION
    }
}

/// Split a response into summary and recommendation.
///
/// Everything before the first `Recommendation:` is the summary, with a
/// leading `Summary:` header removed. Everything after it is the
/// recommendation. Without the marker the whole response is the summary and
/// the recommendation is a generic sentence.
#[must_use]
pub fn parse_narrative(raw: &str) -> NarrativeResult {
    let raw = raw.trim();

    match raw.split_once(RECOMMENDATION_MARKER) {
        Some((before, after)) => {
            let before = before.trim();
            let summary = before.strip_prefix(SUMMARY_MARKER).unwrap_or(before);
            NarrativeResult {
                summary: summary.trim().to_owned(),
                recommendation: after.trim().to_owned(),
            }
        }
        None => NarrativeResult {
            summary: raw.to_owned(),
            recommendation: GENERIC_RECOMMENDATION.to_owned(),
        },
    }
}

/// Builds the report prompt and absorbs every generation failure
pub struct NarrativeComposer<'a> {
    provider: &'a dyn LlmProvider,
    settings: GenerationSettings,
}

impl<'a> NarrativeComposer<'a> {
    /// Create a composer sending requests with `settings`
    #[must_use]
    pub fn new(provider: &'a dyn LlmProvider, settings: GenerationSettings) -> Self {
        Self { provider, settings }
    }

    /// Generation settings in use
    #[must_use]
    pub const fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Request a narrative for the given metrics. Never fails.
    #[instrument(skip_all, fields(provider = self.provider.name(), model = %self.settings.model))]
    pub async fn compose(
        &self,
        stats: &SleepStatistics,
        deficit: &DeficitAssessment,
        score: f64,
    ) -> NarrativeResult {
        let prompt = build_sleep_report_prompt(stats, deficit.severity, score);
        let request = ChatRequest::from_settings(vec![ChatMessage::user(prompt)], &self.settings);

        match self.provider.complete(&request).await {
            Ok(response) if !response.content.trim().is_empty() => {
                if !response.content.contains(RECOMMENDATION_MARKER) {
                    warn!("Generated narrative has no recommendation section");
                }
                debug!(
                    chars = response.content.len(),
                    finish_reason = ?response.finish_reason,
                    "Narrative generated"
                );
                parse_narrative(&response.content)
            }
            Ok(_) => {
                warn!("Empty narrative response, using fallback text");
                NarrativeResult::fallback()
            }
            Err(e) => {
                warn!(error = %e, code = ?e.code, "Narrative generation failed, using fallback text");
                NarrativeResult::fallback()
            }
        }
    }
}
