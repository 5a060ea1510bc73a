// ABOUTME: Pipeline from raw sleep records to the final prediction report
// ABOUTME: Runs aggregation and scoring, builds the data summary, and merges the narrative
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Sleep Report Pipeline
//!
//! `run` is the single entry point: records in, [`PredictionReport`] out.
//! Parsing and aggregation errors abort the report. Narrative generation
//! cannot fail, so valid input always yields a report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::config::{GenerationSettings, SleepAnalysisConfig};
use crate::constants::narrative::CLOSING_SENTENCE;
use crate::errors::AppResult;
use crate::intelligence::{
    analyze_sleep, assess_deficit, calculate_sleep_score, format_hours, DeficitAssessment,
    NarrativeComposer, NarrativeResult, SleepCondition, SleepGrade, SleepPattern, SleepStatistics,
    TrendDirection,
};
use crate::llm::LlmProvider;
use crate::models::SleepRecord;

/// Deterministic results for one batch, before any text generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetrics {
    /// Aggregated statistics
    pub statistics: SleepStatistics,
    /// Shortfall against the ideal
    pub deficit: DeficitAssessment,
    /// Sleep score, one decimal
    pub score: f64,
    /// Grade band of the score
    pub grade: SleepGrade,
    /// Condition band of the score
    pub condition: SleepCondition,
}

/// Trend as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendSummary {
    /// Direction with arrow glyph
    pub direction: TrendDirection,
    /// Magnitude of the change as `"<H>h <M>m"`
    pub change: String,
}

/// Formatted statistics section of the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportStatistics {
    /// Average as `"<H>h <M>m"`
    pub average_sleep: String,
    /// Shortest night as `"<H>h <M>m"`
    pub minimum_sleep: String,
    /// Longest night as `"<H>h <M>m"`
    pub maximum_sleep: String,
    /// First-to-last trend
    pub trend: TrendSummary,
    /// Pattern label
    pub sleep_pattern: SleepPattern,
    /// Score, one decimal
    pub sleep_score_percent: f64,
    /// Grade label
    pub sleep_grade: SleepGrade,
}

impl From<&ReportMetrics> for ReportStatistics {
    fn from(metrics: &ReportMetrics) -> Self {
        let stats = &metrics.statistics;
        Self {
            average_sleep: format_hours(stats.average_minutes),
            minimum_sleep: format_hours(f64::from(stats.min_minutes)),
            maximum_sleep: format_hours(f64::from(stats.max_minutes)),
            trend: TrendSummary {
                direction: stats.trend_direction(),
                change: format_hours(stats.trend_change_minutes.unsigned_abs() as f64),
            },
            sleep_pattern: stats.pattern,
            sleep_score_percent: metrics.score,
            sleep_grade: metrics.grade,
        }
    }
}

/// Final report for one batch of records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionReport {
    /// UTC generation time
    pub generated_at: DateTime<Utc>,
    /// Formatted statistics
    pub statistics: ReportStatistics,
    /// Raw numbers behind the formatted statistics
    pub metrics: ReportMetrics,
    /// Template sentence built only from the metrics
    pub data_summary: String,
    /// Generated or fallback narrative
    pub ai_analysis: NarrativeResult,
    /// Narrative recommendation followed by the closing sentence
    pub final_recommendation: String,
}

/// Sentence summarizing the metrics without any generated text
#[must_use]
pub fn build_data_summary(metrics: &ReportMetrics) -> String {
    format!(
        "Your average sleep duration is {:.2} hours, resulting in a sleep score of {:.1}%. \
         This places your sleep quality in the {} category. \
         The detected pattern is '{}', which indicates overall sleep stability status.",
        metrics.statistics.average_hours(),
        metrics.score,
        metrics.condition,
        metrics.statistics.pattern,
    )
}

/// Narrative recommendation joined to the closing sentence by one space
#[must_use]
pub fn build_final_recommendation(narrative: &NarrativeResult) -> String {
    format!("{} {CLOSING_SENTENCE}", narrative.recommendation)
}

/// Sequences aggregation, scoring and narrative generation
pub struct SleepReportPipeline<'a> {
    config: SleepAnalysisConfig,
    composer: NarrativeComposer<'a>,
}

impl<'a> SleepReportPipeline<'a> {
    /// Create a pipeline using the report generation preset and the
    /// provider's default model
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` if the analysis configuration is inconsistent.
    pub fn new(provider: &'a dyn LlmProvider, config: SleepAnalysisConfig) -> AppResult<Self> {
        let settings = GenerationSettings::for_report().with_model(provider.default_model());
        Self::with_generation_settings(provider, config, settings)
    }

    /// Create a pipeline with explicit generation settings
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` if either configuration fails validation.
    pub fn with_generation_settings(
        provider: &'a dyn LlmProvider,
        config: SleepAnalysisConfig,
        settings: GenerationSettings,
    ) -> AppResult<Self> {
        config.validate()?;
        settings.validate()?;
        Ok(Self {
            config,
            composer: NarrativeComposer::new(provider, settings),
        })
    }

    /// Analysis configuration in use
    #[must_use]
    pub const fn config(&self) -> &SleepAnalysisConfig {
        &self.config
    }

    /// Compute the deterministic part of the report
    ///
    /// # Errors
    ///
    /// Returns `INVALID_FORMAT` for a malformed duration and `NO_USABLE_DATA`
    /// when no record carries one.
    pub fn assess(&self, records: &[SleepRecord]) -> AppResult<ReportMetrics> {
        let statistics = analyze_sleep(records, &self.config)?;
        let deficit = assess_deficit(statistics.average_minutes, &self.config);
        let score = calculate_sleep_score(statistics.average_minutes, &self.config);

        Ok(ReportMetrics {
            grade: SleepGrade::from_score(score, &self.config.grades),
            condition: SleepCondition::from_score(score, &self.config.conditions),
            statistics,
            deficit,
            score,
        })
    }

    /// Produce the full report
    ///
    /// # Errors
    ///
    /// Same as [`Self::assess`]; generation failures never surface here.
    #[instrument(skip_all, fields(records = records.len()))]
    pub async fn run(&self, records: &[SleepRecord]) -> AppResult<PredictionReport> {
        let metrics = self.assess(records)?;
        let data_summary = build_data_summary(&metrics);

        info!(
            nights = metrics.statistics.nights,
            score = metrics.score,
            pattern = %metrics.statistics.pattern,
            severity = %metrics.deficit.severity,
            "Sleep metrics computed"
        );

        let narrative = self
            .composer
            .compose(&metrics.statistics, &metrics.deficit, metrics.score)
            .await;

        Ok(PredictionReport {
            generated_at: Utc::now(),
            statistics: ReportStatistics::from(&metrics),
            final_recommendation: build_final_recommendation(&narrative),
            data_summary,
            ai_analysis: narrative,
            metrics,
        })
    }
}
