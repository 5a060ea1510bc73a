// ABOUTME: End-to-end tests for the sleep report pipeline with a scripted provider
// ABOUTME: Covers report assembly, JSON shape, fallback resilience and error propagation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(clippy::float_cmp)]
#![allow(missing_docs)]

mod helpers;

use helpers::mock_llm::{MockLlmProvider, MOCK_MODEL};
use helpers::test_utils::{eight_hour_batch, records, WELL_FORMED_NARRATIVE};
use sleep_coach::config::{GenerationSettings, SleepAnalysisConfig};
use sleep_coach::constants::narrative::{CLOSING_SENTENCE, FALLBACK_RECOMMENDATION};
use sleep_coach::errors::ErrorCode;
use sleep_coach::intelligence::{
    DeficitSeverity, SleepCondition, SleepGrade, SleepPattern, TrendDirection,
};
use sleep_coach::models::SleepRecord;
use sleep_coach::services::sleep_report::build_data_summary;
use sleep_coach::services::SleepReportPipeline;

const EIGHT_HOUR_SUMMARY: &str = "Your average sleep duration is 8.00 hours, resulting in a sleep score of 100.0%. This places your sleep quality in the within healthy range category. The detected pattern is 'Irregular Sleep Pattern', which indicates overall sleep stability status.";

#[tokio::test]
async fn test_eight_hour_batch_report() {
    let provider = MockLlmProvider::replying(WELL_FORMED_NARRATIVE);
    let pipeline = SleepReportPipeline::new(&provider, SleepAnalysisConfig::default()).unwrap();

    let report = pipeline.run(&eight_hour_batch()).await.unwrap();

    let metrics = &report.metrics;
    assert_eq!(metrics.statistics.average_minutes, 480.0);
    assert_eq!(metrics.score, 100.0);
    assert_eq!(metrics.grade, SleepGrade::Excellent);
    assert_eq!(metrics.condition, SleepCondition::WithinHealthyRange);
    assert_eq!(metrics.deficit.severity, DeficitSeverity::Healthy);
    assert_eq!(metrics.deficit.deficit_minutes, 0.0);
    assert_eq!(metrics.statistics.pattern, SleepPattern::Irregular);

    let stats = &report.statistics;
    assert_eq!(stats.average_sleep, "8h 0m");
    assert_eq!(stats.minimum_sleep, "7h 30m");
    assert_eq!(stats.maximum_sleep, "8h 30m");
    assert_eq!(stats.trend.direction, TrendDirection::Improving);
    assert_eq!(stats.trend.change, "0h 30m");
    assert_eq!(stats.sleep_pattern, SleepPattern::Irregular);
    assert_eq!(stats.sleep_score_percent, 100.0);
    assert_eq!(stats.sleep_grade, SleepGrade::Excellent);

    assert_eq!(report.data_summary, EIGHT_HOUR_SUMMARY);
    assert_eq!(
        report.ai_analysis.recommendation,
        "Keep your bedtime steady to protect this result."
    );
    assert_eq!(
        report.final_recommendation,
        format!("Keep your bedtime steady to protect this result. {CLOSING_SENTENCE}")
    );
}

#[tokio::test]
async fn test_report_json_shape() {
    let provider = MockLlmProvider::replying(WELL_FORMED_NARRATIVE);
    let pipeline = SleepReportPipeline::new(&provider, SleepAnalysisConfig::default()).unwrap();

    let report = pipeline.run(&eight_hour_batch()).await.unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert!(json["generated_at"].as_str().unwrap().contains('T'));
    assert_eq!(json["statistics"]["average_sleep"], "8h 0m");
    assert_eq!(json["statistics"]["trend"]["direction"], "Improving ⬆");
    assert_eq!(json["statistics"]["trend"]["change"], "0h 30m");
    assert_eq!(json["statistics"]["sleep_pattern"], "Irregular Sleep Pattern");
    assert_eq!(json["statistics"]["sleep_score_percent"], 100.0);
    assert_eq!(json["statistics"]["sleep_grade"], "Excellent");
    assert_eq!(json["metrics"]["deficit"]["severity"], "Healthy");
    assert_eq!(json["data_summary"], EIGHT_HOUR_SUMMARY);
    assert!(json["ai_analysis"]["summary"].is_string());
    assert!(json["ai_analysis"]["recommendation"].is_string());
    assert!(json["final_recommendation"]
        .as_str()
        .unwrap()
        .ends_with(CLOSING_SENTENCE));
}

#[tokio::test]
async fn test_report_survives_generation_failure() {
    let provider = MockLlmProvider::failing(ErrorCode::ExternalServiceUnavailable);
    let pipeline = SleepReportPipeline::new(&provider, SleepAnalysisConfig::default()).unwrap();

    let report = pipeline.run(&eight_hour_batch()).await.unwrap();

    assert!(report.ai_analysis.is_fallback());
    assert_eq!(report.data_summary, EIGHT_HOUR_SUMMARY);
    assert_eq!(
        report.final_recommendation,
        format!("{FALLBACK_RECOMMENDATION} {CLOSING_SENTENCE}")
    );
}

#[tokio::test]
async fn test_malformed_record_aborts_before_generation() {
    let provider = MockLlmProvider::replying(WELL_FORMED_NARRATIVE);
    let pipeline = SleepReportPipeline::new(&provider, SleepAnalysisConfig::default()).unwrap();

    let err = pipeline
        .run(&records(&["8h0m", "8 hours"]))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::InvalidFormat);
    assert!(err.message.contains("8 hours"));
    assert_eq!(provider.request_count(), 0);
}

#[tokio::test]
async fn test_no_usable_records_aborts() {
    let provider = MockLlmProvider::replying(WELL_FORMED_NARRATIVE);
    let pipeline = SleepReportPipeline::new(&provider, SleepAnalysisConfig::default()).unwrap();

    let err = pipeline
        .run(&[SleepRecord::default()])
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::NoUsableData);
    assert_eq!(err.message, "No valid sleep duration data found.");
    assert_eq!(provider.request_count(), 0);
}

#[tokio::test]
async fn test_short_sleeper_report() {
    let provider = MockLlmProvider::replying(WELL_FORMED_NARRATIVE);
    let pipeline = SleepReportPipeline::new(&provider, SleepAnalysisConfig::default()).unwrap();

    let report = pipeline
        .run(&records(&["6h 0m", "5h 30m", "4h 30m"]))
        .await
        .unwrap();

    // 320 minute average: 33.3% deviation
    assert_eq!(report.metrics.score, 66.7);
    assert_eq!(report.metrics.grade, SleepGrade::Moderate);
    assert_eq!(report.metrics.condition, SleepCondition::BelowRecommended);
    assert_eq!(report.metrics.deficit.severity, DeficitSeverity::Severe);
    assert_eq!(report.statistics.trend.direction, TrendDirection::Declining);
    assert_eq!(report.statistics.trend.change, "1h 30m");
    assert_eq!(report.statistics.sleep_pattern, SleepPattern::Declining);
}

#[tokio::test]
async fn test_pipeline_uses_provider_default_model() {
    let provider = MockLlmProvider::replying(WELL_FORMED_NARRATIVE);
    let pipeline = SleepReportPipeline::new(&provider, SleepAnalysisConfig::default()).unwrap();

    pipeline.run(&eight_hour_batch()).await.unwrap();

    assert_eq!(provider.requests()[0].model.as_deref(), Some(MOCK_MODEL));
}

#[test]
fn test_assess_is_deterministic() {
    let provider = MockLlmProvider::replying(WELL_FORMED_NARRATIVE);
    let pipeline = SleepReportPipeline::new(&provider, SleepAnalysisConfig::default()).unwrap();
    let batch = records(&["7h10m", "6h50m", "8h20m", "7h0m"]);

    let first = pipeline.assess(&batch).unwrap();
    let second = pipeline.assess(&batch).unwrap();

    assert_eq!(first, second);
    assert_eq!(build_data_summary(&first), build_data_summary(&second));
    assert_eq!(provider.request_count(), 0);
}

#[test]
fn test_invalid_configuration_is_rejected() {
    let provider = MockLlmProvider::replying(WELL_FORMED_NARRATIVE);
    let config = SleepAnalysisConfig {
        ideal_minutes: 0.0,
        ..SleepAnalysisConfig::default()
    };

    let err = SleepReportPipeline::new(&provider, config).err().unwrap();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);

    let settings = GenerationSettings {
        temperature: 3.5,
        ..GenerationSettings::for_report()
    };
    let err = SleepReportPipeline::with_generation_settings(
        &provider,
        SleepAnalysisConfig::default(),
        settings,
    )
    .err()
    .unwrap();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);
}
