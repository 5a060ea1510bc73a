// ABOUTME: Tests for the narrative composer and its response parsing
// ABOUTME: Covers section splitting, generic recommendation, and fallback on failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(clippy::float_cmp)]
#![allow(missing_docs)]

mod helpers;

use helpers::mock_llm::{MockLlmProvider, MockReply, MOCK_MODEL};
use helpers::test_utils::{metrics_for, WELL_FORMED_NARRATIVE};
use sleep_coach::config::GenerationSettings;
use sleep_coach::constants::narrative::{
    FALLBACK_RECOMMENDATION, FALLBACK_SUMMARY, GENERIC_RECOMMENDATION,
};
use sleep_coach::errors::ErrorCode;
use sleep_coach::intelligence::{parse_narrative, NarrativeComposer, NarrativeResult};
use sleep_coach::llm::prompts::SLEEP_REPORT_SYSTEM_INSTRUCTION;
use sleep_coach::llm::MessageRole;

// ============================================================================
// Response parsing
// ============================================================================

#[test]
fn test_parse_minimal_two_section_response() {
    let narrative = parse_narrative("Summary: A\nRecommendation: B");
    assert_eq!(
        narrative,
        NarrativeResult {
            summary: "A".to_owned(),
            recommendation: "B".to_owned(),
        }
    );
}

#[test]
fn test_parse_paragraph_layout() {
    let narrative = parse_narrative(
        "\n  Summary:\nFirst paragraph.\nStill first.\n\nRecommendation:\nSecond paragraph.\n  ",
    );
    assert_eq!(narrative.summary, "First paragraph.\nStill first.");
    assert_eq!(narrative.recommendation, "Second paragraph.");
}

#[test]
fn test_parse_without_summary_header() {
    let narrative = parse_narrative("Your sleep is fine.\nRecommendation: Keep going.");
    assert_eq!(narrative.summary, "Your sleep is fine.");
    assert_eq!(narrative.recommendation, "Keep going.");
}

#[test]
fn test_missing_marker_uses_generic_recommendation() {
    let narrative = parse_narrative("  Summary: You slept 6.5 hours on average.  ");
    assert_eq!(narrative.summary, "Summary: You slept 6.5 hours on average.");
    assert_eq!(narrative.recommendation, GENERIC_RECOMMENDATION);
}

#[test]
fn test_split_happens_at_first_marker() {
    let narrative = parse_narrative("Summary: A\nRecommendation: B\nRecommendation: C");
    assert_eq!(narrative.summary, "A");
    assert_eq!(narrative.recommendation, "B\nRecommendation: C");
}

#[test]
fn test_fallback_pair() {
    let fallback = NarrativeResult::fallback();
    assert_eq!(fallback.summary, FALLBACK_SUMMARY);
    assert_eq!(fallback.recommendation, FALLBACK_RECOMMENDATION);
    assert!(fallback.is_fallback());
    assert!(!parse_narrative("Summary: A\nRecommendation: B").is_fallback());
}

// ============================================================================
// Composer
// ============================================================================

#[tokio::test]
async fn test_compose_parses_generated_text() {
    let provider = MockLlmProvider::replying(WELL_FORMED_NARRATIVE);
    let composer = NarrativeComposer::new(&provider, GenerationSettings::for_report());
    let (stats, deficit) = metrics_for(&[480, 450, 510]);

    let narrative = composer.compose(&stats, &deficit, 100.0).await;

    assert_eq!(
        narrative.summary,
        "You averaged 8.00 hours with a score of 100.0%."
    );
    assert_eq!(
        narrative.recommendation,
        "Keep your bedtime steady to protect this result."
    );
    assert_eq!(provider.request_count(), 1);
}

#[tokio::test]
async fn test_compose_sends_one_request_with_report_settings() {
    let provider = MockLlmProvider::replying(WELL_FORMED_NARRATIVE);
    let settings = GenerationSettings::for_report().with_model(MOCK_MODEL);
    let composer = NarrativeComposer::new(&provider, settings);
    let (stats, deficit) = metrics_for(&[480, 450, 510]);

    composer.compose(&stats, &deficit, 100.0).await;

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.model.as_deref(), Some(MOCK_MODEL));
    assert_eq!(request.temperature, Some(0.6));
    assert_eq!(request.max_tokens, Some(350));
    assert_eq!(
        request.system_instruction.as_deref(),
        Some(SLEEP_REPORT_SYSTEM_INSTRUCTION)
    );
    assert_eq!(request.messages.len(), 1);
    assert_eq!(request.messages[0].role, MessageRole::User);
}

#[tokio::test]
async fn test_prompt_embeds_metrics() {
    let provider = MockLlmProvider::replying(WELL_FORMED_NARRATIVE);
    let composer = NarrativeComposer::new(&provider, GenerationSettings::for_report());
    let (stats, deficit) = metrics_for(&[300, 330, 310]);

    composer.compose(&stats, &deficit, 34.0).await;

    let prompt = provider.requests()[0].messages[0].content.clone();
    assert!(prompt.contains("- Average Sleep: 5.22 hours"));
    assert!(prompt.contains("- Minimum Sleep: 5.00 hours"));
    assert!(prompt.contains("- Maximum Sleep: 5.50 hours"));
    assert!(prompt.contains("- Sleep Score: 34.0%"));
    assert!(prompt.contains("- Trend Pattern: Consistent Sleep Pattern"));
    assert!(prompt.contains("- Severity Level: Severe"));
    assert!(prompt.contains("Summary:\n<paragraph>"));
    assert!(prompt.contains("Recommendation:\n<paragraph>"));
}

#[tokio::test]
async fn test_compose_without_marker_keeps_summary() {
    let provider = MockLlmProvider::replying("You slept well this week.");
    let composer = NarrativeComposer::new(&provider, GenerationSettings::for_report());
    let (stats, deficit) = metrics_for(&[480, 470]);

    let narrative = composer.compose(&stats, &deficit, 99.0).await;

    assert_eq!(narrative.summary, "You slept well this week.");
    assert_eq!(narrative.recommendation, GENERIC_RECOMMENDATION);
}

#[tokio::test]
async fn test_compose_absorbs_provider_failures() {
    for code in [
        ErrorCode::ExternalServiceError,
        ErrorCode::ExternalServiceUnavailable,
        ErrorCode::ExternalAuthFailed,
        ErrorCode::ExternalRateLimited,
    ] {
        let provider = MockLlmProvider::failing(code);
        let composer = NarrativeComposer::new(&provider, GenerationSettings::for_report());
        let (stats, deficit) = metrics_for(&[300, 420]);

        let narrative = composer.compose(&stats, &deficit, 60.0).await;

        assert_eq!(narrative, NarrativeResult::fallback());
        assert_eq!(provider.request_count(), 1);
    }
}

#[tokio::test]
async fn test_compose_treats_blank_response_as_failure() {
    let provider = MockLlmProvider::with_replies(vec![MockReply::Text("  \n ".to_owned())]);
    let composer = NarrativeComposer::new(&provider, GenerationSettings::for_report());
    let (stats, deficit) = metrics_for(&[480]);

    let narrative = composer.compose(&stats, &deficit, 100.0).await;
    assert!(narrative.is_fallback());
}
