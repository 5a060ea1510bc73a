// ABOUTME: System prompts and prompt templates for sleep coach LLM interactions
// ABOUTME: Holds the coach conversation prompt and the report narrative template
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # System Prompts
//!
//! Prompts for LLM interactions. The long-form coach prompt is loaded at
//! compile time from markdown for easy maintenance.

use std::fmt::Write;

use crate::intelligence::{DeficitSeverity, SleepStatistics};

/// Holistic life and sleep coach system prompt used by chat sessions
pub const SLEEP_COACH_SYSTEM_PROMPT: &str = include_str!("sleep_coach_system.md");

/// System instruction sent with every report narrative request
pub const SLEEP_REPORT_SYSTEM_INSTRUCTION: &str =
    "You must personalize output using numeric values provided. Avoid generic statements.";

/// Get the system prompt for the sleep coach conversation
#[must_use]
pub const fn get_sleep_coach_system_prompt() -> &'static str {
    SLEEP_COACH_SYSTEM_PROMPT
}

const TASK_INSTRUCTIONS: &str = "\
TASK:

1. Write a professional Summary paragraph (2-4 sentences).
   - Mention actual numeric values (like sleep score or hours).
   - Explain health impact.
   - Adjust tone based on severity.

2. Write a Recommendation paragraph (2-4 sentences).
   - Personalize advice based on severity and trend.
   - If severe, use a strong corrective tone.
   - If improving, use an encouraging tone.
   - If healthy, use a reinforcing tone.
   - Use natural paragraph style (NOT bullet points).

FORMAT:

Summary:
<paragraph>

Recommendation:
<paragraph>
";

/// Render the report narrative prompt for one set of statistics
#[must_use]
pub fn build_sleep_report_prompt(
    stats: &SleepStatistics,
    severity: DeficitSeverity,
    score: f64,
) -> String {
    let mut prompt = String::from("You are an intelligent adaptive sleep health coach.\n\n");

    // Writing into a String cannot fail
    let _ = writeln!(prompt, "User Sleep Data:");
    let _ = writeln!(
        prompt,
        "- Average Sleep: {:.2} hours",
        stats.average_minutes / 60.0
    );
    let _ = writeln!(
        prompt,
        "- Minimum Sleep: {:.2} hours",
        f64::from(stats.min_minutes) / 60.0
    );
    let _ = writeln!(
        prompt,
        "- Maximum Sleep: {:.2} hours",
        f64::from(stats.max_minutes) / 60.0
    );
    let _ = writeln!(prompt, "- Sleep Score: {score:.1}%");
    let _ = writeln!(prompt, "- Trend Pattern: {}", stats.pattern);
    let _ = writeln!(prompt, "- Severity Level: {severity}");
    prompt.push('\n');
    prompt.push_str(TASK_INSTRUCTIONS);

    prompt
}
