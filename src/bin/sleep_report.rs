// ABOUTME: Command-line entry point producing a sleep prediction report from a JSON file
// ABOUTME: Reads records from a file or stdin, runs the pipeline against Gemini, prints JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Sleep report generator.
//!
//! Usage:
//! ```bash
//! # Report for a file of records (GEMINI_API_KEY must be set)
//! cargo run --bin sleep-report -- sleep.json
//!
//! # Read records from stdin, single-line output
//! cat sleep.json | cargo run --bin sleep-report -- - --compact
//!
//! # Different model, debug logging on stderr
//! cargo run --bin sleep-report -- sleep.json --model gemini-2.5-pro -v
//! ```

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::AsyncReadExt;
use tracing::error;

use sleep_coach::config::{LlmConfig, SleepAnalysisConfig};
use sleep_coach::llm::GeminiProvider;
use sleep_coach::logging::LoggingConfig;
use sleep_coach::models::SleepRecord;
use sleep_coach::services::SleepReportPipeline;

#[derive(Parser)]
#[command(
    name = "sleep-report",
    about = "Sleep metrics report with a generated summary",
    long_about = "Compute sleep statistics, score and pattern from a JSON array of records \
                  ({\"total_duration\": \"7h 30m\"} or {\"average_duration\": ...}) and \
                  add a generated summary and recommendation"
)]
struct ReportArgs {
    /// JSON file of sleep records, or `-` to read stdin
    input: String,

    /// Model override (defaults to `SLEEP_COACH_MODEL` or gemini-2.5-flash)
    #[arg(long)]
    model: Option<String>,

    /// Print the report on a single line
    #[arg(long)]
    compact: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

async fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut raw = String::new();
        tokio::io::stdin()
            .read_to_string(&mut raw)
            .await
            .context("Failed to read records from stdin")?;
        Ok(raw)
    } else {
        tokio::fs::read_to_string(input)
            .await
            .with_context(|| format!("Failed to read records from {input}"))
    }
}

async fn run(args: ReportArgs) -> Result<()> {
    let mut llm_config = LlmConfig::from_env()?;
    if let Some(model) = args.model {
        llm_config.model = Some(model);
    }

    let raw = read_input(&args.input).await?;
    let records = SleepRecord::parse_batch(&raw)?;

    let provider = GeminiProvider::from_config(&llm_config);
    let pipeline = SleepReportPipeline::new(&provider, SleepAnalysisConfig::default())?;
    let report = pipeline.run(&records).await?;

    let output = if args.compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{output}");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = ReportArgs::parse();

    let mut logging = LoggingConfig::from_env();
    if args.verbose {
        logging = logging.with_level("debug");
    }
    if let Err(e) = logging.init() {
        eprintln!("Failed to initialize logging: {e}");
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Report generation failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
