// ABOUTME: Interactive terminal chat with the holistic life and sleep coach
// ABOUTME: Line-based REPL over stdin with streamed replies and a bounded history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Sleep coach chat.
//!
//! Usage:
//! ```bash
//! # Start a conversation (GEMINI_API_KEY must be set)
//! cargo run --bin sleep-coach-chat
//!
//! # Keep only the last 4 turns, wait for whole replies
//! cargo run --bin sleep-coach-chat -- --history-limit 4 --no-stream
//! ```
//!
//! Type `exit` to quit or `/clear` to forget the conversation so far.

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use sleep_coach::config::{ChatConfig, LlmConfig};
use sleep_coach::llm::{GeminiProvider, LlmProvider};
use sleep_coach::logging::LoggingConfig;
use sleep_coach::services::ChatSession;

#[derive(Parser)]
#[command(
    name = "sleep-coach-chat",
    about = "Chat with the holistic life and sleep coach"
)]
struct ChatArgs {
    /// Model override (defaults to `SLEEP_COACH_MODEL` or gemini-2.5-flash)
    #[arg(long)]
    model: Option<String>,

    /// Previous turns resent with each message (defaults to `SLEEP_COACH_HISTORY_LIMIT` or 10)
    #[arg(long)]
    history_limit: Option<usize>,

    /// Wait for the whole reply instead of streaming it
    #[arg(long)]
    no_stream: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn print_flush(text: &str) {
    print!("{text}");
    // A failed flush only delays output
    let _ = io::stdout().flush();
}

async fn run(args: ChatArgs) -> Result<()> {
    let mut llm_config = LlmConfig::from_env()?;
    if let Some(model) = args.model {
        llm_config.model = Some(model);
    }
    let mut chat_config = ChatConfig::from_env()?;
    if let Some(limit) = args.history_limit {
        chat_config.history_limit = limit;
    }

    let provider = GeminiProvider::from_config(&llm_config);
    // Preflight only warns; the session starts either way
    match provider.health_check().await {
        Ok(true) => info!(provider = provider.name(), "Provider reachable"),
        Ok(false) => warn!("Provider rejected the credentials check, replies may fail"),
        Err(e) => warn!(error = %e, "Provider health check failed, replies may fail"),
    }

    let mut session = ChatSession::new(&provider, &chat_config);
    info!(session_id = %session.id(), history_limit = session.history_limit(), "Chat session started");

    println!("Sleep coach started");
    println!("Type 'exit' to quit.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print_flush("You: ");
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("exit") {
            println!("Goodbye");
            break;
        }
        if input == "/clear" {
            session.clear();
            println!("History cleared.\n");
            continue;
        }

        print_flush("\nCoach: ");
        let result = if args.no_stream {
            session.send(input).await.map(|reply| print_flush(&reply))
        } else {
            session.send_streaming(input, print_flush).await.map(drop)
        };

        match result {
            Ok(()) => println!(),
            Err(e) => {
                error!(error = %e, "Coach reply failed");
                println!("Error: {e}");
            }
        }
        println!("{}", "-".repeat(60));
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = ChatArgs::parse();

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
            eprintln!("Initialization error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
