// ABOUTME: Conversational sleep coach session with a bounded trailing history window
// ABOUTME: Resends recent turns with each message and records replies only on success
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::VecDeque;

use futures_util::StreamExt;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::config::{ChatConfig, GenerationSettings};
use crate::errors::{AppError, AppResult};
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};

/// One coach conversation.
///
/// At most `history_limit` previous turns are kept and resent; the oldest are
/// evicted first. A failed exchange leaves the history untouched.
pub struct ChatSession<'a> {
    id: Uuid,
    provider: &'a dyn LlmProvider,
    settings: GenerationSettings,
    history: VecDeque<ChatMessage>,
    history_limit: usize,
}

impl<'a> ChatSession<'a> {
    /// Start a session with the chat generation preset and the provider's
    /// default model
    #[must_use]
    pub fn new(provider: &'a dyn LlmProvider, config: &ChatConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            provider,
            settings: GenerationSettings::for_chat().with_model(provider.default_model()),
            history: VecDeque::with_capacity(config.history_limit),
            history_limit: config.history_limit,
        }
    }

    /// Replace the generation settings
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` if the settings fail validation.
    pub fn with_settings(mut self, settings: GenerationSettings) -> AppResult<Self> {
        settings.validate()?;
        self.settings = settings;
        Ok(self)
    }

    /// Session identifier, used to correlate log lines
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Turns that will be resent with the next message, oldest first
    #[must_use]
    pub const fn history(&self) -> &VecDeque<ChatMessage> {
        &self.history
    }

    /// Maximum number of retained turns
    #[must_use]
    pub const fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Forget all previous turns
    pub fn clear(&mut self) {
        self.history.clear();
    }

    fn build_request(&self, user_input: &str) -> AppResult<ChatRequest> {
        if user_input.trim().is_empty() {
            return Err(AppError::invalid_input("Message must not be empty"));
        }
        let mut messages: Vec<ChatMessage> = self.history.iter().cloned().collect();
        messages.push(ChatMessage::user(user_input));
        Ok(ChatRequest::from_settings(messages, &self.settings))
    }

    fn record_exchange(&mut self, user_input: &str, reply: &str) {
        self.history.push_back(ChatMessage::user(user_input));
        self.history.push_back(ChatMessage::assistant(reply));
        while self.history.len() > self.history_limit {
            self.history.pop_front();
        }
    }

    /// Send a message and wait for the full reply
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` for a blank message, or the provider error if
    /// generation fails.
    #[instrument(skip_all, fields(session_id = %self.id, history = self.history.len()))]
    pub async fn send(&mut self, user_input: &str) -> AppResult<String> {
        let request = self.build_request(user_input)?;
        let response = self.provider.complete(&request).await?;

        debug!(chars = response.content.len(), "Coach reply received");
        self.record_exchange(user_input, &response.content);
        Ok(response.content)
    }

    /// Send a message, passing each text delta to `on_delta` as it arrives
    ///
    /// The concatenated reply is recorded and returned once the stream ends.
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` for a blank message, or the provider error if
    /// the stream cannot start or breaks part way. Partial replies are not
    /// recorded.
    #[instrument(skip_all, fields(session_id = %self.id, history = self.history.len()))]
    pub async fn send_streaming<F>(&mut self, user_input: &str, mut on_delta: F) -> AppResult<String>
    where
        F: FnMut(&str) + Send,
    {
        let request = self.build_request(user_input)?;
        let mut stream = self.provider.complete_stream(&request).await?;

        let mut reply = String::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            if !chunk.delta.is_empty() {
                on_delta(&chunk.delta);
                reply.push_str(&chunk.delta);
            }
            if chunk.is_final {
                break;
            }
        }

        debug!(chars = reply.len(), "Streamed coach reply complete");
        self.record_exchange(user_input, &reply);
        Ok(reply)
    }
}
