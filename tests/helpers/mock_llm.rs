// ABOUTME: Scripted LlmProvider double for narrative, pipeline and chat tests
// ABOUTME: Replays canned replies or failures in order and records every request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use sleep_coach::errors::{AppError, ErrorCode};
use sleep_coach::llm::{ChatRequest, ChatResponse, ChatStream, LlmProvider, StreamChunk};

pub const MOCK_MODEL: &str = "mock-model";

/// One scripted outcome
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Successful reply
    Text(String),
    /// Successful reply delivered as several stream chunks
    Chunks(Vec<String>),
    /// Stream yields these chunks and then breaks
    BrokenStream(Vec<String>),
    /// Request fails with this code
    Fail(ErrorCode),
}

/// Provider that replays scripted replies; the last reply repeats once the
/// script runs out
pub struct MockLlmProvider {
    replies: Mutex<VecDeque<MockReply>>,
    last: Mutex<Option<MockReply>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockLlmProvider {
    pub fn with_replies(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            last: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::with_replies(vec![MockReply::Text(text.to_owned())])
    }

    pub fn failing(code: ErrorCode) -> Self {
        Self::with_replies(vec![MockReply::Fail(code)])
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn next_reply(&self, request: &ChatRequest) -> MockReply {
        self.requests.lock().unwrap().push(request.clone());
        let mut last = self.last.lock().unwrap();
        if let Some(reply) = self.replies.lock().unwrap().pop_front() {
            *last = Some(reply.clone());
            return reply;
        }
        last.clone()
            .unwrap_or_else(|| MockReply::Fail(ErrorCode::InternalError))
    }

    fn response(content: String) -> ChatResponse {
        ChatResponse {
            content,
            model: MOCK_MODEL.to_owned(),
            usage: None,
            finish_reason: Some("STOP".to_owned()),
        }
    }

    fn failure(code: ErrorCode) -> AppError {
        AppError::new(code, "scripted failure")
    }
}

#[async_trait]
impl LlmProvider for MockLlmProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn default_model(&self) -> &str {
        MOCK_MODEL
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        match self.next_reply(request) {
            MockReply::Text(text) => Ok(Self::response(text)),
            MockReply::Chunks(chunks) => Ok(Self::response(chunks.concat())),
            MockReply::BrokenStream(_) => Err(Self::failure(ErrorCode::ExternalServiceUnavailable)),
            MockReply::Fail(code) => Err(Self::failure(code)),
        }
    }

    async fn complete_stream(&self, request: &ChatRequest) -> Result<ChatStream, AppError> {
        let items: Vec<Result<StreamChunk, AppError>> = match self.next_reply(request) {
            MockReply::Text(text) => vec![Ok(StreamChunk {
                delta: text,
                is_final: true,
                finish_reason: Some("STOP".to_owned()),
            })],
            MockReply::Chunks(chunks) => {
                let count = chunks.len();
                chunks
                    .into_iter()
                    .enumerate()
                    .map(|(i, delta)| {
                        let is_final = i + 1 == count;
                        Ok(StreamChunk {
                            delta,
                            is_final,
                            finish_reason: is_final.then(|| "STOP".to_owned()),
                        })
                    })
                    .collect()
            }
            MockReply::BrokenStream(chunks) => {
                let mut items: Vec<_> = chunks
                    .into_iter()
                    .map(|delta| {
                        Ok(StreamChunk {
                            delta,
                            is_final: false,
                            finish_reason: None,
                        })
                    })
                    .collect();
                items.push(Err(Self::failure(ErrorCode::ExternalServiceUnavailable)));
                items
            }
            MockReply::Fail(code) => return Err(Self::failure(code)),
        };
        Ok(Box::pin(tokio_stream::iter(items)) as ChatStream)
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(true)
    }
}
