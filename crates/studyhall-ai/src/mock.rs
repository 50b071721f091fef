//! Mock completion backend for tests and offline development.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::AiError;
use crate::backend::{CompletionBackend, CompletionOutcome, CompletionRequest};

/// A configurable canned reply for [`MockBackend`].
#[derive(Clone, Debug)]
pub enum MockReply {
    /// Simulate a structured (tool-call) response.
    Structured(serde_json::Value),
    /// Simulate the service answering with free text instead of the schema.
    Text(String),
    /// Simulate a non-2xx response.
    Upstream { status: u16, message: String },
}

/// A hand-rolled mock implementing [`CompletionBackend`].
///
/// Supports a fixed reply or a sequence of replies (repeating the last one
/// when exhausted), plus call counting so tests can assert that no network
/// call would have happened.
pub struct MockBackend {
    replies: Mutex<Vec<MockReply>>,
    fallback: MockReply,
    call_count: AtomicUsize,
}

impl MockBackend {
    /// Create a mock that always returns `reply`.
    pub fn new(reply: MockReply) -> Self {
        Self {
            replies: Mutex::new(Vec::new()),
            fallback: reply,
            call_count: AtomicUsize::new(0),
        }
    }

    /// Create a mock that returns replies in order, repeating the last one.
    pub fn with_sequence(mut replies: Vec<MockReply>) -> Self {
        assert!(!replies.is_empty(), "sequence must have at least one reply");
        replies.reverse();
        let fallback = replies.first().cloned().unwrap();
        Self {
            replies: Mutex::new(replies),
            fallback,
            call_count: AtomicUsize::new(0),
        }
    }

    /// How many times `complete()` has been called.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    fn next_reply(&self) -> MockReply {
        let mut seq = self.replies.lock().unwrap();
        seq.pop().unwrap_or_else(|| self.fallback.clone())
    }
}

impl CompletionBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    fn complete<'a>(
        &'a self,
        _request: &'a CompletionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CompletionOutcome, AiError>> + Send + 'a>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        let reply = self.next_reply();

        Box::pin(async move {
            match reply {
                MockReply::Structured(value) => Ok(CompletionOutcome::Structured(value)),
                MockReply::Text(text) => Ok(CompletionOutcome::Text(text)),
                MockReply::Upstream { status, message } => {
                    Err(AiError::Upstream { status, message })
                }
            }
        })
    }
}
