//! Completion backend trait and request/response types.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::AiError;

/// One turn in a conversation sent to the completion service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".into(),
            content: content.into(),
        }
    }
}

/// A declared response shape for structured tasks. `parameters` is a JSON
/// Schema object naming required and optional fields.
#[derive(Debug, Clone)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// A single completion request. One request per invocation; no caching or
/// deduplication; every call is independent and billed by the provider.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    /// When set, the service is forced to answer through this schema.
    pub tool: Option<ToolSchema>,
}

/// What came back: structured arguments conforming (syntactically) to the
/// requested schema, or free-form text when the service ignored the schema.
#[derive(Debug, Clone)]
pub enum CompletionOutcome {
    Structured(serde_json::Value),
    Text(String),
}

/// A completion service that can answer a [`CompletionRequest`].
pub trait CompletionBackend: Send + Sync {
    /// The canonical name of this backend (e.g., "openai", "mock").
    fn name(&self) -> &str;

    /// Send one request and await its outcome.
    fn complete<'a>(
        &'a self,
        request: &'a CompletionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CompletionOutcome, AiError>> + Send + 'a>>;
}
