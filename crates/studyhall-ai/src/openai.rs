//! OpenAI-compatible `/chat/completions` backend.

use std::future::Future;
use std::pin::Pin;

use serde_json::{Value, json};
use tracing::debug;

use crate::AiError;
use crate::backend::{CompletionBackend, CompletionOutcome, CompletionRequest};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Backend speaking the OpenAI chat-completions wire format. Structured
/// tasks are requested via forced function calling; the service may still
/// answer with plain text, which callers must treat as "not generated".
pub struct OpenAiBackend {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl OpenAiBackend {
    pub fn new(api_key: Option<String>, base_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.filter(|k| !k.is_empty()),
            base_url: base_url
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    fn build_body(request: &CompletionRequest) -> Value {
        let mut body = json!({
            "model": request.model,
            "messages": request.messages,
        });
        if let Some(tool) = &request.tool {
            body["tools"] = json!([{
                "type": "function",
                "function": {
                    "name": tool.name,
                    "description": tool.description,
                    "parameters": tool.parameters,
                },
            }]);
            body["tool_choice"] = json!({
                "type": "function",
                "function": { "name": tool.name },
            });
        }
        body
    }
}

impl CompletionBackend for OpenAiBackend {
    fn name(&self) -> &str {
        "openai"
    }

    fn complete<'a>(
        &'a self,
        request: &'a CompletionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CompletionOutcome, AiError>> + Send + 'a>> {
        Box::pin(async move {
            // Fail before touching the network when unconfigured.
            let api_key = self.api_key.as_deref().ok_or(AiError::MissingCredential)?;

            let body = Self::build_body(request);
            let resp = self
                .client
                .post(format!("{}/chat/completions", self.base_url))
                .header("Authorization", format!("Bearer {api_key}"))
                .json(&body)
                .send()
                .await?;

            let status = resp.status();
            if !status.is_success() {
                let message = resp.text().await.unwrap_or_default();
                return Err(AiError::Upstream {
                    status: status.as_u16(),
                    message,
                });
            }

            let data: Value = resp.json().await?;
            Ok(parse_outcome(&data))
        })
    }
}

/// Pull either the forced tool-call arguments or the plain message content
/// out of a chat-completions response. Anything unexpected degrades to
/// empty text so callers fall back to placeholder values.
fn parse_outcome(data: &Value) -> CompletionOutcome {
    let message = &data["choices"][0]["message"];

    if let Some(arguments) = message["tool_calls"][0]["function"]["arguments"].as_str() {
        match serde_json::from_str::<Value>(arguments) {
            Ok(value) => return CompletionOutcome::Structured(value),
            Err(e) => {
                debug!(error = %e, "tool-call arguments were not valid JSON");
            }
        }
    }

    let content = message["content"].as_str().unwrap_or_default();
    CompletionOutcome::Text(content.to_string())
}
