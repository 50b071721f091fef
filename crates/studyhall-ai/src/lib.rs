use thiserror::Error;

pub mod backend;
pub mod mock;
pub mod normalizer;
pub mod openai;

pub use backend::{ChatMessage, CompletionBackend, CompletionOutcome, CompletionRequest, ToolSchema};
pub use mock::{MockBackend, MockReply};
pub use normalizer::{NoteInsights, Normalizer, PaperAnalysis, PlannedTask, QuizQuestion};
pub use openai::OpenAiBackend;

#[derive(Error, Debug)]
pub enum AiError {
    /// No API credential configured. Checked before any network call.
    #[error("no completion API key configured (set STUDYHALL_API_KEY)")]
    MissingCredential,
    /// Non-2xx response from the completion service. Never retried here.
    #[error("completion service returned HTTP {status}: {message}")]
    Upstream { status: u16, message: String },
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}
