//! Feature orchestrators for the study assistant.
//!
//! Each orchestrator is a sequential pipeline: validate inputs, optionally
//! extract text from an upload, call the AI normalizer, persist through the
//! store, and hand the stored record back. Stages never overlap; a
//! persistence failure after successful normalization discards the generated
//! result (each row write is a single indivisible operation, so no partial
//! state is left behind).

use thiserror::Error;

pub mod chat;
pub mod config;
pub mod ingest;
pub mod notes;
pub mod papers;
pub mod planner;
pub mod profile;
pub mod quizzes;

pub use ingest::DocumentSource;

// Re-export the layer types callers compose with.
pub use studyhall_ai::{
    AiError, ChatMessage, CompletionBackend, MockBackend, MockReply, Normalizer, NoteInsights,
    OpenAiBackend, PaperAnalysis, PlannedTask, QuizQuestion,
};
pub use studyhall_extract::{DocumentFormat, ExtractError};
pub use studyhall_store::{
    ChatSession, Note, NoteUpdate, PastPaper, Profile, Quiz, Store, StoreError, StudyPlan,
    StudyTask,
};

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Ai(#[from] AiError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// The identity a request acts as. Passed explicitly into every orchestrator
/// call; there is no ambient auth state. Authentication itself happens
/// upstream (external provider); this is the already-verified identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    pub user_id: String,
}

impl UserContext {
    pub fn new(user_id: impl Into<String>) -> Result<Self, Error> {
        let user_id = user_id.into();
        if user_id.trim().is_empty() {
            return Err(Error::InvalidInput("user identity is empty".into()));
        }
        Ok(Self { user_id })
    }
}

pub(crate) fn require_nonempty(value: &str, what: &str) -> Result<String, Error> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput(format!("{what} must not be empty")));
    }
    Ok(trimmed.to_string())
}
