//! Resolving feature input into plain study text.

use studyhall_extract::{detect_format, extract_text};
use tracing::debug;

use crate::Error;

/// Where a feature's study text comes from: pasted directly, or an uploaded
/// binary document that needs extraction first.
#[derive(Debug, Clone)]
pub enum DocumentSource {
    Text(String),
    Upload { filename: String, data: Vec<u8> },
}

impl DocumentSource {
    /// Materialize plain text. Format checking happens before any extraction
    /// work, and extraction happens before any network call is attempted, so
    /// an unsupported upload never reaches the completion service.
    pub fn into_text(self) -> Result<String, Error> {
        match self {
            DocumentSource::Text(text) => {
                let trimmed = text.trim().to_string();
                if trimmed.is_empty() {
                    return Err(Error::InvalidInput("study text must not be empty".into()));
                }
                Ok(trimmed)
            }
            DocumentSource::Upload { filename, data } => {
                let format = detect_format(&filename, &data)?;
                debug!(filename = %filename, ?format, bytes = data.len(), "extracting uploaded document");
                Ok(extract_text(&data, format)?)
            }
        }
    }
}
