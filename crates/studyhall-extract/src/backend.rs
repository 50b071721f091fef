use crate::ExtractError;

/// Trait for PDF text extraction backends.
///
/// Implementors provide the low-level page-text step; format detection and
/// whitespace cleanup live in the crate root. The default implementation is
/// [`crate::LopdfBackend`]; the seam exists so a different PDF engine can be
/// swapped in without touching callers.
pub trait PdfBackend: Send + Sync {
    /// Extract the full text content of a PDF, pages in order, separated by
    /// a blank line.
    fn extract_text(&self, data: &[u8]) -> Result<String, ExtractError>;
}
