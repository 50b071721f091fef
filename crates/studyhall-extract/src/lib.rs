use thiserror::Error;

pub mod backend;
pub mod docx;
pub mod pdf;
pub mod text;

pub use backend::PdfBackend;
pub use pdf::LopdfBackend;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
    #[error("text extraction failed: {0}")]
    Extraction(String),
}

/// Upload formats the extractor accepts. Pasted text never passes through
/// the extractor, so there is no plain-text variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

/// Detect the format of an uploaded file from its name and magic bytes.
///
/// The declared filename alone is never trusted: a `.pdf` that doesn't start
/// with `%PDF-` is rejected, as is a `.docx` that isn't a ZIP container.
/// Anything that is not PDF or DOCX fails with [`ExtractError::UnsupportedFormat`]
/// before any extraction work happens.
pub fn detect_format(filename: &str, data: &[u8]) -> Result<DocumentFormat, ExtractError> {
    let lower = filename.to_lowercase();

    if lower.ends_with(".pdf") {
        if !data.starts_with(b"%PDF-") {
            return Err(ExtractError::Extraction(format!(
                "{filename} has a .pdf extension but is not a valid PDF"
            )));
        }
        return Ok(DocumentFormat::Pdf);
    }
    if lower.ends_with(".docx") {
        if !data.starts_with(b"PK") {
            return Err(ExtractError::Extraction(format!(
                "{filename} has a .docx extension but is not a valid DOCX container"
            )));
        }
        return Ok(DocumentFormat::Docx);
    }

    // No recognized extension: fall back to magic bytes.
    if data.starts_with(b"%PDF-") {
        return Ok(DocumentFormat::Pdf);
    }
    if data.starts_with(b"PK\x03\x04") {
        return Ok(DocumentFormat::Docx);
    }

    Err(ExtractError::UnsupportedFormat(format!(
        "{filename}: only PDF and DOCX uploads are supported"
    )))
}

/// Extract fully-materialized plain text from an uploaded document.
///
/// PDF pages are concatenated in page order, separated by a blank line.
/// DOCX paragraphs become lines; all styling is discarded. Extraction is
/// deterministic and never retried; failures surface immediately so the
/// caller can fall back to pasted text.
pub fn extract_text(data: &[u8], format: DocumentFormat) -> Result<String, ExtractError> {
    let raw = match format {
        DocumentFormat::Pdf => LopdfBackend::default().extract_text(data)?,
        DocumentFormat::Docx => docx::extract_docx_text(data)?,
    };

    let cleaned = text::normalize_whitespace(&raw);
    if cleaned.is_empty() {
        return Err(ExtractError::Extraction(
            "document contains no extractable text".into(),
        ));
    }
    Ok(cleaned)
}
