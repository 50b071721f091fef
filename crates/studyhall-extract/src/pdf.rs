use tracing::debug;

use crate::ExtractError;
use crate::backend::PdfBackend;

/// Pure-Rust PDF text extraction built on `lopdf`.
///
/// Text runs are emitted in extraction order per page; layout is not
/// reconstructed. Pages that decode to nothing (image-only scans) contribute
/// nothing, and a document where every page is empty fails upstream with an
/// extraction error.
#[derive(Default)]
pub struct LopdfBackend;

impl LopdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfBackend for LopdfBackend {
    fn extract_text(&self, data: &[u8]) -> Result<String, ExtractError> {
        let doc = lopdf::Document::load_mem(data)
            .map_err(|e| ExtractError::Extraction(format!("failed to open PDF: {e}")))?;

        if doc.is_encrypted() {
            return Err(ExtractError::Extraction(
                "PDF is password-protected".into(),
            ));
        }

        let pages = doc.get_pages();
        if pages.is_empty() {
            return Err(ExtractError::Extraction("PDF has no pages".into()));
        }

        let mut pages_text = Vec::with_capacity(pages.len());
        for (&page_number, _) in pages.iter() {
            // A single undecodable page shouldn't sink the whole document;
            // skip it and keep what the rest yields.
            match doc.extract_text(&[page_number]) {
                Ok(text) => pages_text.push(text),
                Err(e) => {
                    debug!(page = page_number, error = %e, "skipping undecodable PDF page");
                    pages_text.push(String::new());
                }
            }
        }

        Ok(pages_text.join("\n\n"))
    }
}
