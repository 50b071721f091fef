use axum::extract::Multipart;
use studyhall_core::DocumentSource;

use crate::error::ApiError;

/// Parsed form fields for a document-backed feature: a title plus either
/// pasted text or an uploaded file. A file wins when both are present.
pub struct DocumentForm {
    pub title: String,
    pub source: DocumentSource,
}

/// Parse a multipart form upload into a title and document source.
pub async fn parse_document_form(mut multipart: Multipart) -> Result<DocumentForm, ApiError> {
    let mut title = String::new();
    let mut text: Option<String> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("failed to read form field: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "title" => {
                title = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("failed to read title: {e}")))?;
            }
            "text" => {
                let val = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("failed to read text: {e}")))?;
                if !val.trim().is_empty() {
                    text = Some(val);
                }
            }
            "file" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("failed to read file data: {e}")))?
                    .to_vec();
                file = Some((filename, data));
            }
            _ => {
                // Ignore unknown fields
                let _ = field.bytes().await;
            }
        }
    }

    let source = match (file, text) {
        (Some((filename, data)), _) => DocumentSource::Upload { filename, data },
        (None, Some(text)) => DocumentSource::Text(text),
        (None, None) => {
            return Err(ApiError::bad_request(
                "provide either a file or a text field",
            ));
        }
    };

    Ok(DocumentForm { title, source })
}
