use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::ExtractError;

/// Flatten a DOCX file to raw paragraph text.
///
/// A DOCX is a ZIP container; the body lives in `word/document.xml`. Each
/// `<w:p>` paragraph becomes one line, `<w:tab/>` becomes a tab, `<w:br/>` a
/// line break. All styling is discarded.
pub fn extract_docx_text(data: &[u8]) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))
        .map_err(|e| ExtractError::Extraction(format!("failed to open DOCX container: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|_| ExtractError::Extraction("DOCX is missing word/document.xml".into()))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractError::Extraction(format!("failed to read document body: {e}")))?;

    flatten_document_xml(&xml)
}

fn flatten_document_xml(xml: &str) -> Result<String, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_text_run = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if e.local_name().as_ref() == b"t" {
                    in_text_run = true;
                }
            }
            Ok(Event::Text(t)) => {
                if in_text_run {
                    let text = t
                        .unescape()
                        .map_err(|e| ExtractError::Extraction(format!("bad XML text: {e}")))?;
                    out.push_str(&text);
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text_run = false,
                b"p" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"tab" => out.push('\t'),
                b"br" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractError::Extraction(format!(
                    "malformed document XML: {e}"
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn build_docx(document_xml: &str) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut writer = zip::ZipWriter::new(Cursor::new(&mut buf));
            writer
                .start_file("word/document.xml", SimpleFileOptions::default())
                .unwrap();
            writer.write_all(document_xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        buf
    }

    const BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Cell division has two phases.</w:t></w:r></w:p>
    <w:p><w:r><w:t>Mitosis</w:t></w:r><w:r><w:t xml:space="preserve"> and meiosis.</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    #[test]
    fn paragraphs_become_lines() {
        let data = build_docx(BODY);
        let text = extract_docx_text(&data).unwrap();
        let lines: Vec<&str> = text.lines().filter(|l| !l.is_empty()).collect();
        assert_eq!(lines[0], "Cell division has two phases.");
        assert_eq!(lines[1], "Mitosis and meiosis.");
    }

    #[test]
    fn missing_document_part_fails() {
        let mut buf = Vec::new();
        {
            let mut writer = zip::ZipWriter::new(Cursor::new(&mut buf));
            writer
                .start_file("word/other.xml", SimpleFileOptions::default())
                .unwrap();
            writer.write_all(b"<x/>").unwrap();
            writer.finish().unwrap();
        }
        let err = extract_docx_text(&buf).unwrap_err();
        assert!(err.to_string().contains("document.xml"));
    }

    #[test]
    fn not_a_zip_fails() {
        let err = extract_docx_text(b"PK but not really a zip").unwrap_err();
        assert!(matches!(err, ExtractError::Extraction(_)));
    }
}
