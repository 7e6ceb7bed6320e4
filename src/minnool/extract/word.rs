//! Word (.docx) raw-text extraction.
//!
//! A .docx file is a zip archive; the body lives in `word/document.xml`.
//! Only the raw text is kept: runs are concatenated, tabs and explicit breaks
//! are preserved and every paragraph ends with a blank line. Images, tables
//! styling and headers are ignored.

use super::CapabilityError;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use tracing::debug;

const DOCUMENT_PART: &str = "word/document.xml";

/// Opaque Word engine: returns the document's raw text.
pub trait WordCapability {
    fn raw_text(&self, bytes: &[u8]) -> Result<String, CapabilityError>;
}

/// Production engine backed by `zip` + `quick-xml`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxText;

impl WordCapability for DocxText {
    fn raw_text(&self, bytes: &[u8]) -> Result<String, CapabilityError> {
        let mut archive =
            zip::ZipArchive::new(Cursor::new(bytes)).map_err(CapabilityError::from_display)?;
        let mut part = archive
            .by_name(DOCUMENT_PART)
            .map_err(CapabilityError::from_display)?;

        let mut xml = String::new();
        part.read_to_string(&mut xml)
            .map_err(CapabilityError::from_display)?;
        debug!(bytes = xml.len(), "read docx body");

        body_text(&xml)
    }
}

/// Extracts raw text from the WordprocessingML body.
pub fn body_text(xml: &str) -> Result<String, CapabilityError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_run = false;
    let mut in_text_run = false;

    loop {
        match reader.read_event().map_err(CapabilityError::from_display)? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:r" => in_run = true,
                b"w:t" => in_text_run = true,
                _ => {}
            },
            // Tab stops in paragraph properties are also `w:tab`; only
            // tabs inside a run are content.
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" if in_run => text.push('\t'),
                b"w:br" | b"w:cr" if in_run => text.push('\n'),
                b"w:p" => text.push_str("\n\n"),
                _ => {}
            },
            Event::Text(e) if in_text_run => {
                let run = e.unescape().map_err(CapabilityError::from_display)?;
                text.push_str(&run);
            }
            Event::CData(e) if in_text_run => {
                text.push_str(&String::from_utf8_lossy(&e));
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:r" => in_run = false,
                b"w:t" => in_text_run = false,
                b"w:p" => text.push_str("\n\n"),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text)
}
