//! # Document extraction
//!
//! Turns the bytes of an imported file into an [`ExtractionResult`]: a title
//! derived from the file name and the document's plain text.
//!
//! Dispatch is on the file-name extension only. The parsing engines are
//! opaque capabilities behind [`PdfCapability`] and [`WordCapability`], so
//! the line-reconstruction and placeholder rules here can be exercised
//! without real documents.
//!
//! Failure policy:
//! - an unknown extension is rejected before any byte is read;
//! - an engine failure becomes [`MinnoolError::FormatRead`] and no partial
//!   text is returned;
//! - an empty document is *not* an error: its content is replaced by a
//!   per-format placeholder and `used_placeholder` is set.

pub mod pdf;
pub mod word;

pub use pdf::{PdfCapability, PdfExtract, TextFragment};
pub use word::{DocxText, WordCapability};

use crate::error::{MinnoolError, Result};
use crate::messages;
use crate::model::ExtractionResult;
use std::fmt;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Failure reported by a parsing engine. Only its text survives, as the
/// `detail` of a [`MinnoolError::FormatRead`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct CapabilityError(String);

impl CapabilityError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self(detail.into())
    }

    pub fn from_display<E: fmt::Display>(err: E) -> Self {
        Self(err.to_string())
    }
}

/// The accepted document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    WordDocument,
}

impl DocumentFormat {
    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::WordDocument => "docx",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::WordDocument),
            _ => None,
        }
    }

    /// Detects the format from the text after the last `.` of `file_name`.
    pub fn from_file_name(file_name: &str) -> Result<Self> {
        file_name
            .rsplit_once('.')
            .and_then(|(_, ext)| Self::from_extension(ext))
            .ok_or_else(|| MinnoolError::UnsupportedFormat {
                file_name: file_name.to_string(),
            })
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => messages::PDF_EMPTY_PLACEHOLDER,
            DocumentFormat::WordDocument => messages::WORD_EMPTY_PLACEHOLDER,
        }
    }

    pub fn read_failed_message(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => messages::PDF_READ_FAILED,
            DocumentFormat::WordDocument => messages::WORD_READ_FAILED,
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Pdf => write!(f, "PDF"),
            DocumentFormat::WordDocument => write!(f, "Word"),
        }
    }
}

/// Strips the format's extension from the end of `file_name`,
/// case-insensitively. Nothing else is touched.
pub fn derive_title(file_name: &str, format: DocumentFormat) -> String {
    let suffix_len = format.extension().len() + 1;
    if file_name.len() >= suffix_len && file_name.is_char_boundary(file_name.len() - suffix_len) {
        let (stem, suffix) = file_name.split_at(file_name.len() - suffix_len);
        if suffix.eq_ignore_ascii_case(&format!(".{}", format.extension())) {
            return stem.to_string();
        }
    }
    file_name.to_string()
}

/// Format dispatcher over the two parsing engines.
#[derive(Debug, Default, Clone)]
pub struct Extractor<P = PdfExtract, W = DocxText> {
    pdf: P,
    word: W,
}

impl<P: PdfCapability, W: WordCapability> Extractor<P, W> {
    pub fn new(pdf: P, word: W) -> Self {
        Self { pdf, word }
    }

    /// Extracts title and text from `bytes`, which must be the contents of
    /// `file_name` in the given `format`.
    pub fn extract(
        &self,
        bytes: &[u8],
        format: DocumentFormat,
        file_name: &str,
    ) -> Result<ExtractionResult> {
        let read_failed = |err: CapabilityError| MinnoolError::FormatRead {
            format,
            detail: err.to_string(),
        };

        let raw = match format {
            DocumentFormat::Pdf => {
                let pages = self.pdf.pages(bytes).map_err(read_failed)?;
                debug!(file_name, pages = pages.len(), "extracted pdf");
                pdf::document_text(&pages)
            }
            DocumentFormat::WordDocument => {
                let text = self.word.raw_text(bytes).map_err(read_failed)?;
                debug!(file_name, chars = text.chars().count(), "extracted word document");
                text
            }
        };

        let trimmed = raw.trim();
        let used_placeholder = trimmed.is_empty();
        let content = if used_placeholder {
            format.placeholder().to_string()
        } else {
            trimmed.to_string()
        };

        Ok(ExtractionResult {
            title: derive_title(file_name, format),
            content,
            used_placeholder,
        })
    }

    /// Reads and extracts a file from disk. The format is checked before the
    /// file is opened.
    pub fn extract_file(&self, path: &Path) -> Result<ExtractionResult> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let format = DocumentFormat::from_file_name(&file_name)?;
        let bytes = std::fs::read(path)?;
        self.extract(&bytes, format, &file_name)
    }
}
