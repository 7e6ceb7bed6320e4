//! PDF text extraction.
//!
//! The PDF engine (`pdf-extract`) only has to hand back positioned text
//! fragments page by page. Line structure is rebuilt here from the vertical
//! position of consecutive fragments, which works far better for Tamil
//! documents than the engine's own plain-text heuristics.

use super::CapabilityError;
use pdf_extract::{Document, MediaBox, OutputDev, OutputError, Transform};
use std::panic::{self, AssertUnwindSafe};
use tracing::debug;

/// Vertical displacement (in PDF units) above which two consecutive
/// fragments are considered to sit on different lines.
pub const LINE_BREAK_THRESHOLD: f64 = 5.0;

/// A run of text from one text-showing operation and the vertical position
/// of its first glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFragment {
    pub text: String,
    pub y: f64,
}

impl TextFragment {
    pub fn new(text: impl Into<String>, y: f64) -> Self {
        Self {
            text: text.into(),
            y,
        }
    }
}

/// Fragments of one page, in content-stream order.
pub type Page = Vec<TextFragment>;

/// Opaque PDF engine: decodes a document into positioned fragments.
///
/// Implementations must return pages in ascending page order.
pub trait PdfCapability {
    fn pages(&self, bytes: &[u8]) -> Result<Vec<Page>, CapabilityError>;
}

/// Rebuilds the text of a single page.
///
/// A line break is inserted whenever the vertical distance to the previous
/// fragment exceeds [`LINE_BREAK_THRESHOLD`]; otherwise fragments are
/// concatenated as-is.
pub fn page_text(fragments: &[TextFragment]) -> String {
    let mut text = String::new();
    let mut last_y: Option<f64> = None;

    for fragment in fragments {
        if let Some(y) = last_y {
            if (fragment.y - y).abs() > LINE_BREAK_THRESHOLD {
                text.push('\n');
            }
        }
        text.push_str(&fragment.text);
        last_y = Some(fragment.y);
    }

    text
}

/// Joins pages with a blank line after each one. The caller trims.
pub fn document_text(pages: &[Page]) -> String {
    let mut text = String::new();
    for page in pages {
        text.push_str(&page_text(page));
        text.push_str("\n\n");
    }
    text
}

/// Production engine backed by `pdf-extract`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtract;

impl PdfCapability for PdfExtract {
    fn pages(&self, bytes: &[u8]) -> Result<Vec<Page>, CapabilityError> {
        // pdf-extract panics on some malformed documents instead of erroring.
        panic::catch_unwind(AssertUnwindSafe(|| decode_pages(bytes))).unwrap_or_else(|_| {
            Err(CapabilityError::new(
                "pdf engine aborted while decoding the document",
            ))
        })
    }
}

fn decode_pages(bytes: &[u8]) -> Result<Vec<Page>, CapabilityError> {
    let mut doc = Document::load_mem(bytes).map_err(CapabilityError::from_display)?;
    if doc.is_encrypted() {
        doc.decrypt("").map_err(CapabilityError::from_display)?;
    }

    let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
    let mut collector = FragmentCollector::default();
    let mut pages = Vec::with_capacity(page_numbers.len());

    for number in page_numbers {
        pdf_extract::output_doc_page(&doc, &mut collector, number)
            .map_err(CapabilityError::from_display)?;
        let page = collector.take_page();
        debug!(page = number, fragments = page.len(), "decoded pdf page");
        pages.push(page);
    }

    Ok(pages)
}

/// Groups the glyphs emitted by pdf-extract into one fragment per
/// text-showing operation.
#[derive(Default)]
struct FragmentCollector {
    current: Option<TextFragment>,
    page: Page,
}

impl FragmentCollector {
    fn flush(&mut self) {
        if let Some(fragment) = self.current.take() {
            self.page.push(fragment);
        }
    }

    fn take_page(&mut self) -> Page {
        self.flush();
        std::mem::take(&mut self.page)
    }
}

impl OutputDev for FragmentCollector {
    fn begin_page(
        &mut self,
        _page_num: u32,
        _media_box: &MediaBox,
        _art_box: Option<(f64, f64, f64, f64)>,
    ) -> Result<(), OutputError> {
        self.current = None;
        self.page.clear();
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), OutputError> {
        self.flush();
        Ok(())
    }

    fn output_character(
        &mut self,
        trm: &Transform,
        _width: f64,
        _spacing: f64,
        _font_size: f64,
        char: &str,
    ) -> Result<(), OutputError> {
        match self.current.as_mut() {
            Some(fragment) => fragment.text.push_str(char),
            None => self.current = Some(TextFragment::new(char, trm.m32)),
        }
        Ok(())
    }

    fn begin_word(&mut self) -> Result<(), OutputError> {
        self.flush();
        Ok(())
    }

    fn end_word(&mut self) -> Result<(), OutputError> {
        self.flush();
        Ok(())
    }

    fn end_line(&mut self) -> Result<(), OutputError> {
        Ok(())
    }
}
