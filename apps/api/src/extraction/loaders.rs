//! The two PDF text backends behind the extraction fallback.
//!
//! Both PDF libraries can panic on hostile input, so every call into them is
//! wrapped in `catch_unwind` and surfaced as an ordinary error.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;

use anyhow::{anyhow, Result};

use crate::errors::panic_message;

/// Primary backend: loads the whole document as a list of page texts.
pub trait PageLoader: Send + Sync {
    fn load_pages(&self, path: &Path) -> Result<Vec<String>>;
}

/// Secondary backend: opens a document whose pages are read one at a time.
pub trait LayoutReader: Send + Sync {
    fn open(&self, path: &Path) -> Result<Box<dyn LayoutDocument>>;
}

/// An opened document. Pages are addressed by zero-based index in page order.
pub trait LayoutDocument {
    fn page_count(&self) -> usize;
    fn page_text(&self, index: usize) -> Result<String>;
}

/// General-purpose loader backed by `pdf-extract`.
pub struct PdfExtractLoader;

impl PageLoader for PdfExtractLoader {
    fn load_pages(&self, path: &Path) -> Result<Vec<String>> {
        guarded(|| pdf_extract::extract_text_by_pages(path).map_err(|e| anyhow!("{e}")))
    }
}

/// Per-page extractor backed by `lopdf`.
pub struct LopdfReader;

impl LayoutReader for LopdfReader {
    fn open(&self, path: &Path) -> Result<Box<dyn LayoutDocument>> {
        let doc = guarded(|| lopdf::Document::load(path).map_err(|e| anyhow!("{e}")))?;
        // BTreeMap keys are page numbers, so this is page order
        let pages = doc.get_pages().keys().copied().collect();
        Ok(Box::new(LopdfDocument { doc, pages }))
    }
}

struct LopdfDocument {
    doc: lopdf::Document,
    pages: Vec<u32>,
}

impl LayoutDocument for LopdfDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, index: usize) -> Result<String> {
        let page_number = *self
            .pages
            .get(index)
            .ok_or_else(|| anyhow!("page index {index} out of range"))?;
        guarded(|| {
            self.doc
                .extract_text(&[page_number])
                .map_err(|e| anyhow!("{e}"))
        })
    }
}

/// Runs `f`, turning a panic into an error carrying the panic message.
fn guarded<T>(f: impl FnOnce() -> Result<T>) -> Result<T> {
    catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
        Err(anyhow!("PDF parser panicked: {}", panic_message(&*payload)))
    })
}
