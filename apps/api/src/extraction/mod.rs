//! Text Extractor — turns an uploaded PDF into plain text.
//!
//! Flow: write bytes to a scoped temp file → primary loader (all pages) →
//!       if nothing usable, layout reader (first 10 pages) → reject empty text.
//!
//! The temp file is a `NamedTempFile`, so it is unlinked on every exit path,
//! including early returns and unwinding.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, warn};

pub mod loaders;

use loaders::{LayoutReader, LopdfReader, PageLoader, PdfExtractLoader};

/// The layout reader never looks past this many pages.
pub const LAYOUT_PAGE_LIMIT: usize = 10;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Extracted text is empty. Ensure the PDF is not scanned.")]
    EmptyText,

    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// The layout reader could not open the document at all.
    #[error("{0}")]
    Unreadable(String),

    #[error("PDF extraction task failed: {0}")]
    Task(String),
}

/// PDF bytes in, non-empty text out.
///
/// Carried in `AppState` as `Arc<dyn TextExtractor>`.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, pdf: Bytes) -> Result<String, ExtractError>;
}

/// Two-stage extractor: `pdf-extract` first, `lopdf` as the fallback.
#[derive(Clone)]
pub struct PdfTextExtractor {
    primary: Arc<dyn PageLoader>,
    secondary: Arc<dyn LayoutReader>,
    temp_dir: Option<PathBuf>,
}

impl Default for PdfTextExtractor {
    fn default() -> Self {
        Self::with_backends(Arc::new(PdfExtractLoader), Arc::new(LopdfReader))
    }
}

impl PdfTextExtractor {
    pub fn with_backends(primary: Arc<dyn PageLoader>, secondary: Arc<dyn LayoutReader>) -> Self {
        Self {
            primary,
            secondary,
            temp_dir: None,
        }
    }

    /// Stage temp files under `dir` instead of the system temp directory.
    pub fn temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// Synchronous extraction. Call from a blocking context.
    pub fn extract_blocking(&self, pdf: &[u8]) -> Result<String, ExtractError> {
        let file = self.stage(pdf)?;

        let text = self.primary_text(file.path());
        let text = if text.trim().is_empty() {
            self.layout_text(file.path())?
        } else {
            text
        };

        file.close()?;

        if text.trim().is_empty() {
            return Err(ExtractError::EmptyText);
        }

        debug!("Extracted {} characters of resume text", text.len());
        Ok(text)
    }

    fn stage(&self, pdf: &[u8]) -> Result<NamedTempFile, ExtractError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("resume-").suffix(".pdf");

        let mut file = match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(pdf)?;
        file.flush()?;
        Ok(file)
    }

    /// All pages from the primary loader, newline-joined. Failures become empty text.
    fn primary_text(&self, path: &Path) -> String {
        match self.primary.load_pages(path) {
            Ok(pages) => {
                debug!("Primary loader read {} pages", pages.len());
                pages.join("\n")
            }
            Err(e) => {
                debug!("Primary PDF loader failed, falling back to layout reader: {e:#}");
                String::new()
            }
        }
    }

    /// At most `LAYOUT_PAGE_LIMIT` pages from the layout reader. A page that fails reads as "".
    fn layout_text(&self, path: &Path) -> Result<String, ExtractError> {
        let document = self
            .secondary
            .open(path)
            .map_err(|e| ExtractError::Unreadable(e.to_string()))?;

        let page_count = document.page_count();
        let pages: Vec<String> = (0..page_count.min(LAYOUT_PAGE_LIMIT))
            .map(|index| {
                document.page_text(index).unwrap_or_else(|e| {
                    debug!("Layout reader skipped page {}: {e:#}", index + 1);
                    String::new()
                })
            })
            .collect();

        if page_count > LAYOUT_PAGE_LIMIT {
            warn!(
                "Layout reader stopped after {LAYOUT_PAGE_LIMIT} of {page_count} pages"
            );
        }

        Ok(pages.join("\n"))
    }
}

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, pdf: Bytes) -> Result<String, ExtractError> {
        let extractor = self.clone();
        tokio::task::spawn_blocking(move || extractor.extract_blocking(&pdf))
            .await
            .map_err(|e| ExtractError::Task(e.to_string()))?
    }
}
