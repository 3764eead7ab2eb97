use std::sync::Arc;

use crate::analysis::ResumeAnalyzer;
use crate::config::Config;
use crate::extraction::TextExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
/// Nothing in here is mutated per request.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable PDF → text stage. Default: `PdfTextExtractor` (pdf-extract, then lopdf).
    pub extractor: Arc<dyn TextExtractor>,
    pub analyzer: ResumeAnalyzer,
    pub config: Config,
}
