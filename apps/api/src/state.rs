use std::sync::Arc;

use crate::config::Config;
use crate::extraction::TextExtractor;
use crate::scoring::CandidateScorer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable document decoder. Default: DocumentTextExtractor.
    pub text_extractor: Arc<dyn TextExtractor>,
    /// Pluggable scorer. Default: WeightedMatchScorer.
    pub scorer: Arc<dyn CandidateScorer>,
}
