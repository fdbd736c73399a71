use std::sync::Arc;

use crate::config::Config;
use crate::scoring::engine::ResumeScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable scorer. Default: RuleBasedScorer.
    pub scorer: Arc<dyn ResumeScorer>,
}
