use std::sync::Arc;

use crate::config::Config;
use crate::history::AnalysisHistory;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable model backend. Default: Gemini `LlmClient`; tests inject a stub.
    pub generator: Arc<dyn TextGenerator>,
    pub history: Arc<AnalysisHistory>,
    pub config: Config,
}
