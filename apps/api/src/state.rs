use std::sync::Arc;

use crate::config::Config;
use crate::history::store::HistoryStore;
use crate::llm_client::Generator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Text and image provider. Default: `LlmClient` (Gemini).
    pub generator: Arc<dyn Generator>,
    /// Saved generations. Default: `PgHistoryStore`.
    pub history: Arc<dyn HistoryStore>,
}
