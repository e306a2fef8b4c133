use std::sync::Arc;

use crate::llm_client::AiGateway;
use crate::sessions::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Production: `LlmClient`. Tests swap in a scripted gateway.
    pub gateway: Arc<dyn AiGateway>,
    pub sessions: SessionStore,
}
