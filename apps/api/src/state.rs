use std::sync::Arc;

use crate::llm_client::ReasoningBackend;
use crate::policy::PolicyStore;

/// Shared application state injected into all route handlers via Axum
/// extractors. The policy store is the only data the service holds, and it
/// is immutable after load, so no locking anywhere.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable reasoning backend. Production: `GeminiClient`.
    pub reasoning: Arc<dyn ReasoningBackend>,
    pub store: Arc<PolicyStore>,
}
