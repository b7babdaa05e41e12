use std::sync::Arc;

use crate::matching::orchestrator::MatchOrchestrator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Stateless across requests; shared only to avoid rebuilding store handles.
    pub orchestrator: Arc<MatchOrchestrator>,
}
