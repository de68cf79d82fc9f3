use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::extraction::extractor::Extractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Built once at startup; wraps the chat backend and the rendered prompt.
    pub extractor: Arc<Extractor>,
    /// Cancelled on shutdown. Handlers hand a child token to each extraction.
    pub shutdown: CancellationToken,
}
