use std::sync::Arc;

use crate::application::session::ConnectionHandler;

/// Shared state for the axum handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Runs every WebSocket session against the shared pipeline.
    pub handler: Arc<ConnectionHandler>,
    /// Logical name of the loaded model, reported by the health route.
    pub model_name: Arc<str>,
    /// Largest inbound WebSocket message accepted.
    pub max_frame_bytes: usize,
}
