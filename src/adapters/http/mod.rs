pub mod routes;
pub mod state;
pub mod ws;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::adapters::http::state::HttpState;
use crate::adapters::http::ws::ws_handler;

/// Path of the frame-streaming WebSocket.
pub const WS_PATH: &str = "/ws";

pub fn router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(routes::health))
        .route("/api/categories", get(routes::list_categories))
        .route(WS_PATH, get(ws_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
