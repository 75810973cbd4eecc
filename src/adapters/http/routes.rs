use axum::{extract::State, response::IntoResponse, Json};

use crate::adapters::http::state::HttpState;
use crate::application::dto::{CategoryEntry, HealthResponse};

pub async fn health(State(st): State<HttpState>) -> impl IntoResponse {
    Json(HealthResponse { status: "ok".into(), model: st.model_name.to_string() })
}

pub async fn list_categories(State(st): State<HttpState>) -> impl IntoResponse {
    let table = st.handler.pipeline().aggregator().table();
    Json(table.classes().map(CategoryEntry::from).collect::<Vec<_>>())
}
