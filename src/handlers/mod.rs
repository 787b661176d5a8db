pub mod analyze;
pub mod chat;
pub mod conversations;
pub mod health;
pub mod index;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index::index_page))
        .route("/health", get(health::health))
        .route("/chat", post(chat::chat))
        .route("/api/analyze", post(analyze::analyze))
        .route("/api/evaluate", post(analyze::evaluate))
        .route("/api/conversations/:id", get(conversations::get_conversation))
        .route(
            "/api/conversations/:id/analysis",
            get(conversations::get_analysis),
        )
        .with_state(state)
}
