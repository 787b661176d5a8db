use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{StoredAnalysis, Utterance};
use crate::state::AppState;

#[derive(Serialize)]
pub struct ConversationResponse {
    pub session_id: String,
    pub utterances: Vec<Utterance>,
}

// GET /api/conversations/:id
pub async fn get_conversation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ConversationResponse>, AppError> {
    let db = state.db()?;
    if !queries::conversation_exists(&db, &id)? {
        return Err(AppError::NotFound(format!("conversation {id}")));
    }
    let utterances = queries::get_utterances(&db, &id)?;

    Ok(Json(ConversationResponse {
        session_id: id,
        utterances,
    }))
}

// GET /api/conversations/:id/analysis
pub async fn get_analysis(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<StoredAnalysis>, AppError> {
    let db = state.db()?;
    queries::latest_analysis(&db, &id)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("analysis for conversation {id}")))
}
