use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::{NlpOutput, RawUtterance};
use crate::nlp::{run_nlp_pipeline, run_transcript_pipeline};
use crate::services::conversation::check_outputs;
use crate::services::evaluation::{evaluate_output, EvaluationReport};
use crate::services::validators;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(untagged)]
pub enum AnalyzeRequest {
    Transcript { transcript: String },
    Conversation { conversation: Vec<RawUtterance> },
}

// POST /api/analyze
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<NlpOutput>, AppError> {
    let max_keywords = state.config.max_keywords;
    let output = match payload {
        AnalyzeRequest::Transcript { transcript } => {
            run_transcript_pipeline(&transcript, &state.lexicon, max_keywords)
        }
        AnalyzeRequest::Conversation { conversation } => {
            let conversation =
                validators::validate_conversation(&conversation).map_err(AppError::BadRequest)?;
            run_nlp_pipeline(&conversation, &state.lexicon, max_keywords)
        }
    };
    check_outputs(&output)?;

    tracing::info!(
        sentiment = %output.sentiment,
        intent = %output.intent,
        "analyzed conversation"
    );
    Ok(Json(output))
}

#[derive(Deserialize)]
pub struct EvaluateRequest {
    pub predicted: Value,
    pub reference: Value,
}

// POST /api/evaluate
pub async fn evaluate(Json(payload): Json<EvaluateRequest>) -> Json<EvaluationReport> {
    Json(evaluate_output(&payload.predicted, &payload.reference))
}
