use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Intent, NlpOutput, Role, Sentiment, SoapNote, StructuredSummary, Utterance};
use crate::nlp::run_nlp_pipeline;
use crate::services::outputs::OutputSink;
use crate::services::validators;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    pub session_id: String,
    pub physician_reply: String,
    pub summary: StructuredSummary,
    pub sentiment: Sentiment,
    pub intent: Intent,
    pub soap_note: SoapNote,
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// "Janet Jones" -> "J. J.", so logs do not carry patient names.
pub fn mask_name(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .map(|c| format!("{c}."))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Handles one patient message: store it, reply as the physician, run the pipeline over the
/// whole conversation, check the outputs, persist them.
pub async fn process_message(
    state: &Arc<AppState>,
    session_id: Option<&str>,
    message: &str,
) -> Result<ChatTurn, AppError> {
    let message = message.trim();
    if message.is_empty() {
        tracing::warn!("empty patient message received");
        return Err(AppError::BadRequest("Empty message".to_string()));
    }

    // Load or create conversation
    let (session_id, mut conversation) = {
        let db = state.db()?;
        match session_id {
            Some(id) if queries::conversation_exists(&db, id)? => {
                (id.to_string(), queries::get_utterances(&db, id)?)
            }
            Some(id) => return Err(AppError::NotFound(format!("conversation {id}"))),
            None => {
                let id = uuid::Uuid::new_v4().to_string();
                queries::create_conversation(&db, &id)?;
                tracing::info!(session_id = %id, "started conversation");
                (id, vec![])
            }
        }
    };

    let patient_turn = Utterance::new(Role::Patient, message).with_timestamp(timestamp());
    conversation.push(patient_turn.clone());

    if !validators::validate_utterances(&conversation) {
        tracing::error!(session_id = %session_id, "conversation validation failed");
        return Err(AppError::BadRequest("Invalid conversation format".to_string()));
    }

    {
        let db = state.db()?;
        queries::append_utterance(&db, &session_id, &patient_turn)?;
    }

    let physician_reply = state
        .replies
        .reply(&conversation, message)
        .await
        .map_err(|e| AppError::Reply(format!("{e:#}")))?;

    let physician_turn =
        Utterance::new(Role::Physician, physician_reply.clone()).with_timestamp(timestamp());
    {
        let db = state.db()?;
        queries::append_utterance(&db, &session_id, &physician_turn)?;
    }
    conversation.push(physician_turn);

    let output = run_nlp_pipeline(&conversation, &state.lexicon, state.config.max_keywords);
    check_outputs(&output)?;

    let patient = if state.config.mask_patient_names {
        mask_name(&output.summary.patient_name)
    } else {
        output.summary.patient_name.clone()
    };
    tracing::info!(
        session_id = %session_id,
        turns = conversation.len(),
        patient = %patient,
        sentiment = %output.sentiment,
        intent = %output.intent,
        "nlp pipeline executed"
    );

    {
        let db = state.db()?;
        queries::save_analysis(&db, &session_id, &output)?;
    }

    if state.config.save_outputs {
        let sink = OutputSink::new(&state.config.output_dir);
        sink.save_conversation(&conversation)
            .and_then(|_| sink.save_outputs(&output))
            .map_err(|e| AppError::Storage(format!("{e:#}")))?;
    }

    Ok(ChatTurn {
        session_id,
        physician_reply,
        summary: output.summary,
        sentiment: output.sentiment,
        intent: output.intent,
        soap_note: output.soap_note,
    })
}

/// Runs the consumer-side validators over a pipeline result.
pub fn check_outputs(output: &NlpOutput) -> Result<(), AppError> {
    let summary =
        serde_json::to_value(&output.summary).map_err(|e| AppError::Internal(e.to_string()))?;
    if !validators::validate_structured_summary(&summary) {
        return Err(AppError::InvalidOutput("Invalid summary output".to_string()));
    }

    if !validators::validate_sentiment_intent(output.sentiment.as_str(), output.intent.as_str()) {
        return Err(AppError::InvalidOutput("Invalid sentiment output".to_string()));
    }

    let soap =
        serde_json::to_value(&output.soap_note).map_err(|e| AppError::Internal(e.to_string()))?;
    if !validators::validate_soap_note(&soap) {
        return Err(AppError::InvalidOutput("Invalid SOAP output".to_string()));
    }

    Ok(())
}
