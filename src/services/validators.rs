//! Shape checks on pipeline input and output. These gate what the HTTP layer accepts
//! and returns; the pipeline itself never fails.

use serde_json::Value;

use crate::models::{RawUtterance, Role, Sentiment, Utterance, SOAP_SECTIONS, SUMMARY_REQUIRED_FIELDS};

/// Converts raw entries into utterances. Every entry needs a known role and non-blank text.
pub fn validate_conversation(entries: &[RawUtterance]) -> Result<Vec<Utterance>, String> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let role = entry
                .role
                .as_deref()
                .and_then(Role::parse)
                .ok_or_else(|| format!("entry {i}: role must be Patient or Physician"))?;
            let text = entry
                .text
                .as_deref()
                .filter(|t| !t.trim().is_empty())
                .ok_or_else(|| format!("entry {i}: text must be a non-empty string"))?;
            Ok(Utterance {
                role,
                text: text.to_string(),
                timestamp: entry.timestamp.clone(),
            })
        })
        .collect()
}

/// Rejects stored turns with blank text.
pub fn validate_utterances(conversation: &[Utterance]) -> bool {
    conversation.iter().all(|u| !u.text.trim().is_empty())
}

pub fn validate_structured_summary(summary: &Value) -> bool {
    let Some(obj) = summary.as_object() else {
        return false;
    };
    SUMMARY_REQUIRED_FIELDS.iter().all(|f| obj.contains_key(*f))
}

pub fn validate_sentiment_intent(sentiment: &str, intent: &str) -> bool {
    Sentiment::LABELS.iter().any(|label| *label == sentiment) && !intent.trim().is_empty()
}

pub fn validate_soap_note(soap_note: &Value) -> bool {
    let Some(obj) = soap_note.as_object() else {
        return false;
    };
    SOAP_SECTIONS.iter().all(|(section, fields)| {
        obj.get(*section)
            .and_then(Value::as_object)
            .map(|body| fields.iter().all(|f| body.contains_key(*f)))
            .unwrap_or(false)
    })
}
