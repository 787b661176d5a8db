//! Interpretable scores comparing pipeline output with a reference annotation.

use serde::Serialize;
use serde_json::Value;

use crate::models::{SOAP_SECTIONS, SUMMARY_REQUIRED_FIELDS};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SummaryEvaluation {
    pub field_coverage: f64,
    pub exact_match_count: usize,
    pub total_fields: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SentimentIntentEvaluation {
    pub sentiment_correct: bool,
    pub intent_correct: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SoapEvaluation {
    pub section_completeness: f64,
    pub all_sections_present: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EvaluationReport {
    pub summary: SummaryEvaluation,
    pub sentiment_intent: SentimentIntentEvaluation,
    pub soap: SoapEvaluation,
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

pub fn evaluate_structured_summary(predicted: &Value, reference: &Value) -> SummaryEvaluation {
    let total = SUMMARY_REQUIRED_FIELDS.len();
    let covered = SUMMARY_REQUIRED_FIELDS
        .iter()
        .filter(|f| predicted.get(**f).is_some())
        .count();
    let exact = SUMMARY_REQUIRED_FIELDS
        .iter()
        .filter(|f| match (predicted.get(**f), reference.get(**f)) {
            (Some(p), Some(r)) => p == r,
            _ => false,
        })
        .count();

    SummaryEvaluation {
        field_coverage: round2(covered as f64 / total as f64),
        exact_match_count: exact,
        total_fields: total,
    }
}

pub fn evaluate_sentiment_intent(
    predicted_sentiment: &str,
    predicted_intent: &str,
    reference_sentiment: &str,
    reference_intent: &str,
) -> SentimentIntentEvaluation {
    SentimentIntentEvaluation {
        sentiment_correct: predicted_sentiment == reference_sentiment,
        intent_correct: predicted_intent == reference_intent,
    }
}

pub fn evaluate_soap_note(predicted: &Value) -> SoapEvaluation {
    let present = SOAP_SECTIONS
        .iter()
        .filter(|(section, _)| predicted.get(*section).is_some())
        .count();
    let completeness = present as f64 / SOAP_SECTIONS.len() as f64;

    SoapEvaluation {
        section_completeness: round2(completeness),
        all_sections_present: present == SOAP_SECTIONS.len(),
    }
}

/// Scores a combined `{summary, sentiment, intent, soap_note}` object against a reference
/// of the same shape. Missing parts score as absent.
pub fn evaluate_output(predicted: &Value, reference: &Value) -> EvaluationReport {
    let null = Value::Null;
    let text = |v: &Value, key: &str| v.get(key).and_then(Value::as_str).unwrap_or("").to_string();

    EvaluationReport {
        summary: evaluate_structured_summary(
            predicted.get("summary").unwrap_or(&null),
            reference.get("summary").unwrap_or(&null),
        ),
        sentiment_intent: evaluate_sentiment_intent(
            &text(predicted, "sentiment"),
            &text(predicted, "intent"),
            &text(reference, "sentiment"),
            &text(reference, "intent"),
        ),
        soap: evaluate_soap_note(predicted.get("soap_note").unwrap_or(&null)),
    }
}
