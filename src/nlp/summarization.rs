//! Structured medical summary built from extracted entities, keywords and a few cue rules.

use super::keywords::extract_keywords;
use super::lexicon::Lexicon;
use super::preprocessing::handle_missing_data;
use crate::models::{EntityBundle, FieldValue, StructuredSummary};

const UNKNOWN_PATIENT: &str = "Unknown";

pub fn generate_medical_summary(
    transcript: &str,
    entities: &EntityBundle,
    lexicon: &Lexicon,
    max_keywords: usize,
) -> StructuredSummary {
    let diagnosis = entities.diagnosis.first().cloned().map(FieldValue::Text);
    let prognosis = entities
        .prognosis
        .first()
        .cloned()
        .or_else(|| infer_prognosis(transcript, lexicon))
        .map(FieldValue::Text);

    StructuredSummary {
        patient_name: infer_patient_name(transcript, lexicon),
        symptoms: handle_missing_data(Some(FieldValue::List(entities.symptoms.clone()))),
        diagnosis: handle_missing_data(diagnosis),
        treatment: handle_missing_data(Some(FieldValue::List(entities.treatment.clone()))),
        current_status: handle_missing_data(
            infer_current_status(transcript, lexicon).map(FieldValue::Text),
        ),
        prognosis: handle_missing_data(prognosis),
        keywords: extract_keywords(transcript, lexicon, max_keywords),
    }
}

pub fn infer_patient_name(transcript: &str, lexicon: &Lexicon) -> String {
    lexicon
        .patient_name_rules
        .first_match(transcript)
        .cloned()
        .unwrap_or_else(|| UNKNOWN_PATIENT.to_string())
}

pub fn infer_current_status(transcript: &str, lexicon: &Lexicon) -> Option<String> {
    lexicon.current_status_rules.first_match(transcript).cloned()
}

/// Fallback when no prognosis phrase was extracted.
pub fn infer_prognosis(transcript: &str, lexicon: &Lexicon) -> Option<String> {
    lexicon.prognosis_rules.first_match(transcript).cloned()
}
