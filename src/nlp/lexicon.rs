//! Vocabularies and rule tables used by every extractor.
//!
//! A [`Lexicon`] is built once at startup, validated, and shared read-only through
//! `AppState`. Nothing in the pipeline mutates it.

use std::fs;
use std::path::Path;

use anyhow::Context;
#[cfg(test)]
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::rules::{Predicate, Rule, RuleSet};
use crate::errors::LexiconError;
use crate::models::{EntityCategory, Intent, Sentiment};

#[cfg(test)]
static BUILTIN: Lazy<Lexicon> = Lazy::new(Lexicon::builtin);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lexicon {
    pub symptom_terms: Vec<String>,
    pub diagnosis_terms: Vec<String>,
    pub treatment_terms: Vec<String>,
    pub prognosis_terms: Vec<String>,
    /// Broader vocabulary used to filter keyword candidates.
    pub keyword_terms: Vec<String>,
    pub sentiment_rules: RuleSet<Sentiment>,
    pub intent_rules: RuleSet<Intent>,
    pub patient_name_rules: RuleSet<String>,
    pub current_status_rules: RuleSet<String>,
    pub prognosis_rules: RuleSet<String>,
    pub history_cues: Vec<String>,
    pub physical_exam_cues: Vec<String>,
}

fn strings(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| t.to_string()).collect()
}

impl Lexicon {
    /// Shared instance of the built-in lexicon for tests.
    #[cfg(test)]
    pub fn shared() -> &'static Lexicon {
        &BUILTIN
    }

    pub fn builtin() -> Self {
        Self {
            symptom_terms: strings(&[
                "neck pain",
                "back pain",
                "headache",
                "backache",
                "stiffness",
                "discomfort",
                "pain",
            ]),
            diagnosis_terms: strings(&["whiplash injury", "whiplash", "back strain", "neck strain"]),
            treatment_terms: strings(&[
                "physiotherapy",
                "painkillers",
                "analgesics",
                "physical therapy",
                "x-ray",
                "x rays",
            ]),
            prognosis_terms: strings(&[
                "full recovery",
                "recover",
                "improving",
                "no long term damage",
                "no lasting damage",
            ]),
            keyword_terms: strings(&[
                "pain",
                "injury",
                "accident",
                "whiplash",
                "physiotherapy",
                "treatment",
                "recovery",
                "back",
                "neck",
                "head",
                "spine",
                "muscle",
                "therapy",
                "painkillers",
                "analgesics",
                "examination",
            ]),
            sentiment_rules: RuleSet::new(vec![
                Rule::new(
                    Predicate::any_of(&[
                        "worried",
                        "scared",
                        "anxious",
                        "concerned",
                        "pain",
                        "afraid",
                        "trouble",
                        "difficulty",
                    ]),
                    Sentiment::Anxious,
                ),
                Rule::new(
                    Predicate::any_of(&[
                        "better",
                        "relief",
                        "fine",
                        "okay",
                        "good",
                        "improving",
                        "recovered",
                        "happy",
                    ]),
                    Sentiment::Reassured,
                ),
            ]),
            intent_rules: RuleSet::new(vec![
                Rule::new(
                    Predicate::any_of(&["worried", "hope", "concerned", "afraid"]),
                    Intent::SeekingReassurance,
                ),
                Rule::new(
                    Predicate::any_of(&["pain", "hurt", "ache", "discomfort", "stiff"]),
                    Intent::ReportingSymptoms,
                ),
                Rule::new(
                    Predicate::any_of(&["trouble", "difficulty", "problem"]),
                    Intent::ExpressingConcern,
                ),
                Rule::new(
                    Predicate::any_of(&["better", "improving", "relief"]),
                    Intent::ReportingImprovement,
                ),
            ]),
            patient_name_rules: RuleSet::new(vec![Rule::new(
                Predicate::any_of(&["ms. jones"]),
                "Janet Jones".to_string(),
            )]),
            current_status_rules: RuleSet::new(vec![
                Rule::new(
                    Predicate::all_of(&["occasional", "pain"]),
                    "Occasional backache".to_string(),
                ),
                Rule::new(
                    Predicate::any_of(&["improving", "better"]),
                    "Symptoms improving".to_string(),
                ),
                Rule::new(Predicate::any_of(&["pain"]), "Ongoing pain".to_string()),
            ]),
            prognosis_rules: RuleSet::new(vec![
                Rule::new(
                    Predicate::any_of(&["full recovery"]),
                    "Full recovery expected".to_string(),
                ),
                Rule::new(
                    Predicate::any_of(&["no long-term", "no lasting damage"]),
                    "No long-term complications expected".to_string(),
                ),
            ]),
            history_cues: strings(&["car accident"]),
            physical_exam_cues: strings(&["full range of movement", "full range of motion"]),
        }
    }

    /// Loads a lexicon from a JSON file with the same shape as the serialized built-in one.
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read lexicon file: {}", path.display()))?;
        let lexicon: Lexicon = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse lexicon file: {}", path.display()))?;
        Ok(lexicon)
    }

    pub fn terms(&self, category: EntityCategory) -> &[String] {
        match category {
            EntityCategory::Symptom => &self.symptom_terms,
            EntityCategory::Diagnosis => &self.diagnosis_terms,
            EntityCategory::Treatment => &self.treatment_terms,
            EntityCategory::Prognosis => &self.prognosis_terms,
        }
    }

    /// Rejects vocabularies and tables that would make the extractors meaningless.
    pub fn validate(&self) -> Result<(), LexiconError> {
        // Entity terms are lowercased when compiled to phrases; the rest are raw substrings.
        let vocabularies: [(&str, &[String], bool); 7] = [
            ("symptom_terms", &self.symptom_terms, false),
            ("diagnosis_terms", &self.diagnosis_terms, false),
            ("treatment_terms", &self.treatment_terms, false),
            ("prognosis_terms", &self.prognosis_terms, false),
            ("keyword_terms", &self.keyword_terms, true),
            ("history_cues", &self.history_cues, true),
            ("physical_exam_cues", &self.physical_exam_cues, true),
        ];
        for (name, terms, lowercase_only) in vocabularies {
            if terms.is_empty() {
                return Err(LexiconError::EmptyVocabulary(name.to_string()));
            }
            for term in terms {
                if term.trim().is_empty() {
                    return Err(LexiconError::BlankTerm(name.to_string()));
                }
                if lowercase_only && term.to_lowercase() != *term {
                    return Err(LexiconError::UppercaseTerm {
                        name: name.to_string(),
                        term: term.clone(),
                    });
                }
            }
        }

        self.sentiment_rules.validate("sentiment_rules")?;
        self.intent_rules.validate("intent_rules")?;
        self.patient_name_rules.validate("patient_name_rules")?;
        self.current_status_rules.validate("current_status_rules")?;
        self.prognosis_rules.validate("prognosis_rules")?;
        Ok(())
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Lexicon::builtin()
    }
}
