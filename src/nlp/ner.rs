//! Dictionary-based medical entity extraction.
//!
//! Every category is matched independently against the transcript, so one span of text
//! may land in more than one category.

use indexmap::IndexSet;

use super::lexicon::Lexicon;
use super::preprocessing::title_case;
use super::tokenize::{find_phrases, Phrase};
use crate::models::{EntityBundle, EntityCategory};

pub fn extract_medical_entities(text: &str, lexicon: &Lexicon) -> EntityBundle {
    let mut bundle = EntityBundle::default();
    for category in EntityCategory::ALL {
        *bundle.get_mut(category) = extract_category(text, lexicon.terms(category));
    }

    tracing::debug!(
        symptoms = bundle.symptoms.len(),
        diagnosis = bundle.diagnosis.len(),
        treatment = bundle.treatment.len(),
        prognosis = bundle.prognosis.len(),
        "extracted medical entities"
    );

    bundle
}

fn extract_category(text: &str, terms: &[String]) -> Vec<String> {
    let phrases: Vec<Phrase> = terms.iter().map(|t| Phrase::new(t)).collect();
    let matches = find_phrases(text, &phrases);
    normalize_entities(matches.iter().map(|m| m.surface.as_str()))
}

/// Trims, collapses inner whitespace, title-cases and deduplicates, keeping first-seen order.
pub fn normalize_entities<'a>(entities: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = IndexSet::new();
    for entity in entities {
        let collapsed = entity.split_whitespace().collect::<Vec<_>>().join(" ");
        let cleaned = title_case(&collapsed);
        if !cleaned.is_empty() {
            seen.insert(cleaned);
        }
    }
    seen.into_iter().collect()
}
