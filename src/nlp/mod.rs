//! Rule-based clinical NLP: entity and keyword extraction, sentiment and intent, summary
//! and SOAP note synthesis.

pub mod keywords;
pub mod lexicon;
pub mod ner;
pub mod pipeline;
pub mod preprocessing;
pub mod rules;
pub mod sentiment;
pub mod soap;
pub mod summarization;
pub mod tokenize;

pub use keywords::{extract_keywords, DEFAULT_MAX_KEYWORDS};
pub use lexicon::Lexicon;
pub use ner::extract_medical_entities;
pub use pipeline::{run_nlp_pipeline, run_transcript_pipeline};
pub use sentiment::analyze_sentiment_and_intent;
pub use soap::generate_soap_note;
pub use summarization::generate_medical_summary;
