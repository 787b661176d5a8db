use super::lexicon::Lexicon;
use super::ner::extract_medical_entities;
use super::preprocessing::{build_transcript, patient_text, split_by_speaker};
use super::sentiment::analyze_sentiment_and_intent;
use super::soap::generate_soap_note;
use super::summarization::generate_medical_summary;
use crate::models::{NlpOutput, Utterance};

/// Runs every stage over one conversation. The conversation is only read.
pub fn run_nlp_pipeline(conversation: &[Utterance], lexicon: &Lexicon, max_keywords: usize) -> NlpOutput {
    let transcript = build_transcript(conversation);
    let patient = patient_text(conversation);

    let entities = extract_medical_entities(&transcript, lexicon);
    let summary = generate_medical_summary(&transcript, &entities, lexicon, max_keywords);
    let sentiment_intent = analyze_sentiment_and_intent(&patient, lexicon);
    let soap_note = generate_soap_note(&transcript, &entities, lexicon);

    tracing::debug!(
        utterances = conversation.len(),
        sentiment = %sentiment_intent.sentiment,
        intent = %sentiment_intent.intent,
        keywords = summary.keywords.len(),
        "nlp pipeline complete"
    );

    NlpOutput {
        summary,
        sentiment: sentiment_intent.sentiment,
        intent: sentiment_intent.intent,
        soap_note,
    }
}

/// Same as [`run_nlp_pipeline`] for a raw `Role: text` transcript.
pub fn run_transcript_pipeline(transcript: &str, lexicon: &Lexicon, max_keywords: usize) -> NlpOutput {
    let conversation = split_by_speaker(transcript);
    run_nlp_pipeline(&conversation, lexicon, max_keywords)
}
