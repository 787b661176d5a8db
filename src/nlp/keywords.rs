//! Medical keyword and key-phrase extraction.
//!
//! Candidates are noun-like chunks (runs of content words between punctuation and
//! function words, within one transcript line) plus standalone vocabulary tokens.

use std::collections::BTreeSet;

use super::lexicon::Lexicon;
use super::preprocessing::{strip_speaker_label, title_case};
use super::tokenize::{tokenize, Token};

pub const DEFAULT_MAX_KEYWORDS: usize = 10;
const MIN_KEYWORD_LEN: usize = 3;

const FUNCTION_WORDS: &[&str] = &[
    // pronouns and determiners
    "i", "me", "my", "mine", "you", "your", "he", "him", "his", "she", "her", "it", "its",
    "we", "us", "our", "they", "them", "their", "this", "that", "these", "those", "a", "an",
    "the", "some", "any", "every", "each", "all", "no", "which", "who", "what",
    // auxiliaries and common verbs
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do",
    "does", "did", "will", "would", "can", "could", "should", "shall", "may", "might", "must",
    "feel", "feels", "felt", "feeling", "said", "say", "says", "took", "take", "taking", "get",
    "gets", "got", "getting", "go", "goes", "went", "gone", "completed", "expect", "hope",
    "see", "tell", "let", "make", "made", "need", "want", "think", "know", "experienced",
    "noticed", "received", "started", "stopped", "keep",
    // prepositions and conjunctions
    "in", "on", "at", "for", "of", "to", "from", "with", "without", "about", "after",
    "before", "into", "over", "under", "by", "since", "within", "through", "during", "and",
    "or", "but", "so", "if", "because", "then", "than", "as", "while",
    // adverbs and fillers
    "now", "very", "much", "only", "just", "also", "not", "still", "yes", "how", "when",
    "where", "why", "there", "here", "today", "really", "again", "too", "well", "ever",
];

fn is_function_word(word: &str) -> bool {
    FUNCTION_WORDS.contains(&word)
}

/// Maximal runs of content words, broken at punctuation and function words.
fn noun_chunks(tokens: &[Token]) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for token in tokens {
        if token.is_word && !is_function_word(&token.lower) {
            current.push(&token.lower);
        } else if !current.is_empty() {
            chunks.push(current.join(" "));
            current.clear();
        }
    }
    if !current.is_empty() {
        chunks.push(current.join(" "));
    }

    chunks
}

pub fn extract_keywords(text: &str, lexicon: &Lexicon, max_keywords: usize) -> Vec<String> {
    if text.trim().is_empty() {
        return vec![];
    }

    let terms = &lexicon.keyword_terms;
    let mut candidates: Vec<String> = Vec::new();

    // One line per speaker turn; chunks never cross a turn or include its label.
    for line in text.lines() {
        let (_, body) = strip_speaker_label(line.trim());
        let tokens = tokenize(&body.to_lowercase());

        for chunk in noun_chunks(&tokens) {
            if terms.iter().any(|term| chunk.contains(term.as_str())) {
                candidates.push(chunk);
            }
        }
        for token in tokens.iter().filter(|t| t.is_word) {
            if terms.iter().any(|term| *term == token.lower) {
                candidates.push(token.lower.clone());
            }
        }
    }

    let mut keywords = normalize_keywords(candidates);
    keywords.truncate(max_keywords);
    keywords
}

/// Trims, drops very short phrases, title-cases, deduplicates and sorts.
pub fn normalize_keywords(keywords: impl IntoIterator<Item = String>) -> Vec<String> {
    let cleaned: BTreeSet<String> = keywords
        .into_iter()
        .map(|kw| kw.trim().to_string())
        .filter(|kw| kw.chars().count() >= MIN_KEYWORD_LEN)
        .map(|kw| title_case(&kw))
        .collect();
    cleaned.into_iter().collect()
}
