use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{FieldValue, Role, Utterance};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static NON_BASIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s.,]").expect("valid regex"));

/// Lowercases, collapses whitespace and strips everything except word characters, spaces,
/// periods and commas.
pub fn normalize_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let lower = text.to_lowercase();
    let collapsed = WHITESPACE.replace_all(&lower, " ");
    let stripped = NON_BASIC.replace_all(&collapsed, "");
    stripped.trim().to_string()
}

/// Splits a raw `Physician:` / `Patient:` transcript into utterances. Lines without a
/// recognised prefix are attributed to the patient.
pub fn split_by_speaker(transcript: &str) -> Vec<Utterance> {
    transcript
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let (role, rest) = strip_speaker_label(line);
            Utterance::new(role.unwrap_or(Role::Patient), normalize_text(rest))
        })
        .collect()
}

/// Splits a leading `Physician:` / `Patient:` label (any case) off one transcript line.
pub fn strip_speaker_label(line: &str) -> (Option<Role>, &str) {
    if let Some(rest) = strip_prefix_ignore_case(line, "physician:") {
        return (Some(Role::Physician), rest);
    }
    if let Some(rest) = strip_prefix_ignore_case(line, "patient:") {
        return (Some(Role::Patient), rest);
    }
    (None, line)
}

fn strip_prefix_ignore_case<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let head = line.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&line[prefix.len()..])
    } else {
        None
    }
}

fn texts_for(conversation: &[Utterance], role: Role) -> String {
    conversation
        .iter()
        .filter(|u| u.role == role)
        .map(|u| u.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// All patient utterances, space-joined in order.
pub fn patient_text(conversation: &[Utterance]) -> String {
    texts_for(conversation, Role::Patient)
}

/// All physician utterances, space-joined in order.
pub fn physician_text(conversation: &[Utterance]) -> String {
    texts_for(conversation, Role::Physician)
}

/// Renders a conversation as `Role: text` lines.
pub fn build_transcript(conversation: &[Utterance]) -> String {
    conversation
        .iter()
        .map(|u| format!("{}: {}", u.role.as_str(), u.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replaces an absent value, an empty list or a blank string with the placeholder.
pub fn handle_missing_data(value: Option<FieldValue>) -> FieldValue {
    match value {
        None => FieldValue::placeholder(),
        Some(FieldValue::List(items)) if items.is_empty() => FieldValue::placeholder(),
        Some(FieldValue::Text(text)) if text.trim().is_empty() => FieldValue::placeholder(),
        Some(value) => value,
    }
}

/// Python-style title case: a letter is capitalised when it does not follow another letter.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}
