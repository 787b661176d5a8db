//! Word/punctuation tokenizer and a literal token-sequence phrase matcher.

/// A token with byte offsets into the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub start: usize,
    pub end: usize,
    /// Lowercase form used for comparison.
    pub lower: String,
    pub is_word: bool,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Splits text into maximal runs of word characters plus single-character punctuation
/// tokens. Whitespace only separates.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word_start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        if is_word_char(c) {
            if word_start.is_none() {
                word_start = Some(i);
            }
            continue;
        }
        if let Some(start) = word_start.take() {
            tokens.push(word_token(text, start, i));
        }
        if !c.is_whitespace() {
            let end = i + c.len_utf8();
            tokens.push(Token {
                start: i,
                end,
                lower: text[i..end].to_lowercase(),
                is_word: false,
            });
        }
    }
    if let Some(start) = word_start {
        tokens.push(word_token(text, start, text.len()));
    }

    tokens
}

fn word_token(text: &str, start: usize, end: usize) -> Token {
    Token {
        start,
        end,
        lower: text[start..end].to_lowercase(),
        is_word: true,
    }
}

const CONJUNCTIONS: [&str; 4] = ["and", "or", ",", "&"];
const MAX_ELIDED_WORDS: usize = 2;

/// A vocabulary phrase compiled to its lowercase token sequence.
#[derive(Debug, Clone)]
pub struct Phrase {
    pub text: String,
    tokens: Vec<String>,
}

/// Where a phrase matched and what surface text to report for it.
#[derive(Debug, Clone, PartialEq)]
pub struct PhraseMatch {
    /// Index of the first matched token.
    pub start: usize,
    /// Number of tokens covered.
    pub len: usize,
    pub surface: String,
}

impl Phrase {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            tokens: tokenize(text).into_iter().map(|t| t.lower).collect(),
        }
    }

    fn matches_at(&self, tokens: &[Token], at: usize) -> bool {
        self.tokens.len() <= tokens.len() - at
            && self
                .tokens
                .iter()
                .zip(&tokens[at..])
                .all(|(want, got)| *want == got.lower)
    }

    /// Matches `modifier <conj> w1 [w2] head` for two-word phrases, e.g. "neck and back pain"
    /// for "neck pain". Returns the number of tokens covered.
    fn coordinated_at(&self, tokens: &[Token], at: usize) -> Option<usize> {
        let [modifier, head] = self.tokens.as_slice() else {
            return None;
        };
        if tokens[at].lower != *modifier {
            return None;
        }
        let conj = tokens.get(at + 1)?;
        if !CONJUNCTIONS.contains(&conj.lower.as_str()) {
            return None;
        }
        for elided in 1..=MAX_ELIDED_WORDS {
            let middle = tokens.get(at + 2..at + 2 + elided)?;
            if middle
                .iter()
                .any(|t| !t.is_word || CONJUNCTIONS.contains(&t.lower.as_str()))
            {
                return None;
            }
            if tokens.get(at + 2 + elided).is_some_and(|t| t.lower == *head) {
                return Some(elided + 3);
            }
        }
        None
    }
}

/// Finds every occurrence of every phrase in `text`. Results are ordered by start token,
/// longer matches first at the same start.
pub fn find_phrases(text: &str, phrases: &[Phrase]) -> Vec<PhraseMatch> {
    let tokens = tokenize(text);
    let mut found = Vec::new();

    for at in 0..tokens.len() {
        for phrase in phrases {
            if phrase.tokens.is_empty() {
                continue;
            }
            if phrase.matches_at(&tokens, at) {
                let len = phrase.tokens.len();
                let last = &tokens[at + len - 1];
                found.push(PhraseMatch {
                    start: at,
                    len,
                    surface: text[tokens[at].start..last.end].to_string(),
                });
            } else if let Some(len) = phrase.coordinated_at(&tokens, at) {
                found.push(PhraseMatch {
                    start: at,
                    len,
                    surface: phrase.text.clone(),
                });
            }
        }
    }

    found.sort_by(|a, b| a.start.cmp(&b.start).then(b.len.cmp(&a.len)));
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lowers(text: &str) -> Vec<String> {
        tokenize(text).into_iter().map(|t| t.lower).collect()
    }

    #[test]
    fn test_tokenize_words_and_punctuation() {
        assert_eq!(
            lowers("Patient: X-ray, please."),
            vec!["patient", ":", "x", "-", "ray", ",", "please", "."]
        );
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_token_offsets() {
        let text = "  Back pain";
        let tokens = tokenize(text);
        assert_eq!(&text[tokens[0].start..tokens[0].end], "Back");
        assert_eq!(&text[tokens[1].start..tokens[1].end], "pain");
    }

    #[test]
    fn test_find_contiguous_phrase() {
        let phrases = vec![Phrase::new("back pain"), Phrase::new("pain")];
        let found = find_phrases("Severe BACK pain today", &phrases);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].surface, "BACK pain");
        assert_eq!(found[1].surface, "pain");
    }

    #[test]
    fn test_phrase_does_not_match_substring_token() {
        let phrases = vec![Phrase::new("pain")];
        assert!(find_phrases("I took painkillers", &phrases).is_empty());
    }

    #[test]
    fn test_coordinated_phrase() {
        let phrases = vec![Phrase::new("neck pain"), Phrase::new("back pain")];
        let found = find_phrases("neck and back pain", &phrases);
        let surfaces: Vec<_> = found.iter().map(|m| m.surface.as_str()).collect();
        assert_eq!(surfaces, vec!["neck pain", "back pain"]);

        let found = find_phrases("neck and lower back pain", &phrases);
        assert_eq!(found[0].surface, "neck pain");
    }

    #[test]
    fn test_coordination_needs_a_conjunction() {
        let phrases = vec![Phrase::new("neck pain")];
        assert!(find_phrases("neck feels like pain", &phrases).is_empty());
    }

    #[test]
    fn test_hyphenated_phrase() {
        let phrases = vec![Phrase::new("x-ray")];
        let found = find_phrases("They took an X-Ray.", &phrases);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].surface, "X-Ray");
    }
}
