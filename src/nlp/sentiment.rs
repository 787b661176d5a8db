use super::lexicon::Lexicon;
use crate::models::{Intent, Sentiment, SentimentIntentResult};

pub fn analyze_sentiment_and_intent(patient_text: &str, lexicon: &Lexicon) -> SentimentIntentResult {
    let text = patient_text.to_lowercase();
    SentimentIntentResult {
        sentiment: detect_sentiment(&text, lexicon),
        intent: detect_intent(&text, lexicon),
    }
}

/// Anxious cues are checked before reassured ones, so mixed text reads as anxious.
pub fn detect_sentiment(text: &str, lexicon: &Lexicon) -> Sentiment {
    lexicon
        .sentiment_rules
        .first_match(text)
        .copied()
        .unwrap_or(Sentiment::Neutral)
}

pub fn detect_intent(text: &str, lexicon: &Lexicon) -> Intent {
    lexicon
        .intent_rules
        .first_match(text)
        .copied()
        .unwrap_or(Intent::ReportingSymptoms)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(text: &str) -> SentimentIntentResult {
        analyze_sentiment_and_intent(text, Lexicon::shared())
    }

    #[test]
    fn test_anxious_sentiment() {
        let result = analyze("I am worried about my back pain and hope it gets better.");
        assert_eq!(result.sentiment, Sentiment::Anxious);
        assert_eq!(result.intent, Intent::SeekingReassurance);
    }

    #[test]
    fn test_reassured_sentiment() {
        let result = analyze("I feel much better now. That is a relief.");
        assert_eq!(result.sentiment, Sentiment::Reassured);
        assert_eq!(result.intent, Intent::ReportingImprovement);
    }

    #[test]
    fn test_symptom_report() {
        let result = analyze("I had neck pain after the accident.");
        assert_eq!(result.sentiment, Sentiment::Anxious);
        assert_eq!(result.intent, Intent::ReportingSymptoms);
    }

    #[test]
    fn test_anxious_wins_tie() {
        let result = analyze("I am worried but feeling better");
        assert_eq!(result.sentiment, Sentiment::Anxious);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(analyze("I'M SCARED").sentiment, Sentiment::Anxious);
    }

    #[test]
    fn test_defaults() {
        let result = analyze("I went to the shop yesterday.");
        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert_eq!(result.intent, Intent::ReportingSymptoms);

        let result = analyze("");
        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert_eq!(result.intent, Intent::ReportingSymptoms);
    }

    #[test]
    fn test_expressing_concern() {
        let result = analyze("I have trouble sleeping.");
        assert_eq!(result.intent, Intent::ExpressingConcern);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(analyze("That is a relief.")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"Sentiment": "Reassured", "Intent": "Reporting improvement"})
        );
    }
}
