use serde::{Deserialize, Serialize};

use super::{Intent, Sentiment, SentimentIntentResult, SoapNote, StructuredSummary};

/// Combined result of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NlpOutput {
    pub summary: StructuredSummary,
    pub sentiment: Sentiment,
    pub intent: Intent,
    pub soap_note: SoapNote,
}

impl NlpOutput {
    pub fn sentiment_intent(&self) -> SentimentIntentResult {
        SentimentIntentResult {
            sentiment: self.sentiment,
            intent: self.intent,
        }
    }
}

/// A persisted pipeline run for one conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredAnalysis {
    pub id: i64,
    pub conversation_id: String,
    #[serde(flatten)]
    pub output: NlpOutput,
    pub created_at: String,
}
