use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Sentiment {
    Anxious,
    Neutral,
    Reassured,
}

impl Sentiment {
    pub const LABELS: [&'static str; 3] = ["Anxious", "Neutral", "Reassured"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Anxious => "Anxious",
            Sentiment::Neutral => "Neutral",
            Sentiment::Reassured => "Reassured",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Intent {
    #[serde(rename = "Seeking reassurance")]
    SeekingReassurance,
    #[serde(rename = "Reporting symptoms")]
    ReportingSymptoms,
    #[serde(rename = "Expressing concern")]
    ExpressingConcern,
    #[serde(rename = "Reporting improvement")]
    ReportingImprovement,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::SeekingReassurance => "Seeking reassurance",
            Intent::ReportingSymptoms => "Reporting symptoms",
            Intent::ExpressingConcern => "Expressing concern",
            Intent::ReportingImprovement => "Reporting improvement",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SentimentIntentResult {
    #[serde(rename = "Sentiment")]
    pub sentiment: Sentiment,
    #[serde(rename = "Intent")]
    pub intent: Intent,
}
