use async_trait::async_trait;

use super::ReplyProvider;
use crate::models::Utterance;
use crate::nlp::rules::{Predicate, Rule, RuleSet};

const DEFAULT_REPLY: &str = "Please continue, I’m listening.";

/// Canned follow-up questions picked by cue words in the patient's latest message.
pub struct RuleBasedReply {
    rules: RuleSet<String>,
}

impl RuleBasedReply {
    pub fn new() -> Self {
        Self {
            rules: RuleSet::new(vec![
                Rule::new(
                    Predicate::any_of(&["pain"]),
                    "Can you tell me more about the location and severity of the pain?".to_string(),
                ),
                Rule::new(
                    Predicate::any_of(&["accident"]),
                    "I understand. When did the accident occur, and what injuries did you notice?"
                        .to_string(),
                ),
                Rule::new(
                    Predicate::any_of(&["better", "relief"]),
                    "That’s good to hear. Are you still experiencing any discomfort?".to_string(),
                ),
            ]),
        }
    }

    pub fn reply_to(&self, message: &str) -> String {
        self.rules
            .first_match(message)
            .cloned()
            .unwrap_or_else(|| DEFAULT_REPLY.to_string())
    }
}

impl Default for RuleBasedReply {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReplyProvider for RuleBasedReply {
    async fn reply(&self, _history: &[Utterance], latest_message: &str) -> anyhow::Result<String> {
        Ok(self.reply_to(latest_message))
    }
}
