pub mod ollama;
pub mod rules;

use async_trait::async_trait;

use crate::models::Utterance;

/// Produces the physician's side of a chat turn.
#[async_trait]
pub trait ReplyProvider: Send + Sync {
    /// `history` already ends with the patient's latest message.
    async fn reply(&self, history: &[Utterance], latest_message: &str) -> anyhow::Result<String>;
}
