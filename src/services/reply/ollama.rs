use anyhow::Context;
use async_trait::async_trait;
use serde_json::json;

use super::ReplyProvider;
use crate::models::{Role, Utterance};

const SYSTEM_PROMPT: &str = "You are a physician taking a history from a patient after an \
injury. Reply with one short, empathetic follow-up question or acknowledgement. Do not \
diagnose, do not prescribe, and keep it under 40 words.";

pub struct OllamaReply {
    url: String,
    model: String,
    client: reqwest::Client,
}

impl OllamaReply {
    pub fn new(url: String, model: String) -> Self {
        Self {
            url,
            model,
            client: reqwest::Client::new(),
        }
    }
}

fn chat_role(role: Role) -> &'static str {
    match role {
        Role::Patient => "user",
        Role::Physician => "assistant",
    }
}

#[async_trait]
impl ReplyProvider for OllamaReply {
    async fn reply(&self, history: &[Utterance], _latest_message: &str) -> anyhow::Result<String> {
        let mut messages = vec![json!({
            "role": "system",
            "content": SYSTEM_PROMPT,
        })];

        for turn in history {
            messages.push(json!({
                "role": chat_role(turn.role),
                "content": turn.text,
            }));
        }

        let body = json!({
            "model": self.model,
            "messages": messages,
            "stream": false,
        });

        let resp = self
            .client
            .post(format!("{}/api/chat", self.url))
            .json(&body)
            .send()
            .await
            .context("failed to call Ollama API")?;

        let status = resp.status();
        let data: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse Ollama response")?;

        if !status.is_success() {
            anyhow::bail!("Ollama API error ({}): {}", status, data);
        }

        data["message"]["content"]
            .as_str()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow::anyhow!("missing content in Ollama response"))
    }
}
