//! Writes the latest conversation and pipeline outputs as pretty-printed JSON files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;

use crate::models::{NlpOutput, Utterance};

pub const CONVERSATION_FILE: &str = "conversation_log.json";
pub const SUMMARY_FILE: &str = "structured_summary.json";
pub const SENTIMENT_FILE: &str = "sentiment_intent.json";
pub const SOAP_FILE: &str = "soap_note.json";

pub struct OutputSink {
    dir: PathBuf,
}

impl OutputSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create output dir: {}", self.dir.display()))?;
        let path = self.dir.join(name);
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn save_conversation(&self, conversation: &[Utterance]) -> anyhow::Result<()> {
        self.write_json(CONVERSATION_FILE, conversation)
    }

    /// One file per artifact; each call overwrites the previous turn's files.
    pub fn save_outputs(&self, output: &NlpOutput) -> anyhow::Result<()> {
        self.write_json(SUMMARY_FILE, &output.summary)?;
        self.write_json(SENTIMENT_FILE, &output.sentiment_intent())?;
        self.write_json(SOAP_FILE, &output.soap_note)?;
        Ok(())
    }
}
