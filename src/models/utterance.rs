use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    Patient,
    Physician,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "Patient",
            Role::Physician => "Physician",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Patient" => Some(Role::Patient),
            "Physician" => Some(Role::Physician),
            _ => None,
        }
    }
}

/// One turn of dialogue. Never modified after it is appended to a conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Utterance {
    pub role: Role,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl Utterance {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }
}

/// Unvalidated conversation entry as it arrives over the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct RawUtterance {
    pub role: Option<String>,
    pub text: Option<String>,
    pub timestamp: Option<String>,
}
