use serde::{Deserialize, Serialize};

pub const PLACEHOLDER: &str = "Not mentioned";

/// A summary field that is either free text or a list of phrases.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn placeholder() -> Self {
        FieldValue::Text(PLACEHOLDER.to_string())
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, FieldValue::Text(s) if s == PLACEHOLDER)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            FieldValue::Text(_) => None,
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StructuredSummary {
    #[serde(rename = "Patient_Name")]
    pub patient_name: String,
    #[serde(rename = "Symptoms")]
    pub symptoms: FieldValue,
    #[serde(rename = "Diagnosis")]
    pub diagnosis: FieldValue,
    #[serde(rename = "Treatment")]
    pub treatment: FieldValue,
    #[serde(rename = "Current_Status")]
    pub current_status: FieldValue,
    #[serde(rename = "Prognosis")]
    pub prognosis: FieldValue,
    #[serde(rename = "Keywords")]
    pub keywords: Vec<String>,
}

/// Keys every summary must carry. `Keywords` is extra and not required.
pub const SUMMARY_REQUIRED_FIELDS: [&str; 6] = [
    "Patient_Name",
    "Symptoms",
    "Diagnosis",
    "Treatment",
    "Current_Status",
    "Prognosis",
];
