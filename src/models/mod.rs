pub mod analysis;
pub mod entities;
pub mod sentiment;
pub mod soap;
pub mod summary;
pub mod utterance;

pub use analysis::{NlpOutput, StoredAnalysis};
pub use entities::{EntityBundle, EntityCategory};
pub use sentiment::{Intent, Sentiment, SentimentIntentResult};
pub use soap::{Assessment, Objective, Plan, SoapNote, Subjective, SOAP_SECTIONS};
pub use summary::{FieldValue, StructuredSummary, PLACEHOLDER, SUMMARY_REQUIRED_FIELDS};
pub use utterance::{RawUtterance, Role, Utterance};
