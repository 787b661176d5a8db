use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidOutput(String),

    #[error("reply provider error: {0}")]
    Reply(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Malformed vocabulary or rule data. Fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("vocabulary `{0}` is empty")]
    EmptyVocabulary(String),

    #[error("vocabulary `{0}` contains a blank term")]
    BlankTerm(String),

    #[error("vocabulary `{name}` has term {term:?}; it is matched against lowercased text and must be lowercase")]
    UppercaseTerm { name: String, term: String },

    #[error("rule table `{0}` is empty")]
    EmptyTable(String),

    #[error("rule {index} of `{table}` has no terms")]
    RuleWithoutTerms { table: String, index: usize },

    #[error("rule {index} of `{table}` has an invalid term {term:?} (terms must be non-blank lowercase)")]
    InvalidRuleTerm {
        table: String,
        index: usize,
        term: String,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::Internal(format!("{e:#}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidOutput(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Reply(_) => StatusCode::BAD_GATEWAY,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
