use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub output_dir: String,
    pub save_outputs: bool,
    pub max_keywords: usize,
    pub lexicon_path: Option<String>,
    pub mask_patient_names: bool,
    pub reply_provider: String,
    pub ollama_url: String,
    pub ollama_model: String,
    pub log_dir: Option<String>,
}

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "notetaker.db".to_string()),
            output_dir: env::var("OUTPUT_DIR").unwrap_or_else(|_| "data/outputs".to_string()),
            save_outputs: env_flag("SAVE_OUTPUTS", true),
            max_keywords: env::var("MAX_KEYWORDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(crate::nlp::DEFAULT_MAX_KEYWORDS),
            lexicon_path: env::var("LEXICON_PATH").ok().filter(|v| !v.trim().is_empty()),
            mask_patient_names: env_flag("MASK_PATIENT_NAMES", true),
            reply_provider: env::var("REPLY_PROVIDER").unwrap_or_else(|_| "rules".to_string()),
            ollama_url: env::var("OLLAMA_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            ollama_model: env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3.2".to_string()),
            log_dir: env::var("LOG_DIR").ok().filter(|v| !v.trim().is_empty()),
        }
    }
}
