use std::sync::{Arc, Mutex};

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use notetaker::config::AppConfig;
use notetaker::db;
use notetaker::errors::AppError;
use notetaker::handlers;
use notetaker::logging;
use notetaker::nlp::Lexicon;
use notetaker::services::reply::ollama::OllamaReply;
use notetaker::services::reply::rules::RuleBasedReply;
use notetaker::services::reply::ReplyProvider;
use notetaker::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let config = AppConfig::from_env();
    let _log_guard = logging::init_tracing(config.log_dir.as_deref())?;

    let lexicon = match &config.lexicon_path {
        Some(path) => {
            tracing::info!("loading lexicon from {path}");
            Lexicon::from_json_file(path)?
        }
        None => Lexicon::builtin(),
    };
    lexicon
        .validate()
        .map_err(|e| AppError::Config(e.to_string()))?;

    let conn = db::init_db(&config.database_url)?;

    let replies: Box<dyn ReplyProvider> = match config.reply_provider.as_str() {
        "ollama" => {
            tracing::info!(
                "using Ollama reply provider (url: {}, model: {})",
                config.ollama_url,
                config.ollama_model
            );
            Box::new(OllamaReply::new(
                config.ollama_url.clone(),
                config.ollama_model.clone(),
            ))
        }
        _ => {
            tracing::info!("using rule-based reply provider");
            Box::new(RuleBasedReply::new())
        }
    };

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
        lexicon: Arc::new(lexicon),
        replies,
    });

    let app = handlers::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Physician Notetaker listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
