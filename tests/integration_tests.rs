use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use notetaker::config::AppConfig;
use notetaker::db;
use notetaker::handlers;
use notetaker::models::Utterance;
use notetaker::nlp::Lexicon;
use notetaker::services::reply::ReplyProvider;
use notetaker::state::AppState;

// ── Mock Providers ──

struct MockReply {
    seen: Arc<Mutex<Vec<usize>>>,
}

#[async_trait]
impl ReplyProvider for MockReply {
    async fn reply(&self, history: &[Utterance], _latest_message: &str) -> anyhow::Result<String> {
        self.seen.lock().unwrap().push(history.len());
        Ok("Tell me more.".to_string())
    }
}

struct FailingReply;

#[async_trait]
impl ReplyProvider for FailingReply {
    async fn reply(&self, _history: &[Utterance], _latest_message: &str) -> anyhow::Result<String> {
        anyhow::bail!("model offline")
    }
}

// ── Helpers ──

fn test_config(output_dir: &str, save_outputs: bool) -> AppConfig {
    AppConfig {
        port: 5000,
        database_url: ":memory:".to_string(),
        output_dir: output_dir.to_string(),
        save_outputs,
        max_keywords: 10,
        lexicon_path: None,
        mask_patient_names: true,
        reply_provider: "rules".to_string(),
        ollama_url: "http://localhost:11434".to_string(),
        ollama_model: "llama3.2".to_string(),
        log_dir: None,
    }
}

fn state_with(config: AppConfig, replies: Box<dyn ReplyProvider>) -> Arc<AppState> {
    let conn = db::init_db(":memory:").unwrap();
    Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config,
        lexicon: Arc::new(Lexicon::builtin()),
        replies,
    })
}

fn test_state() -> (Arc<AppState>, Arc<Mutex<Vec<usize>>>) {
    let seen = Arc::new(Mutex::new(vec![]));
    let replies = MockReply {
        seen: Arc::clone(&seen),
    };
    (state_with(test_config("unused", false), Box::new(replies)), seen)
}

fn test_app(state: Arc<AppState>) -> Router {
    handlers::router(state)
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(res: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

// ── Health & dashboard ──

#[tokio::test]
async fn test_health() {
    let (state, _) = test_state();
    let res = test_app(state).oneshot(get("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["status"], "ok");
}

#[tokio::test]
async fn test_index_page() {
    let (state, _) = test_state();
    let res = test_app(state).oneshot(get("/")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(String::from_utf8_lossy(&body).contains("Physician Notetaker"));
}

// ── Chat ──

#[tokio::test]
async fn test_chat_rejects_empty_message() {
    let (state, seen) = test_state();
    let res = test_app(state)
        .oneshot(post_json("/chat", serde_json::json!({"message": "   "})))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(res).await["error"], "Empty message");
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_chat_missing_message_field() {
    let (state, _) = test_state();
    let res = test_app(state)
        .oneshot(post_json("/chat", serde_json::json!({})))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_chat_turn_returns_all_outputs() {
    let (state, _) = test_state();
    let res = test_app(state)
        .oneshot(post_json(
            "/chat",
            serde_json::json!({"message": "I was in a car accident and I'm worried about my neck pain."}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let json = body_json(res).await;
    assert!(json["session_id"].as_str().is_some_and(|s| !s.is_empty()));
    assert_eq!(json["physician_reply"], "Tell me more.");
    assert_eq!(json["sentiment"], "Anxious");
    assert_eq!(json["intent"], "Seeking reassurance");
    assert_eq!(json["summary"]["Symptoms"], serde_json::json!(["Neck Pain", "Pain"]));
    assert_eq!(json["summary"]["Patient_Name"], "Unknown");
    assert!(json["soap_note"]["Subjective"]["History_of_Present_Illness"]
        .as_str()
        .unwrap()
        .contains("car accident"));
    for section in ["Subjective", "Objective", "Assessment", "Plan"] {
        assert!(json["soap_note"][section].is_object(), "{section} missing");
    }
}

#[tokio::test]
async fn test_chat_session_accumulates_turns() {
    let (state, seen) = test_state();

    let res = test_app(state.clone())
        .oneshot(post_json("/chat", serde_json::json!({"message": "My back hurts."})))
        .await
        .unwrap();
    let first = body_json(res).await;
    let session_id = first["session_id"].as_str().unwrap().to_string();

    let res = test_app(state.clone())
        .oneshot(post_json(
            "/chat",
            serde_json::json!({"message": "It is a relief that it feels better.", "session_id": session_id}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let second = body_json(res).await;
    assert_eq!(second["session_id"], session_id.as_str());
    // "hurts" in the first turn still drives the intent over later improvement
    assert_eq!(second["intent"], "Reporting symptoms");

    // Reply provider saw patient turn 1, then turns 1-3
    assert_eq!(*seen.lock().unwrap(), vec![1, 3]);

    let res = test_app(state.clone())
        .oneshot(get(&format!("/api/conversations/{session_id}")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let conv = body_json(res).await;
    let utterances = conv["utterances"].as_array().unwrap();
    assert_eq!(utterances.len(), 4);
    let roles: Vec<_> = utterances.iter().map(|u| u["role"].as_str().unwrap()).collect();
    assert_eq!(roles, vec!["Patient", "Physician", "Patient", "Physician"]);
    assert_eq!(utterances[0]["text"], "My back hurts.");
    assert!(utterances[0]["timestamp"].is_string());

    let res = test_app(state)
        .oneshot(get(&format!("/api/conversations/{session_id}/analysis")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let analysis = body_json(res).await;
    assert_eq!(analysis["conversation_id"], session_id.as_str());
    assert_eq!(analysis["intent"], "Reporting symptoms");
}

#[tokio::test]
async fn test_chat_unknown_session() {
    let (state, _) = test_state();
    let res = test_app(state)
        .oneshot(post_json(
            "/chat",
            serde_json::json!({"message": "hello", "session_id": "does-not-exist"}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_chat_reply_failure_is_bad_gateway() {
    let state = state_with(test_config("unused", false), Box::new(FailingReply));
    let res = test_app(state)
        .oneshot(post_json("/chat", serde_json::json!({"message": "my neck hurts"})))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(res).await;
    assert!(json["error"].as_str().unwrap().contains("model offline"));
}

#[tokio::test]
async fn test_chat_writes_output_files() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("outputs");
    let state = state_with(
        test_config(out.to_str().unwrap(), true),
        Box::new(notetaker::services::reply::rules::RuleBasedReply::new()),
    );

    let res = test_app(state)
        .oneshot(post_json("/chat", serde_json::json!({"message": "I feel better now."})))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(
        json["physician_reply"],
        "That’s good to hear. Are you still experiencing any discomfort?"
    );

    let sentiment: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(out.join("sentiment_intent.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(sentiment["Sentiment"], "Reassured");

    let log: Vec<Utterance> = serde_json::from_str(
        &std::fs::read_to_string(out.join("conversation_log.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(log.len(), 2);
    assert!(out.join("structured_summary.json").exists());
    assert!(out.join("soap_note.json").exists());
}

// ── Conversations ──

#[tokio::test]
async fn test_unknown_conversation_is_not_found() {
    let (state, _) = test_state();
    let res = test_app(state.clone())
        .oneshot(get("/api/conversations/nope"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = test_app(state)
        .oneshot(get("/api/conversations/nope/analysis"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

// ── Analyze ──

#[tokio::test]
async fn test_analyze_raw_transcript() {
    let (state, seen) = test_state();
    let transcript = "Patient: I was in a car accident.\n\
                      Patient: I had severe neck and back pain for four weeks.\n\
                      Patient: Doctors said it was a whiplash injury.\n\
                      Patient: I took painkillers and completed physiotherapy sessions.\n\
                      Patient: I am feeling better now and expect a full recovery.";
    let res = test_app(state)
        .oneshot(post_json("/api/analyze", serde_json::json!({"transcript": transcript})))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let json = body_json(res).await;
    let symptoms = json["summary"]["Symptoms"].as_array().unwrap();
    assert!(symptoms.contains(&serde_json::json!("Neck Pain")));
    assert!(symptoms.contains(&serde_json::json!("Back Pain")));
    assert_eq!(json["summary"]["Diagnosis"], "Whiplash Injury");
    assert_eq!(json["summary"]["Prognosis"], "Full Recovery");
    assert_eq!(json["soap_note"]["Assessment"]["Severity"], "Mild, improving");
    assert!(json["summary"]["Keywords"].as_array().unwrap().len() <= 10);
    // Stateless: no reply is generated
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_analyze_structured_conversation() {
    let (state, _) = test_state();
    let res = test_app(state)
        .oneshot(post_json(
            "/api/analyze",
            serde_json::json!({"conversation": [
                {"role": "Physician", "text": "How are you?"},
                {"role": "Patient", "text": "I feel much better now. That is a relief."}
            ]}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json["sentiment"], "Reassured");
    assert_eq!(json["intent"], "Reporting improvement");
}

#[tokio::test]
async fn test_analyze_rejects_bad_role() {
    let (state, _) = test_state();
    let res = test_app(state)
        .oneshot(post_json(
            "/api/analyze",
            serde_json::json!({"conversation": [{"role": "Nurse", "text": "hello"}]}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json = body_json(res).await;
    assert!(json["error"].as_str().unwrap().contains("role"));
}

#[tokio::test]
async fn test_analyze_empty_transcript() {
    let (state, _) = test_state();
    let res = test_app(state)
        .oneshot(post_json("/api/analyze", serde_json::json!({"transcript": ""})))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    let summary = &json["summary"];
    assert_eq!(summary["Patient_Name"], "Unknown");
    for field in ["Symptoms", "Diagnosis", "Treatment", "Current_Status", "Prognosis"] {
        assert_eq!(summary[field], "Not mentioned", "{field}");
    }
    assert_eq!(summary["Keywords"], serde_json::json!([]));
    assert_eq!(json["sentiment"], "Neutral");
}

// ── Evaluate ──

#[tokio::test]
async fn test_evaluate_partial_prediction() {
    let (state, _) = test_state();
    let reference = serde_json::json!({
        "summary": {"Patient_Name": "Janet Jones", "Diagnosis": "Whiplash Injury"},
        "sentiment": "Reassured",
        "intent": "Reporting improvement",
    });
    let predicted = serde_json::json!({
        "summary": {"Patient_Name": "Unknown", "Diagnosis": "Whiplash Injury", "Symptoms": []},
        "sentiment": "Reassured",
        "intent": "Reporting symptoms",
        "soap_note": {"Subjective": {}, "Objective": {}},
    });
    let res = test_app(state)
        .oneshot(post_json(
            "/api/evaluate",
            serde_json::json!({"predicted": predicted, "reference": reference}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let json = body_json(res).await;
    assert_eq!(json["summary"]["field_coverage"], 0.5);
    assert_eq!(json["summary"]["exact_match_count"], 1);
    assert_eq!(json["sentiment_intent"]["sentiment_correct"], true);
    assert_eq!(json["sentiment_intent"]["intent_correct"], false);
    assert_eq!(json["soap"]["section_completeness"], 0.5);
    assert_eq!(json["soap"]["all_sections_present"], false);
}
