use anyhow::Context;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::{Intent, NlpOutput, Role, Sentiment, StoredAnalysis, Utterance};

fn now_string() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

// ── Conversations ──

pub fn create_conversation(conn: &Connection, id: &str) -> anyhow::Result<()> {
    let now = now_string();
    conn.execute(
        "INSERT INTO conversations (id, created_at, updated_at) VALUES (?1, ?2, ?2)",
        params![id, now],
    )?;
    Ok(())
}

pub fn conversation_exists(conn: &Connection, id: &str) -> anyhow::Result<bool> {
    let exists: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM conversations WHERE id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    Ok(exists)
}

/// Appends one utterance. Utterances are never updated or removed.
pub fn append_utterance(
    conn: &Connection,
    conversation_id: &str,
    utterance: &Utterance,
) -> anyhow::Result<i64> {
    conn.execute(
        "INSERT INTO utterances (conversation_id, role, text, timestamp) VALUES (?1, ?2, ?3, ?4)",
        params![
            conversation_id,
            utterance.role.as_str(),
            utterance.text,
            utterance.timestamp,
        ],
    )?;
    let id = conn.last_insert_rowid();

    conn.execute(
        "UPDATE conversations SET updated_at = ?1 WHERE id = ?2",
        params![now_string(), conversation_id],
    )?;
    Ok(id)
}

/// Utterances of one conversation in insertion order.
pub fn get_utterances(conn: &Connection, conversation_id: &str) -> anyhow::Result<Vec<Utterance>> {
    let mut stmt = conn.prepare(
        "SELECT role, text, timestamp FROM utterances WHERE conversation_id = ?1 ORDER BY id ASC",
    )?;

    let rows = stmt.query_map(params![conversation_id], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, Option<String>>(2)?,
        ))
    })?;

    let mut utterances = vec![];
    for row in rows {
        let (role, text, timestamp) = row?;
        let role = Role::parse(&role).with_context(|| format!("unknown role in store: {role}"))?;
        utterances.push(Utterance {
            role,
            text,
            timestamp,
        });
    }
    Ok(utterances)
}

// ── Analyses ──

pub fn save_analysis(
    conn: &Connection,
    conversation_id: &str,
    output: &NlpOutput,
) -> anyhow::Result<i64> {
    let summary = serde_json::to_string(&output.summary)?;
    let soap_note = serde_json::to_string(&output.soap_note)?;

    conn.execute(
        "INSERT INTO analyses (conversation_id, summary, sentiment, intent, soap_note, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            conversation_id,
            summary,
            output.sentiment.as_str(),
            output.intent.as_str(),
            soap_note,
            now_string(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn latest_analysis(
    conn: &Connection,
    conversation_id: &str,
) -> anyhow::Result<Option<StoredAnalysis>> {
    let row = conn
        .query_row(
            "SELECT id, summary, sentiment, intent, soap_note, created_at
             FROM analyses WHERE conversation_id = ?1 ORDER BY id DESC LIMIT 1",
            params![conversation_id],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                ))
            },
        )
        .optional()?;

    let Some((id, summary, sentiment, intent, soap_note, created_at)) = row else {
        return Ok(None);
    };

    let sentiment: Sentiment = serde_json::from_value(serde_json::Value::String(sentiment))
        .context("invalid stored sentiment")?;
    let intent: Intent = serde_json::from_value(serde_json::Value::String(intent))
        .context("invalid stored intent")?;

    Ok(Some(StoredAnalysis {
        id,
        conversation_id: conversation_id.to_string(),
        output: NlpOutput {
            summary: serde_json::from_str(&summary).context("invalid stored summary")?,
            sentiment,
            intent,
            soap_note: serde_json::from_str(&soap_note).context("invalid stored soap note")?,
        },
        created_at,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::nlp::{run_nlp_pipeline, Lexicon};

    fn conn() -> Connection {
        db::init_db(":memory:").unwrap()
    }

    #[test]
    fn test_utterances_keep_insertion_order() {
        let conn = conn();
        create_conversation(&conn, "c1").unwrap();
        assert!(conversation_exists(&conn, "c1").unwrap());
        assert!(!conversation_exists(&conn, "c2").unwrap());

        let turns = vec![
            Utterance::new(Role::Patient, "my neck hurts").with_timestamp("2026-01-01T10:00:00Z"),
            Utterance::new(Role::Physician, "since when?"),
            Utterance::new(Role::Patient, "two weeks"),
        ];
        for turn in &turns {
            append_utterance(&conn, "c1", turn).unwrap();
        }

        assert_eq!(get_utterances(&conn, "c1").unwrap(), turns);
        assert!(get_utterances(&conn, "c2").unwrap().is_empty());
    }

    #[test]
    fn test_latest_analysis() {
        let conn = conn();
        create_conversation(&conn, "c1").unwrap();
        assert!(latest_analysis(&conn, "c1").unwrap().is_none());

        let first = run_nlp_pipeline(
            &[Utterance::new(Role::Patient, "I have back pain")],
            Lexicon::shared(),
            10,
        );
        let second = run_nlp_pipeline(
            &[Utterance::new(Role::Patient, "I feel better, what a relief")],
            Lexicon::shared(),
            10,
        );
        save_analysis(&conn, "c1", &first).unwrap();
        let id = save_analysis(&conn, "c1", &second).unwrap();

        let stored = latest_analysis(&conn, "c1").unwrap().unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.output, second);
    }
}
