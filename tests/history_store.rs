//! Integration tests for history persistence and its invariants.
//!
//! Each test creates its own in-memory SQLite database for isolation.

use std::collections::HashSet;

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use lore::api::ApiClient;
use lore::app::App;
use lore::config::Config;
use lore::storage::{Database, HISTORY_KEY, MAX_HISTORY};

async fn test_db() -> Database {
    Database::open(":memory:").await.unwrap()
}

async fn test_app(db: Database) -> App {
    let api = ApiClient::new("http://127.0.0.1:5001").unwrap();
    App::new(db, api, &Config::default()).unwrap()
}

// ============================================================================
// Persistence Round Trips
// ============================================================================

#[tokio::test]
async fn test_history_survives_restart() {
    let db = test_db().await;

    let mut app = test_app(db.clone()).await;
    app.push_history("The Roman Empire");
    app.push_history("Quantum Computing");
    db.save_search_history(&app.history).await;

    // "Next session": new app, same database
    let mut next = test_app(db.clone()).await;
    next.history = db.load_search_history().await;

    assert_eq!(
        next.history,
        vec!["Quantum Computing".to_string(), "The Roman Empire".to_string()]
    );
}

#[tokio::test]
async fn test_stored_value_is_a_json_array() {
    let db = test_db().await;
    db.save_search_history(&["A".to_string(), "B".to_string()])
        .await;

    let raw = db.get_value(HISTORY_KEY).await.unwrap().unwrap();
    let parsed: Vec<String> = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed, vec!["A".to_string(), "B".to_string()]);
}

#[tokio::test]
async fn test_corrupt_history_degrades_to_empty() {
    let db = test_db().await;
    db.set_value(HISTORY_KEY, "]]]garbage[[[").await.unwrap();

    assert!(db.load_search_history().await.is_empty());
}

#[tokio::test]
async fn test_overlong_persisted_history_is_clamped_on_load() {
    let db = test_db().await;
    let oversized: Vec<String> = (0..20).map(|i| format!("topic {}", i)).collect();
    db.set_value(HISTORY_KEY, &serde_json::to_string(&oversized).unwrap())
        .await
        .unwrap();

    let loaded = db.load_search_history().await;
    assert_eq!(loaded.len(), MAX_HISTORY);
    assert_eq!(loaded[0], "topic 0");
}

#[tokio::test]
async fn test_reset_clears_history() {
    let db = test_db().await;
    db.save_search_history(&["A".to_string()]).await;
    db.delete_value(HISTORY_KEY).await.unwrap();

    assert!(db.load_search_history().await.is_empty());
}

// ============================================================================
// Invariants Under Arbitrary Push Sequences
// ============================================================================

proptest! {
    /// For any sequence of pushed topics: length stays ≤ 7, entries are
    /// case-insensitively unique, and the most recent push is in front.
    #[test]
    fn prop_history_invariants(topics in proptest::collection::vec("[A-Za-z0-9 ]{1,16}", 1..40)) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        let (history, last_pushed) = rt.block_on(async {
            let mut app = test_app(test_db().await).await;
            let mut last = None;
            for topic in &topics {
                let trimmed = topic.trim();
                if trimmed.is_empty() {
                    continue;
                }
                app.push_history(trimmed);
                last = Some(trimmed.to_string());
            }
            (app.history, last)
        });

        prop_assert!(history.len() <= MAX_HISTORY);

        let mut seen = HashSet::new();
        for topic in &history {
            prop_assert!(seen.insert(topic.to_lowercase()), "duplicate: {}", topic);
        }

        if let Some(last) = last_pushed {
            prop_assert_eq!(&history[0], &last);
        }
    }
}
