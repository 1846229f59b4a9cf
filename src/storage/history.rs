//! Search history persistence.
//!
//! The history is a JSON array of topic strings, most-recent-first, stored
//! under a fixed key. Loading must never fail the application: a missing or
//! corrupt value degrades to an empty list, and a value that violates the
//! in-memory invariants (too long, case-insensitive duplicates, blank
//! entries) is normalized rather than trusted.

use super::db::Database;

/// Durable key holding the history blob.
pub const HISTORY_KEY: &str = "search.history";

/// Maximum number of retained history entries.
pub const MAX_HISTORY: usize = 7;

impl Database {
    /// Load the persisted search history, degrading silently to empty.
    pub async fn load_search_history(&self) -> Vec<String> {
        let raw = match self.get_value(HISTORY_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read search history, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(topics) => normalize(topics),
            Err(e) => {
                tracing::warn!(error = %e, "Corrupt search history, starting empty");
                Vec::new()
            }
        }
    }

    /// Persist the search history. Failures are logged, never propagated —
    /// a full disk or locked database must not break searching.
    pub async fn save_search_history(&self, history: &[String]) {
        let json = match serde_json::to_string(history) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize search history");
                return;
            }
        };

        if let Err(e) = self.set_value(HISTORY_KEY, &json).await {
            tracing::warn!(error = %e, "Failed to persist search history");
        }
    }
}

/// Re-establish the history invariants on a deserialized list: no blank
/// entries, no case-insensitive duplicates (first occurrence wins, i.e. the
/// most recent), length capped.
fn normalize(topics: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut out = Vec::new();
    for topic in topics {
        let trimmed = topic.trim();
        if trimmed.is_empty() {
            continue;
        }
        let folded = trimmed.to_lowercase();
        if seen.contains(&folded) {
            continue;
        }
        seen.push(folded);
        out.push(trimmed.to_string());
        if out.len() == MAX_HISTORY {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> Database {
        Database::open(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn test_load_missing_is_empty() {
        let db = test_db().await;
        assert!(db.load_search_history().await.is_empty());
    }

    #[tokio::test]
    async fn test_round_trip() {
        let db = test_db().await;
        let history = vec!["Rust".to_string(), "Quantum Computing".to_string()];
        db.save_search_history(&history).await;
        assert_eq!(db.load_search_history().await, history);
    }

    #[tokio::test]
    async fn test_corrupt_value_degrades_to_empty() {
        let db = test_db().await;
        db.set_value(HISTORY_KEY, "{not json").await.unwrap();
        assert!(db.load_search_history().await.is_empty());
    }

    #[tokio::test]
    async fn test_wrong_shape_degrades_to_empty() {
        let db = test_db().await;
        db.set_value(HISTORY_KEY, r#"{"topics": []}"#).await.unwrap();
        assert!(db.load_search_history().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_normalizes_duplicates_and_length() {
        let db = test_db().await;
        let dirty: Vec<String> = vec![
            "Rome", "rome", "  ", "A", "B", "C", "D", "E", "F", "G",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        db.set_value(HISTORY_KEY, &serde_json::to_string(&dirty).unwrap())
            .await
            .unwrap();

        let loaded = db.load_search_history().await;
        assert_eq!(loaded.len(), MAX_HISTORY);
        assert_eq!(loaded[0], "Rome");
        assert!(!loaded.contains(&"rome".to_string()));
        assert!(!loaded.iter().any(|t| t.trim().is_empty()));
    }
}
