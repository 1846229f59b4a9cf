//! Search orchestration.
//!
//! Drives a search from user input through one asynchronous request to a
//! rendered result or inline error. The machine is: idle → loading →
//! (result | error) → idle. Entering loading updates the history, the
//! search-bar label, the navigation stack, and the content area, then spawns
//! exactly one request — no retry, no debounce.
//!
//! Overlapping searches are not cancelled. Instead every invocation bumps
//! `App::search_generation` and the completion handler applies only the
//! response carrying the latest generation, so a slow early response can
//! never overwrite a later search.

use crate::app::{App, AppEvent};
use crate::nav::NavEntry;
use crate::util::catch_task_panic;
use tokio::sync::mpsc;

/// Where a search was initiated from.
///
/// Back/forward replays re-run the identical search path but must not push
/// a new navigation entry, or the stack would grow on every back press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOrigin {
    /// Any user-originated search: overlay submit, suggestion pick, history
    /// entry, recommendation card, language re-issue, deep link.
    User,
    /// Replay driven by the navigation stack.
    NavReplay,
}

/// Begin a search for `topic`.
///
/// Blank or whitespace-only topics are rejected silently — no state change,
/// no error surfaced. Returns whether a search was actually started.
pub fn start_search(
    app: &mut App,
    topic: &str,
    origin: SearchOrigin,
    event_tx: &mpsc::Sender<AppEvent>,
) -> bool {
    let topic = topic.trim();
    if topic.is_empty() {
        tracing::debug!("Ignoring blank search topic");
        return false;
    }
    let topic = topic.to_string();

    // History first: dedupe + push + background persist. Persistence
    // failures log and degrade; they never block the search.
    app.push_history(&topic);
    let db = app.db.clone();
    let snapshot = app.history.clone();
    tokio::spawn(async move {
        db.save_search_history(&snapshot).await;
    });

    app.begin_loading(&topic);

    if origin == SearchOrigin::User {
        app.nav.push(NavEntry::Search {
            topic: topic.clone(),
        });
    }

    app.search_generation = app.search_generation.wrapping_add(1);
    let generation = app.search_generation;
    let api = app.api.clone();
    let language = app.language.code;
    let tx = event_tx.clone();

    tracing::debug!(topic = %topic, language, generation, "Spawning search task");

    tokio::spawn(async move {
        let result = match catch_task_panic(api.search(&topic, language)).await {
            Ok(outcome) => outcome.map_err(|e| e.to_string()),
            Err(panic_msg) => {
                tracing::error!(error = %panic_msg, "Search task panicked");
                let _ = tx
                    .send(AppEvent::TaskPanicked {
                        task: "search",
                        error: panic_msg,
                    })
                    .await;
                return;
            }
        };

        let event = AppEvent::SearchCompleted {
            topic,
            generation,
            result,
        };
        if tx.send(event).await.is_err() {
            tracing::warn!("Failed to send search result (receiver dropped)");
        }
    });

    true
}
