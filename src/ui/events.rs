//! Application event handling.
//!
//! Processes background task completions: search results (with the
//! stale-response generation gate) and save outcomes.

use crate::api::LearningResult;
use crate::app::{App, AppEvent, SaveKind, SaveSlot};

/// Handle application events from background tasks.
pub(super) fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::SearchCompleted {
            topic,
            generation,
            result,
        } => {
            handle_search_completed(app, topic, generation, result);
        }
        AppEvent::SaveFinished {
            kind,
            index,
            generation,
            result,
        } => {
            handle_save_finished(app, kind, index, generation, result);
        }
        AppEvent::TaskPanicked { task, error } => {
            tracing::error!(task, error, "Background task panicked");
            app.set_status(format!("Internal error in {} task", task));
        }
    }
}

/// Apply a search completion, or drop it if a newer search was issued.
fn handle_search_completed(
    app: &mut App,
    topic: String,
    generation: u64,
    result: Result<LearningResult, String>,
) {
    // Generation gate: only the latest issued search may touch the content
    // area, regardless of response arrival order.
    if generation != app.search_generation {
        tracing::debug!(
            expected = app.search_generation,
            got = generation,
            topic = %topic,
            "Ignoring stale search result (generation mismatch)"
        );
        return;
    }

    match result {
        Ok(data) => {
            tracing::info!(
                topic = %topic,
                videos = data.youtube_videos.len(),
                articles = data.articles.len(),
                "Search complete"
            );
            app.set_result(data);
            if app.overlay.is_some() {
                app.close_overlay();
            }
        }
        Err(message) => {
            tracing::warn!(topic = %topic, error = %message, "Search failed");
            app.set_error(message);
        }
    }
}

/// Resolve one save slot. Completions from a superseded result set are
/// dropped — the indexes would point into a different list.
fn handle_save_finished(
    app: &mut App,
    kind: SaveKind,
    index: usize,
    generation: u64,
    result: Result<String, String>,
) {
    if generation != app.search_generation {
        tracing::debug!(index, "Dropping save outcome for a superseded result");
        return;
    }

    match result {
        Ok(message) => {
            tracing::info!(index, message = %message, "Item saved");
            app.set_save_slot(kind, index, SaveSlot::Saved);
        }
        Err(error) => {
            tracing::warn!(index, error = %error, "Save failed");
            app.set_save_slot(kind, index, SaveSlot::Failed);
            app.set_status("Save failed (press s to retry)");
        }
    }
}
