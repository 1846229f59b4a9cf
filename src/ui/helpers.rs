//! Shared UI helpers: spawning save tasks.

use crate::app::{App, AppEvent, ResultRow, SaveKind, SaveSlot};
use crate::util::catch_task_panic;
use tokio::sync::mpsc;

/// Spawn a save POST for the given result row, if it is saveable.
///
/// A row in `Saved` state is disabled; `Saving` ignores re-presses; `Idle`
/// and `Failed` (retry) both start a request. The completion carries the
/// current search generation so it cannot touch a later result set.
pub(super) fn spawn_save(app: &mut App, row: ResultRow, event_tx: &mpsc::Sender<AppEvent>) {
    let Some(result) = &app.result else {
        return;
    };

    let (kind, index) = match row {
        ResultRow::Video(i) => (SaveKind::Video, i),
        ResultRow::Article(i) => (SaveKind::Article, i),
        _ => return,
    };

    match app.save_slot(row) {
        Some(SaveSlot::Idle) | Some(SaveSlot::Failed) => {}
        Some(SaveSlot::Saving) | Some(SaveSlot::Saved) | None => return,
    }

    let api = app.api.clone();
    let generation = app.search_generation;
    let tx = event_tx.clone();

    // Clone the payload out before mutating the slot
    enum Payload {
        Video(crate::api::Video),
        Article(crate::api::ArticleHit),
    }
    let payload = match kind {
        SaveKind::Video => Payload::Video(result.youtube_videos[index].clone()),
        SaveKind::Article => Payload::Article(result.articles[index].clone()),
    };

    app.set_save_slot(kind, index, SaveSlot::Saving);
    tracing::debug!(index, ?kind, "Spawning save task");

    tokio::spawn(async move {
        let outcome = catch_task_panic(async {
            match &payload {
                Payload::Video(v) => api.save_video(v).await,
                Payload::Article(a) => api.save_article(a).await,
            }
        })
        .await;

        let result = match outcome {
            Ok(inner) => inner.map_err(|e| e.to_string()),
            Err(panic_msg) => {
                tracing::error!(error = %panic_msg, "Save task panicked");
                let _ = tx
                    .send(AppEvent::TaskPanicked {
                        task: "save",
                        error: panic_msg,
                    })
                    .await;
                return;
            }
        };

        let event = AppEvent::SaveFinished {
            kind,
            index,
            generation,
            result,
        };
        if tx.send(event).await.is_err() {
            tracing::warn!("Failed to send save outcome (receiver dropped)");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::LearningResult;
    use crate::app::test_app;

    fn result_with_video() -> LearningResult {
        LearningResult {
            youtube_videos: vec![Default::default()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_save_marks_slot_saving() {
        let mut app = test_app().await;
        app.begin_loading("t");
        app.set_result(result_with_video());
        let (tx, _rx) = mpsc::channel(8);

        spawn_save(&mut app, ResultRow::Video(0), &tx);
        assert_eq!(app.video_saves[0], SaveSlot::Saving);
    }

    #[tokio::test]
    async fn test_saved_slot_is_disabled() {
        let mut app = test_app().await;
        app.begin_loading("t");
        app.set_result(result_with_video());
        app.set_save_slot(SaveKind::Video, 0, SaveSlot::Saved);
        let (tx, _rx) = mpsc::channel(8);

        spawn_save(&mut app, ResultRow::Video(0), &tx);
        // Still Saved: no second request started
        assert_eq!(app.video_saves[0], SaveSlot::Saved);
    }

    #[tokio::test]
    async fn test_failed_slot_allows_retry() {
        let mut app = test_app().await;
        app.begin_loading("t");
        app.set_result(result_with_video());
        app.set_save_slot(SaveKind::Video, 0, SaveSlot::Failed);
        let (tx, _rx) = mpsc::channel(8);

        spawn_save(&mut app, ResultRow::Video(0), &tx);
        assert_eq!(app.video_saves[0], SaveSlot::Saving);
    }

    #[tokio::test]
    async fn test_header_and_quiz_rows_not_saveable() {
        let mut app = test_app().await;
        app.begin_loading("t");
        app.set_result(result_with_video());
        let (tx, _rx) = mpsc::channel(8);

        spawn_save(&mut app, ResultRow::Quiz, &tx);
        spawn_save(&mut app, ResultRow::Header("x"), &tx);
        assert_eq!(app.video_saves[0], SaveSlot::Idle);
    }
}
