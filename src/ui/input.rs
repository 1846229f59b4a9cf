//! Input handling for the TUI.
//!
//! Modal surfaces (help, language menu, search overlay) capture raw keys
//! first; everything else resolves through the typed routing table and is
//! dispatched from the single `match` below.

use crate::app::{App, AppEvent, ContentView, Focus, ResultRow};
use crate::catalog::{CATEGORIES, LANGUAGES};
use crate::keys::{Action as KbAction, Context as KbContext};
use crate::nav::NavEntry;
use crate::search::{start_search, SearchOrigin};
use crate::util::{validate_url_for_open, MAX_TOPIC_LENGTH};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::helpers::spawn_save;
use super::Action;

/// Lines the explanation scrolls per keypress.
const EXPLANATION_SCROLL_STEP: u16 = 3;

/// Main input dispatch function.
pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    mut modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    // Terminals report shifted characters ('?', uppercase) with SHIFT set;
    // the char itself already carries the shift.
    if matches!(code, KeyCode::Char(_)) {
        modifiers.remove(KeyModifiers::SHIFT);
    }

    // Modal surfaces capture all keys while visible
    if app.show_help {
        return Ok(handle_help_input(app, code));
    }
    if app.lang_menu.is_some() {
        handle_lang_menu_input(app, code, event_tx);
        return Ok(Action::Continue);
    }
    if app.overlay.is_some() {
        handle_overlay_input(app, code, modifiers, event_tx);
        return Ok(Action::Continue);
    }

    let context = if app.focus == Focus::Sidebar {
        KbContext::Sidebar
    } else {
        match app.view {
            ContentView::ForYou => KbContext::ForYou,
            ContentView::Result => KbContext::Result,
            _ => KbContext::Global,
        }
    };

    let Some(action) = app.keys.action_for_key(code, modifiers, context) else {
        return Ok(Action::Continue);
    };

    match action {
        KbAction::Quit => return Ok(Action::Quit),
        KbAction::NavDown => app.nav_down(),
        KbAction::NavUp => app.nav_up(),
        KbAction::CycleFocus => app.cycle_focus(),
        KbAction::Select => handle_select(app, event_tx),
        KbAction::OpenSearch => app.open_overlay(),
        KbAction::ToggleLangMenu => app.toggle_lang_menu(),
        KbAction::NavBack => nav_back(app, event_tx),
        KbAction::NavForward => nav_forward(app, event_tx),
        KbAction::CategoryPrev => cycle_category(app, -1),
        KbAction::CategoryNext => cycle_category(app, 1),
        KbAction::SaveItem => {
            if let Some(row) = app.selected_result_row() {
                spawn_save(app, row, event_tx);
            }
        }
        KbAction::ReadMore => handle_read_more(app),
        KbAction::OpenExternal => open_selected(app),
        KbAction::OpenQuiz => open_quiz(app),
        KbAction::ScrollDown => {
            app.explanation_scroll = app.explanation_scroll.saturating_add(EXPLANATION_SCROLL_STEP);
        }
        KbAction::ScrollUp => {
            app.explanation_scroll = app.explanation_scroll.saturating_sub(EXPLANATION_SCROLL_STEP);
        }
        KbAction::CycleTheme => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {}", name));
        }
        KbAction::ShowHelp => {
            app.show_help = true;
            app.needs_redraw = true;
        }
    }

    Ok(Action::Continue)
}

/// Help overlay: any dismiss key closes, everything else is ignored.
fn handle_help_input(app: &mut App, code: KeyCode) -> Action {
    if matches!(
        code,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?')
    ) {
        app.show_help = false;
        app.needs_redraw = true;
    }
    Action::Continue
}

/// Language menu: navigate, select (re-issuing the active search under the
/// new language), or dismiss.
fn handle_lang_menu_input(app: &mut App, code: KeyCode, event_tx: &mpsc::Sender<AppEvent>) {
    let Some(selected) = app.lang_menu else {
        return;
    };

    match code {
        KeyCode::Esc | KeyCode::Char('l') => {
            app.lang_menu = None;
            app.needs_redraw = true;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.lang_menu = Some((selected + 1).min(LANGUAGES.len() - 1));
            app.needs_redraw = true;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.lang_menu = Some(selected.saturating_sub(1));
            app.needs_redraw = true;
        }
        KeyCode::Enter => {
            app.lang_menu = None;
            app.set_language(LANGUAGES[selected].code);
            // An active search is re-issued under the (possibly new)
            // language, mirroring a fresh submit.
            if !app.current_topic.is_empty() {
                let topic = app.current_topic.clone();
                start_search(app, &topic, SearchOrigin::User, event_tx);
            }
            app.needs_redraw = true;
        }
        _ => {}
    }
}

/// Search overlay: text editing, suggestion navigation, submit, dismiss.
fn handle_overlay_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) {
    match code {
        KeyCode::Esc => app.close_overlay(),
        KeyCode::Enter => {
            let picked = app.overlay.as_ref().and_then(|o| {
                o.selected
                    .and_then(|i| o.suggestions.get(i).copied())
            });
            if let Some(suggestion) = picked {
                // Selecting a suggestion fills the input and searches at once
                if let Some(overlay) = &mut app.overlay {
                    overlay.input = suggestion.to_string();
                    overlay.suggestions.clear();
                    overlay.selected = None;
                }
                start_search(app, suggestion, SearchOrigin::User, event_tx);
                return;
            }

            let query = app
                .overlay
                .as_ref()
                .map(|o| o.input.trim().to_string())
                .unwrap_or_default();
            // Blank submits are swallowed; the overlay stays open
            start_search(app, &query, SearchOrigin::User, event_tx);
        }
        KeyCode::Down | KeyCode::Tab => {
            if let Some(overlay) = &mut app.overlay {
                if !overlay.suggestions.is_empty() {
                    overlay.selected = Some(match overlay.selected {
                        Some(i) => (i + 1).min(overlay.suggestions.len() - 1),
                        None => 0,
                    });
                    app.needs_redraw = true;
                }
            }
        }
        KeyCode::Up => {
            if let Some(overlay) = &mut app.overlay {
                overlay.selected = match overlay.selected {
                    Some(0) | None => None,
                    Some(i) => Some(i - 1),
                };
                app.needs_redraw = true;
            }
        }
        KeyCode::Backspace => {
            if let Some(overlay) = &mut app.overlay {
                if overlay.select_all {
                    overlay.input.clear();
                    overlay.select_all = false;
                } else {
                    overlay.input.pop();
                }
            }
            app.refresh_suggestions();
            app.needs_redraw = true;
        }
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(overlay) = &mut app.overlay {
                if overlay.select_all {
                    overlay.input.clear();
                    overlay.select_all = false;
                }
                if overlay.input.chars().count() < MAX_TOPIC_LENGTH {
                    overlay.input.push(c);
                }
            }
            app.refresh_suggestions();
            app.needs_redraw = true;
        }
        _ => {}
    }
}

/// Enter key: replay a history entry, search a recommendation card, or open
/// the selected result item.
fn handle_select(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    if app.focus == Focus::Sidebar {
        if let Some(topic) = app.history.get(app.sidebar_selected).cloned() {
            start_search(app, &topic, SearchOrigin::User, event_tx);
        }
        return;
    }

    match app.view {
        ContentView::ForYou => {
            let topic = app
                .visible_cards()
                .get(app.selected_card)
                .map(|rec| rec.title);
            if let Some(topic) = topic {
                start_search(app, topic, SearchOrigin::User, event_tx);
            }
        }
        ContentView::Result => open_selected(app),
        _ => {}
    }
}

/// Reveal the full explanation. One-way: the hint disappears afterwards and
/// no second fetch happens — both variants were kept from the response.
fn handle_read_more(app: &mut App) {
    let has_long = app
        .result
        .as_ref()
        .map(|r| !r.ai_explanation_long.trim().is_empty())
        .unwrap_or(false);
    if has_long && !app.explanation_expanded {
        app.explanation_expanded = true;
        app.explanation_scroll = 0;
        app.needs_redraw = true;
    }
}

/// Back: replay the previous entry as a fresh search, or land on for-you.
fn nav_back(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    let entry = app.nav.back().cloned();
    match entry {
        Some(NavEntry::Search { topic }) => {
            start_search(app, &topic, SearchOrigin::NavReplay, event_tx);
        }
        Some(NavEntry::ForYou) => app.show_for_you(),
        None => app.set_status("Already at the oldest view"),
    }
}

/// Forward counterpart of [`nav_back`].
fn nav_forward(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    let entry = app.nav.forward().cloned();
    match entry {
        Some(NavEntry::Search { topic }) => {
            start_search(app, &topic, SearchOrigin::NavReplay, event_tx);
        }
        Some(NavEntry::ForYou) => app.show_for_you(),
        None => app.set_status("Already at the newest view"),
    }
}

/// Step the category filter left/right, wrapping at the ends.
fn cycle_category(app: &mut App, delta: isize) {
    let idx = CATEGORIES
        .iter()
        .position(|c| c.id == app.category.id)
        .unwrap_or(0);
    let len = CATEGORIES.len() as isize;
    let next = (idx as isize + delta).rem_euclid(len) as usize;
    app.set_category(CATEGORIES[next].id);
}

/// Open the selected result row externally.
fn open_selected(app: &mut App) {
    let Some(result) = &app.result else {
        return;
    };

    let url = match app.selected_result_row() {
        Some(ResultRow::Video(i)) => result.youtube_videos.get(i).map(|v| v.watch_url()),
        Some(ResultRow::Article(i)) => result.articles.get(i).map(|a| a.link.clone()),
        Some(ResultRow::Quiz) => Some(app.api.quiz_url(&app.current_topic)),
        _ => None,
    };

    if let Some(url) = url {
        open_external(app, &url);
    }
}

/// Open the quiz for the current topic.
fn open_quiz(app: &mut App) {
    if app.current_topic.is_empty() {
        return;
    }
    let url = app.api.quiz_url(&app.current_topic);
    open_external(app, &url);
}

fn open_external(app: &mut App, url: &str) {
    if let Err(e) = validate_url_for_open(url) {
        app.set_status(e);
    } else if let Err(e) = open::that(url) {
        app.set_status(format!("Failed to open browser: {}", e));
    } else {
        app.set_status("Opening in browser...");
    }
}
