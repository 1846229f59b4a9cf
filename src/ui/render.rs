//! Render functions for the TUI.
//!
//! Layout: a search bar on top, the content area and sidebar side by side,
//! a status bar at the bottom. Modal overlays (search, language menu, help)
//! draw on top of everything.

use crate::app::{App, ContentView, Focus};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{foryou, overlay, result, sidebar, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 60;
pub(super) const MIN_HEIGHT: u16 = 12;

/// Spinner frames for the loading indicator.
const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Search-bar placeholder when no topic is active.
const SEARCH_PLACEHOLDER: &str = "What do you want to learn today?";

/// Main render dispatch function.
pub(super) fn render(f: &mut Frame, app: &App) {
    let area = f.area();

    // Guard against zero-size areas to prevent panics
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_search_bar(f, app, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(72), Constraint::Percentage(28)])
        .split(chunks[1]);

    render_content(f, app, main_chunks[0]);
    sidebar::render(f, app, main_chunks[1]);
    status::render(f, app, chunks[2]);

    // Modal overlays draw last, on top of the main layout
    if app.overlay.is_some() {
        overlay::render_search_overlay(f, app);
    }
    if app.lang_menu.is_some() {
        overlay::render_lang_menu(f, app);
    }
    if app.show_help {
        overlay::render_help(f, app);
    }
}

/// The always-visible search bar: current topic or placeholder.
fn render_search_bar(f: &mut Frame, app: &App, area: Rect) {
    let label = if app.current_topic.is_empty() {
        Span::styled(SEARCH_PLACEHOLDER, app.theme.search_bar_placeholder)
    } else {
        Span::styled(app.current_topic.as_str(), app.theme.search_bar_topic)
    };

    let line = Line::from(vec![
        Span::raw(" "),
        label,
        Span::raw("  "),
        Span::styled("(/ to search)", app.theme.search_bar_placeholder),
    ]);

    let bar = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.theme.panel_border),
    );
    f.render_widget(bar, area);
}

/// Content area dispatch: for-you, loading, result, or inline error.
fn render_content(f: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.focus == Focus::Content {
        app.theme.panel_border_focused
    } else {
        app.theme.panel_border
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    f.render_widget(block, area);

    match &app.view {
        ContentView::ForYou => foryou::render(f, app, inner),
        ContentView::Loading => render_loading(f, app, inner),
        ContentView::Result => result::render(f, app, inner),
        ContentView::Error { message } => render_error(f, app, inner, message),
    }
}

/// Centered loading indicator with the animated spinner.
fn render_loading(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let frame = SPINNER[app.spinner_frame % SPINNER.len()];
    let line = Line::from(vec![
        Span::styled(frame, app.theme.loading_spinner),
        Span::raw(format!("  Searching \"{}\"...", app.current_topic)),
    ]);
    let paragraph = Paragraph::new(line).alignment(Alignment::Center);
    f.render_widget(paragraph, chunks[1]);
}

/// Centered inline error, with the server message when one was supplied.
fn render_error(f: &mut Frame, app: &App, area: Rect, message: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Min(1),
        ])
        .split(area);

    let paragraph = Paragraph::new(format!("Error: {}", message))
        .style(app.theme.result_error)
        .alignment(Alignment::Center)
        .wrap(ratatui::widgets::Wrap { trim: true });
    f.render_widget(paragraph, chunks[1]);
}
