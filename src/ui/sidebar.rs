//! Sidebar: search history on the landing and error views, key concepts on
//! the result view, cleared while loading.

use crate::app::{App, ContentView, Focus};
use crate::util::truncate_to_width;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    match &app.view {
        ContentView::ForYou | ContentView::Error { .. } => render_history(f, app, area),
        ContentView::Loading => render_cleared(f, app, area),
        ContentView::Result => render_concepts(f, app, area),
    }
}

/// Clickable search history, most-recent-first.
fn render_history(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Sidebar;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            app.theme.panel_border_focused
        } else {
            app.theme.panel_border
        })
        .title(Span::styled(" Search History ", app.theme.sidebar_heading));

    if app.history.is_empty() {
        let empty = Paragraph::new("Your recent searches will appear here.")
            .style(app.theme.sidebar_empty)
            .block(block)
            .wrap(Wrap { trim: true });
        f.render_widget(empty, area);
        return;
    }

    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = app
        .history
        .iter()
        .map(|topic| {
            ListItem::new(Line::styled(
                format!(" {}", truncate_to_width(topic, width)),
                app.theme.sidebar_entry,
            ))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(app.theme.sidebar_entry_selected);

    let mut state = ListState::default();
    if focused {
        state.select(Some(app.sidebar_selected));
    }
    f.render_stateful_widget(list, area, &mut state);
}

/// Key concepts for the current result; an absent list leaves the panel
/// cleared.
fn render_concepts(f: &mut Frame, app: &App, area: Rect) {
    let concepts = app
        .result
        .as_ref()
        .map(|r| r.key_concepts.as_slice())
        .unwrap_or(&[]);

    if concepts.is_empty() {
        render_cleared(f, app, area);
        return;
    }

    let mut lines = Vec::new();
    for concept in concepts {
        lines.push(Line::styled(
            concept.term.clone(),
            app.theme.sidebar_heading,
        ));
        lines.push(Line::styled(
            concept.definition.clone(),
            app.theme.sidebar_entry,
        ));
        lines.push(Line::raw(""));
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.theme.panel_border)
                .title(Span::styled(" Key Concepts ", app.theme.sidebar_heading)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

/// Empty bordered panel: layout chrome stays, content is gone.
fn render_cleared(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.panel_border);
    f.render_widget(block, area);
}
