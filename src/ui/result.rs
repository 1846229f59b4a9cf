//! Learning-result view.
//!
//! Top to bottom: the AI explanation (short text collapsed, full text after
//! read-more), then one list holding the video rows, article rows, and the
//! quiz call-to-action. Section headers are list rows too, skipped by
//! navigation.

use crate::app::{App, ResultRow, SaveSlot};
use crate::util::truncate_to_width;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Explanation panel height while collapsed (borders included).
const COLLAPSED_EXPLANATION_HEIGHT: u16 = 7;

pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    let Some(result) = &app.result else {
        return;
    };

    let has_explanation = !result.ai_explanation_short.trim().is_empty();
    let explanation_height = if !has_explanation {
        0
    } else if app.explanation_expanded {
        // Expanded text gets half the panel and scrolls within it
        (area.height / 2).max(COLLAPSED_EXPLANATION_HEIGHT)
    } else {
        COLLAPSED_EXPLANATION_HEIGHT.min(area.height)
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(explanation_height), Constraint::Min(0)])
        .split(area);

    if has_explanation {
        render_explanation(f, app, chunks[0]);
    }
    render_rows(f, app, chunks[1]);
}

/// AI explanation block with the read-more affordance.
fn render_explanation(f: &mut Frame, app: &App, area: Rect) {
    let Some(result) = &app.result else {
        return;
    };

    let mut lines = vec![Line::styled(
        result.ai_explanation_short.clone(),
        app.theme.result_body,
    )];

    if app.explanation_expanded {
        for paragraph in result
            .ai_explanation_long
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
        {
            lines.push(Line::raw(""));
            lines.push(Line::styled(paragraph.to_string(), app.theme.result_body));
        }
    } else if !result.ai_explanation_long.trim().is_empty() {
        // Hint disappears once expanded; expansion swaps in text we already
        // hold, no second request.
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "(m) Read full explanation →",
            app.theme.read_more_hint,
        ));
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.theme.panel_border)
                .title(Span::styled(" AI Explanation ", app.theme.result_heading)),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.explanation_scroll, 0));
    f.render_widget(paragraph, area);
}

/// Save-state label and style for a row.
fn save_label(app: &App, slot: SaveSlot) -> (&'static str, Style) {
    match slot {
        SaveSlot::Idle => ("[Save]", app.theme.save_idle),
        SaveSlot::Saving => ("[Saving...]", app.theme.save_pending),
        SaveSlot::Saved => ("[Saved ✓]", app.theme.save_done),
        SaveSlot::Failed => ("[Save failed: retry]", app.theme.save_failed),
    }
}

/// Video rows, article rows, and the quiz call-to-action.
fn render_rows(f: &mut Frame, app: &App, area: Rect) {
    let Some(result) = &app.result else {
        return;
    };

    let title_width = area.width.saturating_sub(28) as usize;
    let items: Vec<ListItem> = app
        .result_rows
        .iter()
        .map(|row| match *row {
            ResultRow::Header(title) => ListItem::new(vec![
                Line::raw(""),
                Line::styled(title, app.theme.result_heading),
            ]),
            ResultRow::Video(i) => {
                let video = &result.youtube_videos[i];
                let (label, style) =
                    save_label(app, app.video_saves.get(i).copied().unwrap_or(SaveSlot::Idle));
                ListItem::new(Line::from(vec![
                    Span::raw("  ▶ "),
                    Span::styled(
                        truncate_to_width(&video.title, title_width).into_owned(),
                        app.theme.result_row,
                    ),
                    Span::raw("  "),
                    Span::styled(label, style),
                ]))
            }
            ResultRow::Article(i) => {
                let article = &result.articles[i];
                let (label, style) = save_label(
                    app,
                    app.article_saves.get(i).copied().unwrap_or(SaveSlot::Idle),
                );
                ListItem::new(vec![
                    Line::from(vec![
                        Span::raw("  • "),
                        Span::styled(
                            truncate_to_width(&article.title, title_width).into_owned(),
                            app.theme.result_link,
                        ),
                        Span::raw("  "),
                        Span::styled(label, style),
                    ]),
                    Line::from(vec![
                        Span::raw("    "),
                        Span::styled(
                            truncate_to_width(&article.snippet, title_width).into_owned(),
                            app.theme.card_description,
                        ),
                    ]),
                ])
            }
            ResultRow::Quiz => ListItem::new(vec![
                Line::raw(""),
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        "➤ Test Your Knowledge (15-question quiz)",
                        app.theme.read_more_hint,
                    ),
                ]),
            ]),
        })
        .collect();

    let list = List::new(items).highlight_style(app.theme.result_row_selected);

    let mut state = ListState::default();
    state.select(Some(app.selected_row));
    f.render_stateful_widget(list, area, &mut state);
}
