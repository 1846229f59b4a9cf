//! Modal overlays: search input with live suggestions, language menu, help.

use crate::app::App;
use crate::catalog::{LANGUAGES, TRENDING_TOPICS};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Center a `width` x `height` rect inside `area`, shrinking if needed.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Search overlay: input line, then suggestions or the trending hint block.
pub(super) fn render_search_overlay(f: &mut Frame, app: &App) {
    let Some(overlay) = &app.overlay else {
        return;
    };
    let area = f.area();

    let mut lines = vec![
        Line::from(vec![
            Span::styled("> ", app.theme.overlay_border),
            Span::styled(overlay.input.clone(), app.theme.overlay_input),
            Span::styled("_", app.theme.overlay_hint),
        ]),
        Line::raw(""),
    ];

    if !overlay.suggestions.is_empty() {
        for (i, suggestion) in overlay.suggestions.iter().enumerate() {
            let style = if overlay.selected == Some(i) {
                app.theme.overlay_suggestion_selected
            } else {
                app.theme.overlay_suggestion
            };
            lines.push(Line::styled(format!("  {}", suggestion), style));
        }
    } else {
        lines.push(Line::styled("Trending", app.theme.overlay_hint));
        for topic in TRENDING_TOPICS {
            lines.push(Line::styled(
                format!("  {}", topic),
                app.theme.overlay_suggestion,
            ));
        }
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "(Enter) Search  (↓/↑) Suggestions  (Esc) Close",
        app.theme.overlay_hint,
    ));

    let height = lines.len() as u16 + 2;
    let overlay_area = centered_rect(area, 64, height);
    if overlay_area.width < 20 || overlay_area.height < 5 {
        return;
    }

    f.render_widget(Clear, overlay_area);
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.theme.overlay_border)
            .title(" Search "),
    );
    f.render_widget(paragraph, overlay_area);
}

/// Language menu with a check mark on the active language.
pub(super) fn render_lang_menu(f: &mut Frame, app: &App) {
    let Some(selected) = app.lang_menu else {
        return;
    };
    let area = f.area();

    let mut lines = Vec::new();
    for (i, lang) in LANGUAGES.iter().enumerate() {
        let cursor = if i == selected { "> " } else { "  " };
        let mut spans = vec![
            Span::raw(cursor),
            Span::styled(
                lang.name,
                if i == selected {
                    app.theme.overlay_suggestion_selected
                } else {
                    app.theme.overlay_suggestion
                },
            ),
        ];
        if lang.code == app.language.code {
            spans.push(Span::styled("  ✓", app.theme.lang_selected_mark));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "(Enter) Select  (Esc) Close",
        app.theme.overlay_hint,
    ));

    let height = lines.len() as u16 + 2;
    let menu_area = centered_rect(area, 30, height);
    if menu_area.width < 16 || menu_area.height < 5 {
        return;
    }

    f.render_widget(Clear, menu_area);
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.theme.overlay_border)
            .title(" Language "),
    );
    f.render_widget(paragraph, menu_area);
}

/// Help overlay listing the active keybindings.
pub(super) fn render_help(f: &mut Frame, app: &App) {
    let area = f.area();

    let mut lines = Vec::new();
    for (_, key, description) in app.keys.help_entries() {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:>10}  ", key), app.theme.result_link),
            Span::styled(description, app.theme.overlay_suggestion),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled("(Esc) Close", app.theme.overlay_hint));

    let height = lines.len() as u16 + 2;
    let help_area = centered_rect(area, 56, height);
    if help_area.width < 24 || help_area.height < 6 {
        return;
    }

    f.render_widget(Clear, help_area);
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.theme.overlay_border)
            .title(" Help "),
    );
    f.render_widget(paragraph, help_area);
}
