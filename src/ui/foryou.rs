//! For-you view: category filter chips above the recommendation cards.

use crate::app::{App, Focus};
use crate::catalog::CATEGORIES;
use crate::util::truncate_to_width;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

/// Resolve a recommendation's icon key to a terminal glyph.
fn icon_glyph(key: &str) -> &'static str {
    match key {
        "code" => "</>",
        "hub" => " ◈ ",
        "design" => " ✎ ",
        "link" => " ⛓ ",
        "rocket" => " ↟ ",
        "memory" => " ▞ ",
        "biotech" => " ⚛ ",
        "psychology" => " ◉ ",
        "castle" => " ♜ ",
        "monument" => " ▲ ",
        "money" => " $ ",
        "stories" => " ❝ ",
        "campaign" => " ♪ ",
        "lotus" => " ❀ ",
        _ => " ◆ ",
    }
}

pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(area);

    let heading = Paragraph::new(vec![
        Line::styled("Recommended For You", app.theme.result_heading),
        Line::styled(
            "Not sure what to learn? Select an interest to get started.",
            app.theme.card_description,
        ),
    ]);
    f.render_widget(heading, chunks[0]);

    render_category_chips(f, app, chunks[1]);
    render_cards(f, app, chunks[2]);
}

/// One row of category names, the selected one highlighted.
fn render_category_chips(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    for (i, cat) in CATEGORIES.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ·  ", app.theme.chip_normal));
        }
        let style = if cat.id == app.category.id {
            app.theme.chip_selected
        } else {
            app.theme.chip_normal
        };
        spans.push(Span::styled(cat.name, style));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// The recommendation cards, two lines each.
fn render_cards(f: &mut Frame, app: &App, area: Rect) {
    let cards = app.visible_cards();

    let items: Vec<ListItem> = if cards.is_empty() {
        vec![ListItem::new("No recommendations in this category")]
    } else {
        cards
            .iter()
            .map(|rec| {
                let width = area.width.saturating_sub(6) as usize;
                let title = truncate_to_width(rec.title, width);
                let description = truncate_to_width(rec.description, width);
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(icon_glyph(rec.icon), app.theme.card_icon),
                        Span::raw(" "),
                        Span::styled(title.into_owned(), app.theme.card_title),
                    ]),
                    Line::from(vec![
                        Span::raw("     "),
                        Span::styled(description.into_owned(), app.theme.card_description),
                    ]),
                ])
            })
            .collect()
    };

    let list = List::new(items).highlight_style(app.theme.card_selected);

    let mut state = ListState::default();
    if app.focus == Focus::Content && !cards.is_empty() {
        state.select(Some(app.selected_card));
    }
    f.render_stateful_widget(list, area, &mut state);
}
