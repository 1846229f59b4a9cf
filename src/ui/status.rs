//! Status bar: transient messages, else per-context key hints.

use crate::app::{App, ContentView, Focus};
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    // Cow avoids allocations for the static hint strings
    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else if app.overlay.is_some() {
        Cow::Borrowed("Type to search | ↓/↑ suggestions | ENTER search | ESC close")
    } else if app.lang_menu.is_some() {
        Cow::Borrowed("j/k select | ENTER apply | ESC close")
    } else if app.focus == Focus::Sidebar {
        Cow::Borrowed("[j/k]history [Enter]search again [Tab]content [q]uit")
    } else {
        match &app.view {
            ContentView::ForYou => Cow::Borrowed(
                "[/]search [Enter]open topic [←/→]category [Tab]history [l]anguage [?]help [q]uit",
            ),
            ContentView::Result => Cow::Borrowed(
                "[j/k]items [Enter]open [s]ave [m]ore [z]quiz [[]back []]forward [?]help [q]uit",
            ),
            ContentView::Loading => Cow::Borrowed("Searching..."),
            ContentView::Error { .. } => {
                Cow::Borrowed("[/]search again [[]back [Tab]history [q]uit")
            }
        }
    };

    let paragraph = Paragraph::new(text).style(app.theme.status_bar);
    f.render_widget(paragraph, area);
}
