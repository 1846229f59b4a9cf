//! Theme system for the TUI.
//!
//! Semantic color roles mapped to ratatui `Style` values. `ThemeVariant`
//! selects between the Dark and Light palettes and can be cycled at runtime.

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from config (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Cycle to the next variant: Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Human-readable name for status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette — semantic roles to Style
// ============================================================================

/// A complete palette mapping every semantic UI role to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Search bar --
    pub search_bar_topic: Style,
    pub search_bar_placeholder: Style,

    // -- For-you view --
    pub card_title: Style,
    pub card_description: Style,
    pub card_selected: Style,
    pub card_icon: Style,
    pub chip_normal: Style,
    pub chip_selected: Style,

    // -- Result view --
    pub result_heading: Style,
    pub result_body: Style,
    pub result_row: Style,
    pub result_row_selected: Style,
    pub result_link: Style,
    pub result_error: Style,
    pub read_more_hint: Style,
    pub save_idle: Style,
    pub save_pending: Style,
    pub save_done: Style,
    pub save_failed: Style,

    // -- Sidebar --
    pub sidebar_heading: Style,
    pub sidebar_entry: Style,
    pub sidebar_entry_selected: Style,
    pub sidebar_empty: Style,

    // -- Overlays --
    pub overlay_border: Style,
    pub overlay_input: Style,
    pub overlay_suggestion: Style,
    pub overlay_suggestion_selected: Style,
    pub overlay_hint: Style,
    pub lang_selected_mark: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
    pub loading_spinner: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            search_bar_topic: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            search_bar_placeholder: Style::default().fg(Color::DarkGray),

            card_title: Style::default().add_modifier(Modifier::BOLD),
            card_description: Style::default().fg(Color::Gray),
            card_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            card_icon: Style::default().fg(Color::Green),
            chip_normal: Style::default().fg(Color::Gray),
            chip_selected: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),

            result_heading: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            result_body: Style::default(),
            result_row: Style::default(),
            result_row_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            result_link: Style::default().fg(Color::Cyan),
            result_error: Style::default().fg(Color::Red),
            read_more_hint: Style::default().fg(Color::Green),
            save_idle: Style::default().fg(Color::DarkGray),
            save_pending: Style::default().fg(Color::Yellow),
            save_done: Style::default().fg(Color::Green),
            save_failed: Style::default().fg(Color::Red),

            sidebar_heading: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            sidebar_entry: Style::default().fg(Color::Gray),
            sidebar_entry_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            sidebar_empty: Style::default().fg(Color::DarkGray),

            overlay_border: Style::default().fg(Color::Green),
            overlay_input: Style::default().fg(Color::White),
            overlay_suggestion: Style::default().fg(Color::Gray),
            overlay_suggestion_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            overlay_hint: Style::default().fg(Color::DarkGray),
            lang_selected_mark: Style::default().fg(Color::Green),

            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),
            loading_spinner: Style::default().fg(Color::Green),
        }
    }

    /// Light palette — adapted for light terminal backgrounds.
    fn light() -> Self {
        Self {
            search_bar_topic: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            search_bar_placeholder: Style::default().fg(Color::DarkGray),

            card_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            card_description: Style::default().fg(Color::DarkGray),
            card_selected: Style::default().bg(Color::Blue).fg(Color::White),
            card_icon: Style::default().fg(Color::Green),
            chip_normal: Style::default().fg(Color::DarkGray),
            chip_selected: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),

            result_heading: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            result_body: Style::default().fg(Color::Black),
            result_row: Style::default().fg(Color::Black),
            result_row_selected: Style::default().bg(Color::Blue).fg(Color::White),
            result_link: Style::default().fg(Color::Blue),
            result_error: Style::default().fg(Color::Red),
            read_more_hint: Style::default().fg(Color::Green),
            save_idle: Style::default().fg(Color::DarkGray),
            save_pending: Style::default().fg(Color::Yellow),
            save_done: Style::default().fg(Color::Green),
            save_failed: Style::default().fg(Color::Red),

            sidebar_heading: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            sidebar_entry: Style::default().fg(Color::DarkGray),
            sidebar_entry_selected: Style::default().bg(Color::Blue).fg(Color::White),
            sidebar_empty: Style::default().fg(Color::DarkGray),

            overlay_border: Style::default().fg(Color::Green),
            overlay_input: Style::default().fg(Color::Black),
            overlay_suggestion: Style::default().fg(Color::DarkGray),
            overlay_suggestion_selected: Style::default().bg(Color::Blue).fg(Color::White),
            overlay_hint: Style::default().fg(Color::Gray),
            lang_selected_mark: Style::default().fg(Color::Green),

            status_bar: Style::default().bg(Color::Gray).fg(Color::Black),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Blue),
            loading_spinner: Style::default().fg(Color::Green),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_name() {
        assert_eq!(ThemeVariant::from_str_name("dark"), Some(ThemeVariant::Dark));
        assert_eq!(ThemeVariant::from_str_name("LIGHT"), Some(ThemeVariant::Light));
        assert_eq!(ThemeVariant::from_str_name("solarized"), None);
    }

    #[test]
    fn test_cycle_round_trips() {
        assert_eq!(ThemeVariant::Dark.next().next(), ThemeVariant::Dark);
    }

    #[test]
    fn test_palettes_build() {
        let _ = ThemeVariant::Dark.palette();
        let _ = ThemeVariant::Light.palette();
    }
}
