//! Key routing — maps key events to typed actions with config overrides.
//!
//! This is the interaction router: instead of scattering key matches across
//! handlers, every non-modal interaction is a discriminated `Action` resolved
//! through a per-context table and dispatched from a single site. Modal
//! surfaces (search overlay, language menu, help) capture raw keys before the
//! table is consulted.

use crossterm::event::{KeyCode, KeyModifiers};

// ============================================================================
// Action Enum
// ============================================================================

/// All user-facing actions that can be triggered by keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    NavDown,
    NavUp,
    CycleFocus,
    Select,
    OpenSearch,
    ToggleLangMenu,
    NavBack,
    NavForward,
    CategoryPrev,
    CategoryNext,
    SaveItem,
    ReadMore,
    OpenExternal,
    OpenQuiz,
    ScrollDown,
    ScrollUp,
    CycleTheme,
    ShowHelp,
}

impl Action {
    /// Human-readable description for the help overlay.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Quit => "Quit application",
            Self::NavDown => "Navigate down",
            Self::NavUp => "Navigate up",
            Self::CycleFocus => "Cycle panel focus",
            Self::Select => "Select / open",
            Self::OpenSearch => "Open search overlay",
            Self::ToggleLangMenu => "Open language menu",
            Self::NavBack => "Go back",
            Self::NavForward => "Go forward",
            Self::CategoryPrev => "Previous category",
            Self::CategoryNext => "Next category",
            Self::SaveItem => "Save selected item",
            Self::ReadMore => "Read full explanation",
            Self::OpenExternal => "Open selected item in browser",
            Self::OpenQuiz => "Open topic quiz",
            Self::ScrollDown => "Scroll explanation down",
            Self::ScrollUp => "Scroll explanation up",
            Self::CycleTheme => "Cycle theme",
            Self::ShowHelp => "Show help",
        }
    }

    /// Stable name used for config overrides.
    fn config_name(self) -> &'static str {
        match self {
            Self::Quit => "quit",
            Self::NavDown => "nav_down",
            Self::NavUp => "nav_up",
            Self::CycleFocus => "focus",
            Self::Select => "select",
            Self::OpenSearch => "open_search",
            Self::ToggleLangMenu => "language_menu",
            Self::NavBack => "back",
            Self::NavForward => "forward",
            Self::CategoryPrev => "category_prev",
            Self::CategoryNext => "category_next",
            Self::SaveItem => "save",
            Self::ReadMore => "read_more",
            Self::OpenExternal => "open",
            Self::OpenQuiz => "quiz",
            Self::ScrollDown => "scroll_down",
            Self::ScrollUp => "scroll_up",
            Self::CycleTheme => "theme",
            Self::ShowHelp => "help",
        }
    }
}

// ============================================================================
// Context Enum
// ============================================================================

/// Dispatch context — determines which bindings are active.
///
/// `Global` bindings apply in every context and are consulted last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Global,
    ForYou,
    Result,
    Sidebar,
}

// ============================================================================
// Key Specification
// ============================================================================

/// A key event: code + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }
}

/// Parse a key string from config into a KeySpec.
///
/// Supported formats:
/// - Single char: "q", "j", "/"
/// - Named keys: "Enter", "Esc", "Tab", "Up", "Down", "PageUp", "PageDown"
/// - Modifier combos: "Ctrl+d"
/// - Function keys: "F1" through "F12"
fn parse_key_string(s: &str) -> Option<KeySpec> {
    let s = s.trim();

    if let Some(rest) = s.strip_prefix("Ctrl+") {
        let rest = rest.trim();
        if rest.len() == 1 {
            return Some(KeySpec::ctrl(rest.chars().next()?));
        }
        return None;
    }

    match s.to_lowercase().as_str() {
        "enter" | "return" => return Some(KeySpec::plain(KeyCode::Enter)),
        "esc" | "escape" => return Some(KeySpec::plain(KeyCode::Esc)),
        "tab" => return Some(KeySpec::plain(KeyCode::Tab)),
        "up" => return Some(KeySpec::plain(KeyCode::Up)),
        "down" => return Some(KeySpec::plain(KeyCode::Down)),
        "left" => return Some(KeySpec::plain(KeyCode::Left)),
        "right" => return Some(KeySpec::plain(KeyCode::Right)),
        "pageup" => return Some(KeySpec::plain(KeyCode::PageUp)),
        "pagedown" => return Some(KeySpec::plain(KeyCode::PageDown)),
        "backspace" => return Some(KeySpec::plain(KeyCode::Backspace)),
        "space" => return Some(KeySpec::plain(KeyCode::Char(' '))),
        _ => {}
    }

    if let Some(num) = s.strip_prefix('F').or_else(|| s.strip_prefix('f')) {
        if let Ok(n) = num.parse::<u8>() {
            if (1..=12).contains(&n) {
                return Some(KeySpec::plain(KeyCode::F(n)));
            }
        }
    }

    if s.chars().count() == 1 {
        return Some(KeySpec::plain(KeyCode::Char(s.chars().next()?)));
    }

    None
}

/// Format a KeySpec as a human-readable string for the help overlay.
pub fn format_key(key: &KeySpec) -> String {
    let modifier = if key.modifiers.contains(KeyModifiers::CONTROL) {
        "Ctrl+"
    } else {
        ""
    };

    let key_name = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::PageUp => "PgUp".to_string(),
        KeyCode::PageDown => "PgDn".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        other => format!("{:?}", other),
    };

    format!("{}{}", modifier, key_name)
}

// ============================================================================
// Router
// ============================================================================

/// One row of the routing table.
#[derive(Debug, Clone, Copy)]
struct Binding {
    context: Context,
    key: KeySpec,
    action: Action,
}

/// Typed routing table with config overrides.
pub struct KeyRouter {
    bindings: Vec<Binding>,
}

impl KeyRouter {
    pub fn new() -> Self {
        use Action as A;
        use Context as C;
        use KeyCode as K;

        let defaults = [
            // Global chrome
            (C::Global, KeySpec::plain(K::Char('q')), A::Quit),
            (C::Global, KeySpec::plain(K::Char('/')), A::OpenSearch),
            (C::Global, KeySpec::plain(K::Char('l')), A::ToggleLangMenu),
            (C::Global, KeySpec::plain(K::Char('[')), A::NavBack),
            (C::Global, KeySpec::plain(K::Char(']')), A::NavForward),
            (C::Global, KeySpec::plain(K::Char('t')), A::CycleTheme),
            (C::Global, KeySpec::plain(K::Char('?')), A::ShowHelp),
            (C::Global, KeySpec::plain(K::Tab), A::CycleFocus),
            (C::Global, KeySpec::plain(K::Char('j')), A::NavDown),
            (C::Global, KeySpec::plain(K::Down), A::NavDown),
            (C::Global, KeySpec::plain(K::Char('k')), A::NavUp),
            (C::Global, KeySpec::plain(K::Up), A::NavUp),
            (C::Global, KeySpec::plain(K::Enter), A::Select),
            // For-you view
            (C::ForYou, KeySpec::plain(K::Left), A::CategoryPrev),
            (C::ForYou, KeySpec::plain(K::Right), A::CategoryNext),
            // Result view
            (C::Result, KeySpec::plain(K::Char('s')), A::SaveItem),
            (C::Result, KeySpec::plain(K::Char('m')), A::ReadMore),
            (C::Result, KeySpec::plain(K::Char('o')), A::OpenExternal),
            (C::Result, KeySpec::plain(K::Char('z')), A::OpenQuiz),
            (C::Result, KeySpec::plain(K::PageDown), A::ScrollDown),
            (C::Result, KeySpec::plain(K::PageUp), A::ScrollUp),
            (C::Result, KeySpec::ctrl('d'), A::ScrollDown),
            (C::Result, KeySpec::ctrl('u'), A::ScrollUp),
        ];

        Self {
            bindings: defaults
                .into_iter()
                .map(|(context, key, action)| Binding {
                    context,
                    key,
                    action,
                })
                .collect(),
        }
    }

    /// Apply config overrides: `action_name = "key"` rebinds every default
    /// row for that action to the new key. Unknown action names and
    /// unparseable key strings are warned about and skipped.
    pub fn apply_overrides(
        &mut self,
        overrides: &std::collections::HashMap<String, String>,
    ) {
        for (name, key_str) in overrides {
            let Some(key) = parse_key_string(key_str) else {
                tracing::warn!(key = %key_str, action = %name, "Unparseable keybinding override");
                continue;
            };
            let mut matched = false;
            for binding in &mut self.bindings {
                if binding.action.config_name() == name {
                    binding.key = key;
                    matched = true;
                }
            }
            if !matched {
                tracing::warn!(action = %name, "Unknown action in keybinding overrides");
            }
        }
    }

    /// Resolve a key event in a context. Context-specific rows win over
    /// `Global` rows.
    pub fn action_for_key(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        let key = KeySpec::new(code, modifiers);
        self.bindings
            .iter()
            .find(|b| b.context == context && b.key == key)
            .or_else(|| {
                self.bindings
                    .iter()
                    .find(|b| b.context == Context::Global && b.key == key)
            })
            .map(|b| b.action)
    }

    /// (key, description) pairs for the help overlay, grouped by context.
    pub fn help_entries(&self) -> Vec<(Context, String, &'static str)> {
        self.bindings
            .iter()
            .map(|b| (b.context, format_key(&b.key), b.action.describe()))
            .collect()
    }
}

impl Default for KeyRouter {
    fn default() -> Self {
        Self::new()
    }
}
