use crate::api::{ApiClient, LearningResult};
use crate::catalog::{self, Category, Language};
use crate::config::Config;
use crate::keys::KeyRouter;
use crate::nav::NavStack;
use crate::storage::{Database, MAX_HISTORY};
use crate::theme::{ColorPalette, ThemeVariant};
use anyhow::Result;
use std::borrow::Cow;
use std::time::Duration;
use tokio::time::Instant;

/// How long a status message stays visible.
const STATUS_DURATION: Duration = Duration::from_secs(4);

// ============================================================================
// View and Focus Enums
// ============================================================================

/// What the content area currently shows.
///
/// This is the search state machine made visible: `Loading` is the machine's
/// in-flight state; `ForYou`, `Result`, and `Error` are all machine-idle and
/// accept the next search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentView {
    ForYou,
    Loading,
    Result,
    Error { message: String },
}

/// Which panel receives navigation keys.
///
/// The sidebar is only focusable while it shows the clickable search
/// history (i.e. outside the result view, where it shows key concepts).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Content,
    Sidebar,
}

// ============================================================================
// Result Rows
// ============================================================================

/// One row of the learning-result item list.
///
/// Headers are rendered but skipped by navigation. Indexes point into the
/// current `LearningResult`'s video/article vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultRow {
    Header(&'static str),
    Video(usize),
    Article(usize),
    Quiz,
}

impl ResultRow {
    pub fn selectable(self) -> bool {
        !matches!(self, ResultRow::Header(_))
    }
}

/// Per-item save progress.
///
/// `Saved` disables the save action for that row; `Failed` leaves it
/// enabled for retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveSlot {
    Idle,
    Saving,
    Saved,
    Failed,
}

/// Which save endpoint an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveKind {
    Video,
    Article,
}

// ============================================================================
// Overlay State
// ============================================================================

/// Search overlay: input buffer plus live suggestions.
#[derive(Debug, Default)]
pub struct OverlayState {
    pub input: String,
    pub suggestions: Vec<&'static str>,
    /// Highlighted suggestion, if any.
    pub selected: Option<usize>,
    /// Input was pre-filled from the current topic; the next edit replaces
    /// it wholesale (select-all semantics).
    pub select_all: bool,
}

// ============================================================================
// Events from background tasks
// ============================================================================

pub enum AppEvent {
    /// Search finished.
    ///
    /// `generation` is the counter value when this search was spawned; a
    /// completion whose generation is not the latest issued is discarded,
    /// so overlapping searches can never overwrite each other out of order.
    SearchCompleted {
        topic: String,
        generation: u64,
        result: Result<LearningResult, String>,
    },
    /// A save POST finished for one result row.
    ///
    /// Carries the search generation the item belonged to; a completion
    /// that outlives its result set is dropped.
    SaveFinished {
        kind: SaveKind,
        index: usize,
        generation: u64,
        result: Result<String, String>,
    },
    /// A background task panicked.
    TaskPanicked {
        task: &'static str,
        error: String,
    },
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state.
///
/// Created once at startup with the loaded history merged in, mutated only
/// through the orchestrator, overlay controller, and key router, and
/// dropped on exit.
pub struct App {
    pub db: Database,
    pub api: ApiClient,

    // Theme
    pub theme_variant: ThemeVariant,
    pub theme: ColorPalette,

    // Key routing
    pub keys: KeyRouter,

    // Selection state
    pub language: &'static Language,
    pub category: &'static Category,
    /// Empty exactly when the for-you view is displayed.
    pub current_topic: String,
    /// Most-recent-first, length ≤ MAX_HISTORY, case-insensitively unique.
    pub history: Vec<String>,

    // Content area
    pub view: ContentView,
    pub focus: Focus,
    pub result: Option<LearningResult>,
    pub result_rows: Vec<ResultRow>,
    pub selected_row: usize,
    pub explanation_expanded: bool,
    pub explanation_scroll: u16,
    pub video_saves: Vec<SaveSlot>,
    pub article_saves: Vec<SaveSlot>,

    // For-you view
    pub selected_card: usize,

    // Sidebar
    pub sidebar_selected: usize,

    // Modal surfaces
    pub overlay: Option<OverlayState>,
    /// Language menu with its highlighted index, or closed.
    pub lang_menu: Option<usize>,
    pub show_help: bool,

    // Navigation
    pub nav: NavStack,

    /// Sequence number for search invocations; completions are applied
    /// only when they carry the latest value.
    pub search_generation: u64,

    // Chrome
    pub status_message: Option<(Cow<'static, str>, Instant)>,
    pub needs_redraw: bool,
    pub spinner_frame: usize,
}

impl App {
    pub fn new(db: Database, api: ApiClient, config: &Config) -> Result<Self> {
        let theme_variant = ThemeVariant::from_str_name(&config.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "Unknown theme in config, using dark");
            ThemeVariant::Dark
        });

        let language = catalog::language_by_code(&config.language).unwrap_or_else(|| {
            tracing::warn!(language = %config.language, "Unknown language in config, using en");
            catalog::language_by_code("en").expect("en is in the catalog")
        });

        let mut keys = KeyRouter::new();
        keys.apply_overrides(&config.keybindings);

        Ok(Self {
            db,
            api,
            theme_variant,
            theme: theme_variant.palette(),
            keys,
            language,
            category: catalog::category_by_id("all").expect("all is in the catalog"),
            current_topic: String::new(),
            history: Vec::new(),
            view: ContentView::ForYou,
            focus: Focus::Content,
            result: None,
            result_rows: Vec::new(),
            selected_row: 0,
            explanation_expanded: false,
            explanation_scroll: 0,
            video_saves: Vec::new(),
            article_saves: Vec::new(),
            selected_card: 0,
            sidebar_selected: 0,
            overlay: None,
            lang_menu: None,
            show_help: false,
            nav: NavStack::new(),
            search_generation: 0,
            status_message: None,
            needs_redraw: true,
            spinner_frame: 0,
        })
    }

    // ========================================================================
    // Chrome
    // ========================================================================

    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
        self.needs_redraw = true;
    }

    /// Drop the status message once it expires. Returns true if cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, since)) = &self.status_message {
            if since.elapsed() >= STATUS_DURATION {
                self.status_message = None;
                return true;
            }
        }
        false
    }

    /// Switch theme variant and rebuild the palette.
    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = variant.palette();
        self.needs_redraw = true;
    }

    /// Cycle to the next theme; returns its name for status display.
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.set_theme(next);
        next.name()
    }

    // ========================================================================
    // State Store Mutations
    // ========================================================================

    /// Select a language by code. Returns true if the selection changed.
    pub fn set_language(&mut self, code: &str) -> bool {
        match catalog::language_by_code(code) {
            Some(lang) if lang.code != self.language.code => {
                self.language = lang;
                self.needs_redraw = true;
                true
            }
            Some(_) => false,
            None => {
                tracing::warn!(code, "Ignoring unknown language code");
                false
            }
        }
    }

    /// Select a category by id; unknown ids are ignored.
    pub fn set_category(&mut self, id: &str) {
        if let Some(cat) = catalog::category_by_id(id) {
            self.category = cat;
            self.selected_card = 0;
            self.needs_redraw = true;
        } else {
            tracing::warn!(id, "Ignoring unknown category id");
        }
    }

    /// Insert a topic at the front of the history, removing any prior
    /// case-insensitive match and capping the length.
    pub fn push_history(&mut self, topic: &str) {
        let folded = topic.to_lowercase();
        self.history.retain(|t| t.to_lowercase() != folded);
        self.history.insert(0, topic.to_string());
        self.history.truncate(MAX_HISTORY);
        self.sidebar_selected = 0;
    }

    /// Recommendations visible under the current category filter.
    pub fn visible_cards(&self) -> Vec<&'static catalog::Recommendation> {
        catalog::recommendations_for(self.category.id)
    }

    // ========================================================================
    // Content Area Transitions
    // ========================================================================

    /// Show the for-you landing view.
    ///
    /// Clears the current topic (the search-bar label falls back to its
    /// placeholder) and drops any previous result.
    pub fn show_for_you(&mut self) {
        self.view = ContentView::ForYou;
        self.current_topic.clear();
        self.result = None;
        self.result_rows.clear();
        self.video_saves.clear();
        self.article_saves.clear();
        self.selected_row = 0;
        self.focus = Focus::Content;
        self.selected_card = 0;
        self.needs_redraw = true;
    }

    /// Enter the loading state for a topic: label updated, content area and
    /// sidebar cleared.
    pub fn begin_loading(&mut self, topic: &str) {
        self.current_topic = topic.to_string();
        self.view = ContentView::Loading;
        self.result = None;
        self.result_rows.clear();
        self.video_saves.clear();
        self.article_saves.clear();
        self.selected_row = 0;
        self.explanation_expanded = false;
        self.explanation_scroll = 0;
        self.focus = Focus::Content;
        self.spinner_frame = 0;
        self.needs_redraw = true;
    }

    /// Display a fetched result and return the machine to idle.
    pub fn set_result(&mut self, result: LearningResult) {
        self.result_rows = build_result_rows(&result);
        self.video_saves = vec![SaveSlot::Idle; result.youtube_videos.len()];
        self.article_saves = vec![SaveSlot::Idle; result.articles.len()];
        self.result = Some(result);
        self.view = ContentView::Result;
        self.selected_row = self
            .result_rows
            .iter()
            .position(|r| r.selectable())
            .unwrap_or(0);
        self.explanation_expanded = false;
        self.explanation_scroll = 0;
        self.focus = Focus::Content;
        self.needs_redraw = true;
    }

    /// Display an inline search error and return the machine to idle.
    pub fn set_error(&mut self, message: String) {
        self.view = ContentView::Error { message };
        self.result = None;
        self.result_rows.clear();
        self.needs_redraw = true;
    }

    /// Row currently under the cursor in the result view.
    pub fn selected_result_row(&self) -> Option<ResultRow> {
        self.result_rows.get(self.selected_row).copied()
    }

    /// Save slot for a row, if it is a saveable item.
    pub fn save_slot(&self, row: ResultRow) -> Option<SaveSlot> {
        match row {
            ResultRow::Video(i) => self.video_saves.get(i).copied(),
            ResultRow::Article(i) => self.article_saves.get(i).copied(),
            _ => None,
        }
    }

    pub fn set_save_slot(&mut self, kind: SaveKind, index: usize, slot: SaveSlot) {
        let slots = match kind {
            SaveKind::Video => &mut self.video_saves,
            SaveKind::Article => &mut self.article_saves,
        };
        if let Some(s) = slots.get_mut(index) {
            *s = slot;
            self.needs_redraw = true;
        }
    }

    // ========================================================================
    // Navigation Within Panels
    // ========================================================================

    pub fn nav_down(&mut self) {
        match self.focus {
            Focus::Sidebar => {
                if !self.history.is_empty() {
                    self.sidebar_selected =
                        (self.sidebar_selected + 1).min(self.history.len() - 1);
                }
            }
            Focus::Content => match self.view {
                ContentView::ForYou => {
                    let cards = self.visible_cards().len();
                    if cards > 0 {
                        self.selected_card = (self.selected_card + 1).min(cards - 1);
                    }
                }
                ContentView::Result => self.select_next_row(),
                _ => {}
            },
        }
        self.needs_redraw = true;
    }

    pub fn nav_up(&mut self) {
        match self.focus {
            Focus::Sidebar => {
                self.sidebar_selected = self.sidebar_selected.saturating_sub(1);
            }
            Focus::Content => match self.view {
                ContentView::ForYou => {
                    self.selected_card = self.selected_card.saturating_sub(1);
                }
                ContentView::Result => self.select_prev_row(),
                _ => {}
            },
        }
        self.needs_redraw = true;
    }

    fn select_next_row(&mut self) {
        let next = self
            .result_rows
            .iter()
            .enumerate()
            .skip(self.selected_row + 1)
            .find(|(_, r)| r.selectable())
            .map(|(i, _)| i);
        if let Some(i) = next {
            self.selected_row = i;
        }
    }

    fn select_prev_row(&mut self) {
        let prev = self
            .result_rows
            .iter()
            .enumerate()
            .take(self.selected_row)
            .rev()
            .find(|(_, r)| r.selectable())
            .map(|(i, _)| i);
        if let Some(i) = prev {
            self.selected_row = i;
        }
    }

    /// Toggle focus between content and sidebar. The sidebar only takes
    /// focus when it shows the history list.
    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Content if self.sidebar_shows_history() => Focus::Sidebar,
            _ => Focus::Content,
        };
        self.needs_redraw = true;
    }

    /// The sidebar shows the clickable history everywhere except the
    /// result view (key concepts) and while loading (cleared).
    pub fn sidebar_shows_history(&self) -> bool {
        matches!(self.view, ContentView::ForYou | ContentView::Error { .. })
    }

    // ========================================================================
    // Overlay Controller
    // ========================================================================

    /// Open the search overlay, pre-filled with the current topic. A
    /// non-empty pre-fill is selected so the first keystroke replaces it.
    pub fn open_overlay(&mut self) {
        let input = self.current_topic.clone();
        self.overlay = Some(OverlayState {
            select_all: !input.is_empty(),
            input,
            suggestions: Vec::new(),
            selected: None,
        });
        self.needs_redraw = true;
    }

    /// Close the overlay, clearing input and suggestions.
    pub fn close_overlay(&mut self) {
        self.overlay = None;
        self.needs_redraw = true;
    }

    /// Recompute suggestions after an input edit.
    pub fn refresh_suggestions(&mut self) {
        if let Some(overlay) = &mut self.overlay {
            overlay.suggestions = catalog::suggestions(&overlay.input);
            overlay.selected = None;
        }
    }

    // ========================================================================
    // Language Menu
    // ========================================================================

    pub fn toggle_lang_menu(&mut self) {
        self.lang_menu = match self.lang_menu {
            Some(_) => None,
            None => {
                let current = catalog::LANGUAGES
                    .iter()
                    .position(|l| l.code == self.language.code)
                    .unwrap_or(0);
                Some(current)
            }
        };
        self.needs_redraw = true;
    }
}

/// Flatten a result into display rows: section headers (only for non-empty
/// sections), the items themselves, and the quiz call-to-action.
fn build_result_rows(result: &LearningResult) -> Vec<ResultRow> {
    let mut rows = Vec::new();
    if !result.youtube_videos.is_empty() {
        rows.push(ResultRow::Header("Top YouTube Videos"));
        rows.extend((0..result.youtube_videos.len()).map(ResultRow::Video));
    }
    if !result.articles.is_empty() {
        rows.push(ResultRow::Header("Recommended Articles"));
        rows.extend((0..result.articles.len()).map(ResultRow::Article));
    }
    rows.push(ResultRow::Quiz);
    rows
}

// ============================================================================
// Test Support
// ============================================================================

#[cfg(test)]
pub(crate) async fn test_app() -> App {
    let db = Database::open(":memory:").await.unwrap();
    let api = ApiClient::new("http://127.0.0.1:5001").unwrap();
    App::new(db, api, &Config::default()).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ArticleHit, Video};

    fn result_with(videos: usize, articles: usize, concepts: usize) -> LearningResult {
        LearningResult {
            ai_explanation_short: "short".into(),
            ai_explanation_long: "long one\n\nlong two".into(),
            youtube_videos: (0..videos)
                .map(|i| Video {
                    id: format!("v{}", i),
                    title: format!("Video {}", i),
                    thumbnail: String::new(),
                })
                .collect(),
            articles: (0..articles)
                .map(|i| ArticleHit {
                    title: format!("Article {}", i),
                    link: format!("https://example.com/{}", i),
                    snippet: String::new(),
                })
                .collect(),
            key_concepts: (0..concepts)
                .map(|i| crate::api::KeyConcept {
                    term: format!("T{}", i),
                    definition: String::new(),
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_push_history_dedupes_case_insensitively() {
        let mut app = test_app().await;
        app.push_history("Quantum Computing");
        app.push_history("quantum computing");

        assert_eq!(app.history.len(), 1);
        assert_eq!(app.history[0], "quantum computing");
    }

    #[tokio::test]
    async fn test_push_history_moves_match_to_front() {
        let mut app = test_app().await;
        app.push_history("A");
        app.push_history("B");
        app.push_history("a");

        assert_eq!(app.history, vec!["a".to_string(), "B".to_string()]);
    }

    #[tokio::test]
    async fn test_push_history_caps_at_seven() {
        let mut app = test_app().await;
        for i in 0..10 {
            app.push_history(&format!("topic {}", i));
        }

        assert_eq!(app.history.len(), MAX_HISTORY);
        assert_eq!(app.history[0], "topic 9");
        // Oldest entries fell off the end
        assert!(!app.history.contains(&"topic 0".to_string()));
    }

    #[tokio::test]
    async fn test_topic_empty_exactly_on_for_you() {
        let mut app = test_app().await;
        assert_eq!(app.view, ContentView::ForYou);
        assert!(app.current_topic.is_empty());

        app.begin_loading("Rust");
        assert!(!app.current_topic.is_empty());

        app.show_for_you();
        assert!(app.current_topic.is_empty());
        assert_eq!(app.view, ContentView::ForYou);
    }

    #[tokio::test]
    async fn test_set_result_builds_rows_and_slots() {
        let mut app = test_app().await;
        app.begin_loading("Rust");
        app.set_result(result_with(2, 3, 1));

        assert_eq!(app.view, ContentView::Result);
        // 2 headers + 2 videos + 3 articles + quiz
        assert_eq!(app.result_rows.len(), 8);
        assert_eq!(app.video_saves.len(), 2);
        assert_eq!(app.article_saves.len(), 3);
        // Cursor lands on the first selectable row, past the header
        assert_eq!(app.selected_result_row(), Some(ResultRow::Video(0)));
    }

    #[tokio::test]
    async fn test_empty_sections_have_no_headers() {
        let mut app = test_app().await;
        app.begin_loading("Rust");
        app.set_result(result_with(0, 0, 0));

        assert_eq!(app.result_rows, vec![ResultRow::Quiz]);
    }

    #[tokio::test]
    async fn test_row_navigation_skips_headers() {
        let mut app = test_app().await;
        app.begin_loading("Rust");
        app.set_result(result_with(1, 1, 0));
        // Rows: Header, Video(0), Header, Article(0), Quiz

        assert_eq!(app.selected_result_row(), Some(ResultRow::Video(0)));
        app.nav_down();
        assert_eq!(app.selected_result_row(), Some(ResultRow::Article(0)));
        app.nav_down();
        assert_eq!(app.selected_result_row(), Some(ResultRow::Quiz));
        app.nav_down(); // bottom: no change
        assert_eq!(app.selected_result_row(), Some(ResultRow::Quiz));
        app.nav_up();
        assert_eq!(app.selected_result_row(), Some(ResultRow::Article(0)));
    }

    #[tokio::test]
    async fn test_overlay_prefills_and_selects_topic() {
        let mut app = test_app().await;
        app.begin_loading("Rust");
        app.open_overlay();

        let overlay = app.overlay.as_ref().unwrap();
        assert_eq!(overlay.input, "Rust");
        assert!(overlay.select_all);
        assert!(overlay.suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_overlay_empty_topic_not_selected() {
        let mut app = test_app().await;
        app.open_overlay();
        assert!(!app.overlay.as_ref().unwrap().select_all);
    }

    #[tokio::test]
    async fn test_sidebar_focus_only_with_history_view() {
        let mut app = test_app().await;
        app.cycle_focus();
        assert_eq!(app.focus, Focus::Sidebar);

        app.begin_loading("Rust");
        app.set_result(result_with(1, 0, 0));
        app.cycle_focus();
        // Result view sidebar shows concepts; focus stays on content
        assert_eq!(app.focus, Focus::Content);
    }

    #[tokio::test]
    async fn test_set_language_unknown_code_ignored() {
        let mut app = test_app().await;
        assert!(!app.set_language("xx"));
        assert_eq!(app.language.code, "en");
        assert!(app.set_language("fr"));
        assert!(!app.set_language("fr"));
    }
}
