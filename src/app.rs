use crate::catalog::{CatalogEntry, CatalogError};
use crate::collection::Collection;
use chrono::{DateTime, Local};

/// Which tab is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Search,
    MyGames,
}

impl Tab {
    pub fn next(self) -> Self {
        match self {
            Self::Search => Self::MyGames,
            Self::MyGames => Self::Search,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Search => "Search",
            Self::MyGames => "My Games",
        }
    }

    pub const ALL: [Tab; 2] = [Self::Search, Self::MyGames];
}

/// Input mode for the query bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// In-progress rating for the entry currently under the cursor.
///
/// Always in [0, 5]; 0 means "not rated yet". The key handler only maps the
/// digit keys 0-5 here, so the range is enforced at the boundary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RatingDraft(u8);

impl RatingDraft {
    pub const MAX: u8 = 5;

    pub fn set(&mut self, value: u8) {
        debug_assert!(value <= Self::MAX);
        self.0 = value.min(Self::MAX);
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_set(self) -> bool {
        self.0 > 0
    }
}

/// A search the event loop should dispatch to the catalog client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub seq: u64,
    pub query: String,
}

/// The outcome of a dispatched search, tagged with its request number so
/// responses that arrive out of order can be told apart.
#[derive(Debug)]
pub struct SearchOutcome {
    pub seq: u64,
    pub result: Result<Vec<CatalogEntry>, CatalogError>,
}

/// Main application state.
pub struct App {
    pub should_quit: bool,
    pub tab: Tab,
    pub show_help: bool,

    // Search tab state
    pub input_mode: InputMode,
    pub query: String,
    pub results: Vec<CatalogEntry>,
    pub result_selected: usize,
    pub loading: bool,
    pub search_seq: u64,
    pub rating: RatingDraft,

    // My Games tab state
    pub collection: Collection,
    pub games_selected: usize,

    // Status message
    pub status_msg: String,
}

impl App {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            tab: Tab::Search,
            show_help: false,

            input_mode: InputMode::Normal,
            query: String::new(),
            results: Vec::new(),
            result_selected: 0,
            loading: false,
            search_seq: 0,
            rating: RatingDraft::default(),

            collection: Collection::new(),
            games_selected: 0,

            status_msg: "Press / to search the catalog".to_string(),
        }
    }

    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
    }

    // ── Query editing ──
    // Text edits never touch the network; a search only goes out on an
    // explicit trigger.

    pub fn query_push(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn query_pop(&mut self) {
        self.query.pop();
    }

    /// Start a search for the current query. Returns the request for the
    /// event loop to dispatch, or `None` for blank queries, which are a
    /// no-op. A request issued while another is in flight simply supersedes
    /// it: the sequence number decides which response counts.
    pub fn begin_search(&mut self) -> Option<SearchRequest> {
        if self.query.trim().is_empty() {
            return None;
        }
        self.search_seq += 1;
        self.loading = true;
        self.status_msg = format!("Searching for \"{}\"...", self.query);
        Some(SearchRequest {
            seq: self.search_seq,
            query: self.query.clone(),
        })
    }

    /// Apply a finished search. Outcomes from superseded requests are
    /// dropped entirely; the loading flag belongs to the newest request.
    /// A failed search keeps the previous result list on screen.
    pub fn apply_search_outcome(&mut self, outcome: SearchOutcome) {
        if outcome.seq != self.search_seq {
            return;
        }
        self.loading = false;
        match outcome.result {
            Ok(results) => {
                self.status_msg = if results.is_empty() {
                    format!("No results for \"{}\"", self.query)
                } else {
                    format!("{} results for \"{}\"", results.len(), self.query)
                };
                self.results = results;
                self.result_selected = 0;
                self.rating.clear();
            }
            Err(e) => {
                self.status_msg = e.user_message();
            }
        }
    }

    // ── Result list ──

    /// Move the cursor down. The rating draft is scoped to the entry under
    /// the cursor, so moving starts a fresh draft.
    pub fn result_next(&mut self) {
        if !self.results.is_empty() && self.result_selected + 1 < self.results.len() {
            self.result_selected += 1;
            self.rating.clear();
        }
    }

    pub fn result_prev(&mut self) {
        if self.result_selected > 0 {
            self.result_selected -= 1;
            self.rating.clear();
        }
    }

    /// Rate the entry under the cursor. Ignored when there is nothing to
    /// rate.
    pub fn set_rating(&mut self, value: u8) {
        if self.results.is_empty() {
            return;
        }
        self.rating.set(value);
    }

    /// Commit the entry under the cursor to the collection. Without a
    /// rating this prompts and changes nothing; on success the draft resets
    /// and the committed entry leaves the transient result list.
    pub fn add_selected(&mut self, now: DateTime<Local>) {
        let Some(entry) = self.results.get(self.result_selected) else {
            return;
        };

        match self.collection.commit(entry, self.rating.value(), now) {
            Ok(game) => {
                self.status_msg = format!("Added \"{}\" to your games", game.name);
            }
            Err(e) => {
                self.status_msg = e.user_message();
                return;
            }
        }

        self.rating.clear();
        self.results.remove(self.result_selected);
        if self.result_selected >= self.results.len() {
            self.result_selected = self.results.len().saturating_sub(1);
        }
    }

    // ── My Games list ──

    pub fn games_next(&mut self) {
        if !self.collection.is_empty() && self.games_selected + 1 < self.collection.len() {
            self.games_selected += 1;
        }
    }

    pub fn games_prev(&mut self) {
        if self.games_selected > 0 {
            self.games_selected -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(id: i64, name: &str, genres: &[&str]) -> CatalogEntry {
        CatalogEntry {
            id,
            name: name.to_string(),
            image_url: None,
            genres: genres.iter().map(|g| g.to_string()).collect(),
        }
    }

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap()
    }

    fn ok_outcome(seq: u64, entries: Vec<CatalogEntry>) -> SearchOutcome {
        SearchOutcome {
            seq,
            result: Ok(entries),
        }
    }

    fn failed_outcome(seq: u64) -> SearchOutcome {
        SearchOutcome {
            seq,
            result: Err(CatalogError::Status(
                reqwest::StatusCode::SERVICE_UNAVAILABLE,
            )),
        }
    }

    #[test]
    fn test_blank_query_never_searches() {
        let mut app = App::new();
        assert!(app.begin_search().is_none());
        app.query = "   ".to_string();
        assert!(app.begin_search().is_none());
        assert!(!app.loading);
        assert_eq!(app.search_seq, 0);
    }

    #[test]
    fn test_query_edits_do_not_search() {
        let mut app = App::new();
        app.query_push('p');
        app.query_push('o');
        app.query_pop();
        assert_eq!(app.query, "p");
        assert!(!app.loading);
        assert_eq!(app.search_seq, 0);
    }

    #[test]
    fn test_begin_search_sets_loading_and_bumps_seq() {
        let mut app = App::new();
        app.query = "portal".to_string();

        let request = app.begin_search().unwrap();
        assert_eq!(request.seq, 1);
        assert_eq!(request.query, "portal");
        assert!(app.loading);

        let request = app.begin_search().unwrap();
        assert_eq!(request.seq, 2);
    }

    #[test]
    fn test_successful_search_replaces_results() {
        let mut app = App::new();
        app.query = "portal".to_string();
        let request = app.begin_search().unwrap();

        app.apply_search_outcome(ok_outcome(request.seq, vec![entry(1, "Portal 2", &["Puzzle"])]));
        assert!(!app.loading);
        assert_eq!(app.results.len(), 1);
        assert_eq!(app.result_selected, 0);
    }

    #[test]
    fn test_failed_search_keeps_previous_results_and_clears_loading() {
        let mut app = App::new();
        app.query = "portal".to_string();
        let request = app.begin_search().unwrap();
        app.apply_search_outcome(ok_outcome(request.seq, vec![entry(1, "Portal 2", &["Puzzle"])]));

        let request = app.begin_search().unwrap();
        app.apply_search_outcome(failed_outcome(request.seq));

        assert!(!app.loading);
        assert_eq!(app.results.len(), 1);
        assert_eq!(app.results[0].name, "Portal 2");
        assert!(app.status_msg.contains("Search failed"));
    }

    #[test]
    fn test_stale_outcome_is_dropped() {
        let mut app = App::new();
        app.query = "portal".to_string();
        let first = app.begin_search().unwrap();
        let second = app.begin_search().unwrap();

        // The second response lands first and wins.
        app.apply_search_outcome(ok_outcome(second.seq, vec![entry(2, "Portal 2", &["Puzzle"])]));
        assert!(!app.loading);

        // The first response is stale: nothing moves.
        app.apply_search_outcome(ok_outcome(first.seq, vec![entry(1, "Portal", &["Puzzle"])]));
        assert_eq!(app.results.len(), 1);
        assert_eq!(app.results[0].name, "Portal 2");
    }

    #[test]
    fn test_stale_outcome_does_not_clear_loading_of_newer_request() {
        let mut app = App::new();
        app.query = "portal".to_string();
        let first = app.begin_search().unwrap();
        let _second = app.begin_search().unwrap();

        app.apply_search_outcome(ok_outcome(first.seq, vec![entry(1, "Portal", &["Puzzle"])]));
        assert!(app.loading);
        assert!(app.results.is_empty());
    }

    #[test]
    fn test_add_without_rating_prompts_and_mutates_nothing() {
        let mut app = App::new();
        app.results = vec![entry(1, "Portal 2", &["Puzzle"])];

        app.add_selected(fixed_now());

        assert!(app.collection.is_empty());
        assert_eq!(app.results.len(), 1);
        assert!(app.status_msg.contains("Rating required"));
    }

    #[test]
    fn test_add_with_rating_commits_and_resets_draft() {
        let mut app = App::new();
        app.results = vec![entry(1, "Portal 2", &["Puzzle"])];
        app.set_rating(4);

        app.add_selected(fixed_now());

        assert_eq!(app.collection.len(), 1);
        assert_eq!(app.collection.games()[0].rating, 4);
        assert!(!app.rating.is_set());
        // The committed entry leaves the transient list.
        assert!(app.results.is_empty());
        assert_eq!(app.result_selected, 0);
    }

    #[test]
    fn test_add_keeps_cursor_in_bounds() {
        let mut app = App::new();
        app.results = vec![
            entry(1, "Portal", &["Puzzle"]),
            entry(2, "Portal 2", &["Puzzle"]),
        ];
        app.result_selected = 1;
        app.set_rating(5);

        app.add_selected(fixed_now());

        assert_eq!(app.results.len(), 1);
        assert_eq!(app.result_selected, 0);
    }

    #[test]
    fn test_rating_is_scoped_to_the_cursor() {
        let mut app = App::new();
        app.results = vec![
            entry(1, "Portal", &["Puzzle"]),
            entry(2, "Portal 2", &["Puzzle"]),
        ];
        app.set_rating(3);
        assert!(app.rating.is_set());

        app.result_next();
        assert!(!app.rating.is_set());
    }

    #[test]
    fn test_rating_ignored_with_no_results() {
        let mut app = App::new();
        app.set_rating(5);
        assert!(!app.rating.is_set());
    }

    #[test]
    fn test_new_results_reset_selection_and_draft() {
        let mut app = App::new();
        app.query = "portal".to_string();
        app.results = vec![
            entry(1, "Portal", &["Puzzle"]),
            entry(2, "Portal 2", &["Puzzle"]),
        ];
        app.result_selected = 1;
        app.set_rating(2);

        let request = app.begin_search().unwrap();
        app.apply_search_outcome(ok_outcome(request.seq, vec![entry(3, "Portal 3", &["Puzzle"])]));

        assert_eq!(app.result_selected, 0);
        assert!(!app.rating.is_set());
    }

    #[test]
    fn test_tab_toggle() {
        let mut app = App::new();
        assert_eq!(app.tab, Tab::Search);
        app.next_tab();
        assert_eq!(app.tab, Tab::MyGames);
        app.next_tab();
        assert_eq!(app.tab, Tab::Search);
    }

    #[test]
    fn test_games_navigation_stays_in_bounds() {
        let mut app = App::new();
        app.games_next();
        assert_eq!(app.games_selected, 0);

        app.results = vec![entry(1, "Portal", &["Puzzle"]), entry(2, "Doom", &["Shooter"])];
        app.set_rating(4);
        app.add_selected(fixed_now());
        app.set_rating(5);
        app.add_selected(fixed_now());

        app.games_next();
        assert_eq!(app.games_selected, 1);
        app.games_next();
        assert_eq!(app.games_selected, 1);
        app.games_prev();
        app.games_prev();
        assert_eq!(app.games_selected, 0);
    }
}
