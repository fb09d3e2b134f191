//! Filter specification and the pure filter/sort evaluator.
//!
//! `apply_filters` is the client-side counterpart of the backend's filtered
//! game query: given an already-fetched catalog snapshot and a `FilterSpec`,
//! it produces the filtered, sorted sequence the feed paginates over. It
//! never mutates its inputs and has no hidden state.

use serde::{Deserialize, Serialize};

use crate::types::{Game, ReleaseStatus};

// ── Filter specification ────────────────────────────────────────────────────

/// A complete description of the user's active filters.
///
/// Owned by the page-level view and replaced wholesale on every filter-UI
/// interaction; nothing mutates individual fields in place. Replacing the
/// spec triggers a full re-filter and a pagination reset downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Selected genre tags. Empty means no genre constraint.
    #[serde(default)]
    pub genres: Vec<String>,
    /// Selected platform tags. Empty means no platform constraint.
    #[serde(default)]
    pub platforms: Vec<String>,
    /// Closed price interval `[lo, hi]`, both inclusive.
    pub price_range: (f64, f64),
    /// Selected release statuses. Empty means no status constraint.
    #[serde(default)]
    pub statuses: Vec<ReleaseStatus>,
    /// Free-text search. Empty means no search constraint.
    #[serde(default)]
    pub search: String,
    /// Keep only entries with the explicit free marker.
    #[serde(default)]
    pub free_only: bool,
    #[serde(default)]
    pub sort: SortKey,
    #[serde(default)]
    pub time_frame: TimeFrame,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            genres: Vec::new(),
            platforms: Vec::new(),
            price_range: (0.0, DEFAULT_PRICE_CEILING),
            statuses: Vec::new(),
            search: String::new(),
            free_only: false,
            sort: SortKey::default(),
            time_frame: TimeFrame::default(),
        }
    }
}

/// Upper bound of the default price interval. High enough to include any
/// realistic listing price.
pub const DEFAULT_PRICE_CEILING: f64 = 1000.0;

impl FilterSpec {
    /// Validate the spec at the UI boundary.
    ///
    /// The evaluator assumes a well-formed spec; anything user-editable is
    /// checked here instead of deep in the pipeline.
    pub fn validate(&self) -> Result<(), FilterSpecError> {
        let (lo, hi) = self.price_range;
        if !lo.is_finite() || !hi.is_finite() {
            return Err(FilterSpecError::PriceNotFinite);
        }
        if lo < 0.0 {
            return Err(FilterSpecError::NegativePrice(lo));
        }
        if lo > hi {
            return Err(FilterSpecError::InvertedPriceRange { lo, hi });
        }
        if self.genres.iter().any(|g| g.trim().is_empty()) {
            return Err(FilterSpecError::BlankTag("genre"));
        }
        if self.platforms.iter().any(|p| p.trim().is_empty()) {
            return Err(FilterSpecError::BlankTag("platform"));
        }
        Ok(())
    }
}

/// Validation failures for a user-supplied `FilterSpec`.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FilterSpecError {
    #[error("price bounds must be finite numbers")]
    PriceNotFinite,

    #[error("price lower bound must not be negative (got {0})")]
    NegativePrice(f64),

    #[error("price range is inverted: lo {lo} > hi {hi}")]
    InvertedPriceRange { lo: f64, hi: f64 },

    #[error("selected {0} tag is blank")]
    BlankTag(&'static str),
}

// ── Sort key ────────────────────────────────────────────────────────────────

/// Requested ordering for the filtered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Trending,
    MostViewed,
    MostLiked,
    HighestRated,
    Newest,
    Oldest,
    Alphabetical,
    ReleaseDate,
    PriceAscending,
    PriceDescending,
}

impl SortKey {
    /// Query-parameter value understood by the backend.
    pub fn as_query_value(&self) -> &'static str {
        match self {
            SortKey::Trending => "trending",
            SortKey::MostViewed => "most-viewed",
            SortKey::MostLiked => "most-liked",
            SortKey::HighestRated => "highest-rated",
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::Alphabetical => "alphabetical",
            SortKey::ReleaseDate => "release-date",
            SortKey::PriceAscending => "price-asc",
            SortKey::PriceDescending => "price-desc",
        }
    }
}

// ── Time frame ──────────────────────────────────────────────────────────────

/// Window qualifying the engagement-based sort keys.
///
/// Only the backend's query honors this; the client-side evaluator has no
/// windowed counters to consult, so it passes the frame through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeFrame {
    Today,
    Week,
    Month,
    Quarter,
    #[default]
    AllTime,
}

impl TimeFrame {
    pub fn as_query_value(&self) -> &'static str {
        match self {
            TimeFrame::Today => "today",
            TimeFrame::Week => "week",
            TimeFrame::Month => "month",
            TimeFrame::Quarter => "quarter",
            TimeFrame::AllTime => "all-time",
        }
    }
}

// ── Evaluator ───────────────────────────────────────────────────────────────

/// Filter and sort a catalog snapshot according to `spec`.
///
/// Dimensions are AND-combined; within a dimension, selected values are
/// OR-combined. The sort is stable, so ties keep input order. Inputs are
/// never mutated; calling twice with the same inputs yields the same output.
pub fn apply_filters(games: &[Game], spec: &FilterSpec) -> Vec<Game> {
    let query = spec.search.trim().to_lowercase();

    let mut result: Vec<Game> = games
        .iter()
        .filter(|g| matches_search(g, &query))
        .filter(|g| matches_tags(&g.genres, &spec.genres))
        .filter(|g| matches_tags(&g.platforms, &spec.platforms))
        .filter(|g| matches_price(g, spec))
        .filter(|g| spec.statuses.is_empty() || spec.statuses.contains(&g.status))
        .cloned()
        .collect();

    sort_games(&mut result, spec.sort);
    result
}

/// Case-insensitive substring search against title, developer, description,
/// or any genre tag. An empty query matches everything.
fn matches_search(game: &Game, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    game.title.to_lowercase().contains(query)
        || game.developer.to_lowercase().contains(query)
        || game.description.to_lowercase().contains(query)
        || game.genres.iter().any(|g| g.to_lowercase().contains(query))
}

/// Tag dimension match: with a non-empty selection, at least one of the
/// game's tags must case-insensitively contain at least one selected value.
/// Substring containment, not equality, so "RPG" selects "Action RPG".
fn matches_tags(tags: &[String], selected: &[String]) -> bool {
    if selected.is_empty() {
        return true;
    }
    selected.iter().any(|sel| {
        let sel = sel.to_lowercase();
        tags.iter().any(|tag| tag.to_lowercase().contains(&sel))
    })
}

fn matches_price(game: &Game, spec: &FilterSpec) -> bool {
    if spec.free_only && !game.price.is_free() {
        return false;
    }
    let (lo, hi) = spec.price_range;
    let p = game.price.effective();
    p >= lo && p <= hi
}

/// Stable sort by the comparator implied by the key.
///
/// Keys without a defined comparator (release-date and the price orderings)
/// leave the sequence untouched; the backend orders those server-side.
fn sort_games(games: &mut [Game], key: SortKey) {
    match key {
        SortKey::Trending | SortKey::MostViewed => {
            games.sort_by(|a, b| b.views.cmp(&a.views));
        }
        SortKey::MostLiked | SortKey::HighestRated => {
            games.sort_by(|a, b| b.likes.cmp(&a.likes));
        }
        SortKey::Newest => {
            games.sort_by(|a, b| b.released_at.cmp(&a.released_at));
        }
        SortKey::Oldest => {
            games.sort_by(|a, b| a.released_at.cmp(&b.released_at));
        }
        SortKey::Alphabetical => {
            games.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
        }
        SortKey::ReleaseDate | SortKey::PriceAscending | SortKey::PriceDescending => {}
    }
}
