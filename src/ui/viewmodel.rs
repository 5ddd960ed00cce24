//! View model types representing renderable UI state.
//!
//! View models are computed from [`RenderProps`] by [`UIViewModel::from_props`]
//! and consumed by the terminal components. They hold no business logic, only
//! display-ready text and fuzzy-match highlight ranges.

use super::RenderProps;
use crate::domain::MovieSummary;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

pub const TITLE_BEFORE: &str = "Encontrá la ";
pub const TITLE_ACCENT: &str = "película";
pub const TITLE_AFTER: &str = " que estás buscando";
pub const SEARCH_PLACEHOLDER: &str = "Buscá entre miles de películas";
pub const TRENDING_TITLE: &str = "Tendencia";
pub const ALL_MOVIES_TITLE: &str = "Todas las películas";
pub const LOADING_MESSAGE: &str = "Cargando…";
pub const NO_RESULTS_MESSAGE: &str = "No encontramos tu película.";
pub const FOOTER_HINT: &str = "Escribí un título y presioná Enter · Ctrl+D para salir";

/// Width reserved next to a movie title for rating, language and year.
const DETAILS_WIDTH: usize = 24;

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub search_bar: SearchBarInfo,
    /// Trending section, omitted when there are no entries.
    pub trending: Option<Vec<TrendingItem>>,
    pub body: ListBody,
    pub footer: FooterInfo,
}

/// Title split around its accented word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub before: String,
    pub accent: String,
    pub after: String,
}

impl HeaderInfo {
    /// Title length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.before.chars().count() + self.accent.chars().count() + self.after.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
    pub placeholder: String,
}

/// One numbered trending entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendingItem {
    /// 1-based position.
    pub rank: usize,
    pub search_term: String,
    pub count: u32,
    pub poster_url: String,
}

/// What the "all movies" section shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListBody {
    Loading,
    Error(String),
    Empty(String),
    Movies(Vec<DisplayItem>),
}

/// Display information for a single movie card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub title: String,
    /// Rating label, e.g. `7.3` or `N/A`.
    pub rating: String,
    pub language: String,
    pub year: String,

    /// Character ranges of `title` matching the search term.
    ///
    /// Each tuple is `(start, end)` in character indices, end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub hint: String,
}

impl UIViewModel {
    /// Computes the view model for a terminal `cols` characters wide.
    ///
    /// Loading wins over an error, and an error wins over the movie list,
    /// matching what the user should see at each point of a query cycle.
    #[must_use]
    pub fn from_props(props: &RenderProps, cols: usize) -> Self {
        let trending = if props.trending_movies.is_empty() {
            None
        } else {
            Some(
                props
                    .trending_movies
                    .iter()
                    .enumerate()
                    .map(|(index, entry)| TrendingItem {
                        rank: index + 1,
                        search_term: entry.search_term.clone(),
                        count: entry.count,
                        poster_url: entry.poster_url.clone(),
                    })
                    .collect(),
            )
        };

        let body = if props.is_loading {
            ListBody::Loading
        } else if let Some(message) = props.error_message.as_ref().filter(|m| !m.is_empty()) {
            ListBody::Error(message.clone())
        } else if props.movies.is_empty() {
            ListBody::Empty(NO_RESULTS_MESSAGE.to_string())
        } else {
            let matcher = (!props.search_term.trim().is_empty()).then(SkimMatcherV2::default);
            let max_title = cols.saturating_sub(DETAILS_WIDTH).max(8);

            ListBody::Movies(
                props
                    .movies
                    .iter()
                    .map(|movie| display_item(movie, &props.search_term, matcher.as_ref(), max_title))
                    .collect(),
            )
        };

        Self {
            header: HeaderInfo {
                before: TITLE_BEFORE.to_string(),
                accent: TITLE_ACCENT.to_string(),
                after: TITLE_AFTER.to_string(),
            },
            search_bar: SearchBarInfo {
                query: props.search_term.clone(),
                placeholder: SEARCH_PLACEHOLDER.to_string(),
            },
            trending,
            body,
            footer: FooterInfo {
                hint: FOOTER_HINT.to_string(),
            },
        }
    }
}

fn display_item(movie: &MovieSummary, query: &str, matcher: Option<&SkimMatcherV2>, max_title: usize) -> DisplayItem {
    let title = truncate_title(&movie.title, max_title);
    let highlight_ranges = matcher.map_or_else(Vec::new, |m| {
        let visible = title.chars().count();
        compute_highlight_ranges(&title, query, m)
            .into_iter()
            .filter(|&(start, _)| start < visible)
            .collect()
    });

    DisplayItem {
        title,
        rating: movie.rating_label(),
        language: movie.original_language.clone().unwrap_or_else(|| "N/A".to_string()),
        year: movie.release_year().unwrap_or("N/A").to_string(),
        highlight_ranges,
    }
}

fn truncate_title(title: &str, max: usize) -> String {
    if title.chars().count() <= max {
        return title.to_string();
    }
    let kept: String = title.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Coalesces the matcher's character indices into `(start, end)` runs.
fn compute_highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}
