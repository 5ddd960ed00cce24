//! Trending entry domain model.
//!
//! A trending entry counts how many times a search term produced at least one
//! result. Entries are keyed by the exact search term and carry the poster of
//! the first movie that term returned, so the trending strip can show an image
//! without another catalog request.

use super::movie::MovieSummary;
use serde::{Deserialize, Serialize};

/// Poster shown for movies the catalog has no image for.
pub const PLACEHOLDER_POSTER: &str = "/no-movie.png";

/// A persisted search counter as shown in the trending strip.
///
/// - `id`: identifier assigned by the trending store
/// - `search_term`: unique key, matched exactly
/// - `count`: number of successful searches, always at least 1
/// - `poster_url`: absolute poster URL of the first result seen for the term
/// - `movie_id`: catalog id of that first result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingEntry {
    pub id: String,
    pub search_term: String,
    pub count: u32,
    pub poster_url: String,
    pub movie_id: i64,
}

/// Builds the poster URL stored for a trending entry.
///
/// Concatenates the image base URL with the movie's poster path, falling back
/// to [`PLACEHOLDER_POSTER`] when the catalog sent no poster.
///
/// ```
/// use cinefind::domain::trending::poster_url_for;
/// use cinefind::MovieSummary;
///
/// let movie = MovieSummary::new(268, "Batman").with_poster_path("/kBf3g9crrADGMc2AMAMlLBgSm2h.jpg");
/// assert_eq!(
///     poster_url_for("https://image.tmdb.org/t/p/w500", &movie),
///     "https://image.tmdb.org/t/p/w500/kBf3g9crrADGMc2AMAMlLBgSm2h.jpg"
/// );
/// ```
#[must_use]
pub fn poster_url_for(image_base_url: &str, movie: &MovieSummary) -> String {
    movie
        .poster_path
        .as_deref()
        .filter(|path| !path.is_empty())
        .map_or_else(
            || PLACEHOLDER_POSTER.to_string(),
            |path| format!("{image_base_url}{path}"),
        )
}
