//! Movie summary model and query results.
//!
//! [`MovieSummary`] mirrors one entry of the catalog's `results` array. The
//! fields the application reads are typed; everything else the catalog sends
//! is kept verbatim in [`MovieSummary::extra`] so nothing is lost when a
//! summary is handed to a render sink.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One movie as returned by the catalog API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    /// Pass-through fields not interpreted by cinefind.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MovieSummary {
    /// Creates a summary with only an id and a title.
    #[must_use]
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            poster_path: None,
            vote_average: None,
            original_language: None,
            release_date: None,
            extra: Map::new(),
        }
    }

    /// Sets the poster path, builder style.
    #[must_use]
    pub fn with_poster_path(mut self, poster_path: impl Into<String>) -> Self {
        self.poster_path = Some(poster_path.into());
        self
    }

    /// Returns the release year (the part of `release_date` before the first
    /// dash), if the catalog supplied a date.
    ///
    /// ```
    /// use cinefind::MovieSummary;
    ///
    /// let mut movie = MovieSummary::new(268, "Batman");
    /// movie.release_date = Some("1989-06-23".to_string());
    /// assert_eq!(movie.release_year(), Some("1989"));
    /// ```
    #[must_use]
    pub fn release_year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|date| date.split('-').next())
            .filter(|year| !year.is_empty())
    }

    /// Returns the rating formatted with one decimal, or `"N/A"`.
    #[must_use]
    pub fn rating_label(&self) -> String {
        match self.vote_average {
            Some(rating) if rating > 0.0 => format!("{rating:.1}"),
            _ => "N/A".to_string(),
        }
    }
}

/// Outcome of one catalog query.
///
/// Success keeps the catalog's ordering. Failure carries the message to show
/// in place of the movie list.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    Success(Vec<MovieSummary>),
    Failure(String),
}

impl QueryResult {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_fields_pass_through() {
        let json = r#"{
            "id": 155,
            "title": "The Dark Knight",
            "poster_path": "/qJ2tW6WMUDux911r6m7haRef0WH.jpg",
            "vote_average": 8.5,
            "adult": false,
            "genre_ids": [18, 28]
        }"#;

        let movie: MovieSummary = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, 155);
        assert_eq!(movie.poster_path.as_deref(), Some("/qJ2tW6WMUDux911r6m7haRef0WH.jpg"));
        assert_eq!(movie.extra.get("adult"), Some(&Value::Bool(false)));
        assert!(movie.extra.contains_key("genre_ids"));

        let back = serde_json::to_value(&movie).unwrap();
        assert_eq!(back["genre_ids"], serde_json::json!([18, 28]));
    }

    #[test]
    fn rating_and_year_fall_back() {
        let movie = MovieSummary::new(1, "Untitled");
        assert_eq!(movie.rating_label(), "N/A");
        assert_eq!(movie.release_year(), None);

        let mut dated = MovieSummary::new(2, "Dated");
        dated.release_date = Some(String::new());
        dated.vote_average = Some(7.26);
        assert_eq!(dated.release_year(), None);
        assert_eq!(dated.rating_label(), "7.3");
    }
}
