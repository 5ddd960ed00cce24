//! Terminal render sink.

use crate::domain::error::Result;
use crate::ui::components;
use crate::ui::helpers::CLEAR_SCREEN;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;
use crate::ui::{RenderProps, RenderSink};
use std::io::Write;

/// Default terminal width when none is configured.
pub const DEFAULT_COLUMNS: usize = 80;

/// Redraws the whole search screen into a writer on every render.
#[derive(Debug)]
pub struct TerminalSink<W: Write> {
    out: W,
    theme: Theme,
    cols: usize,
    clear: bool,
}

impl<W: Write> TerminalSink<W> {
    /// Creates a sink that clears the screen before each frame.
    pub fn new(out: W, theme: Theme) -> Self {
        Self {
            out,
            theme,
            cols: DEFAULT_COLUMNS,
            clear: true,
        }
    }

    #[must_use]
    pub fn with_columns(mut self, cols: usize) -> Self {
        self.cols = cols.max(20);
        self
    }

    /// Appends frames instead of clearing the screen between them.
    #[must_use]
    pub fn without_clear(mut self) -> Self {
        self.clear = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> RenderSink for TerminalSink<W> {
    fn render(&mut self, props: &RenderProps) -> Result<()> {
        let _span = tracing::trace_span!("render", movies = props.movies.len(), loading = props.is_loading).entered();

        let viewmodel = UIViewModel::from_props(props, self.cols);

        if self.clear {
            write!(self.out, "{CLEAR_SCREEN}")?;
        }
        components::render_screen(&mut self.out, &viewmodel, &self.theme, self.cols)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::SearchTermStore;
    use crate::domain::{MovieSummary, TrendingEntry, GENERIC_QUERY_ERROR};
    use crate::ui::viewmodel::{ALL_MOVIES_TITLE, LOADING_MESSAGE, NO_RESULTS_MESSAGE, SEARCH_PLACEHOLDER};
    use std::time::Duration;

    fn render(props: &RenderProps) -> String {
        let mut sink = TerminalSink::new(Vec::new(), Theme::plain()).without_clear();
        sink.render(props).unwrap();
        String::from_utf8(sink.into_inner()).unwrap()
    }

    fn base_props(store: &SearchTermStore) -> RenderProps {
        RenderProps {
            search_term: String::new(),
            set_search_term: store.setter(),
            movies: vec![],
            trending_movies: vec![],
            is_loading: false,
            error_message: None,
        }
    }

    #[tokio::test]
    async fn renders_movies_and_trending() {
        let store = SearchTermStore::spawn(Duration::from_millis(10));
        let mut props = base_props(&store);
        props.search_term = "alien".to_string();
        let mut alien = MovieSummary::new(348, "Alien");
        alien.vote_average = Some(8.1);
        alien.original_language = Some("en".to_string());
        alien.release_date = Some("1979-05-25".to_string());
        props.movies = vec![alien];
        props.trending_movies = vec![TrendingEntry {
            id: "1".to_string(),
            search_term: "alien".to_string(),
            count: 2,
            poster_url: "/no-movie.png".to_string(),
            movie_id: 348,
        }];

        let screen = render(&props);

        assert!(screen.contains("Encontrá la película que estás buscando"));
        assert!(screen.contains(" > alien"));
        assert!(screen.contains("Tendencia"));
        assert!(screen.contains(" 1  alien  · 2 búsquedas"));
        assert!(screen.contains(ALL_MOVIES_TITLE));
        assert!(screen.contains("Alien  ★ 8.1  en · 1979"));
        assert!(!screen.contains(NO_RESULTS_MESSAGE));
    }

    #[tokio::test]
    async fn renders_status_lines() {
        let store = SearchTermStore::spawn(Duration::from_millis(10));
        let mut props = base_props(&store);

        let empty = render(&props);
        assert!(empty.contains(SEARCH_PLACEHOLDER));
        assert!(empty.contains(NO_RESULTS_MESSAGE));
        assert!(!empty.contains("Tendencia"));

        props.error_message = Some(GENERIC_QUERY_ERROR.to_string());
        assert!(render(&props).contains(GENERIC_QUERY_ERROR));

        props.is_loading = true;
        let loading = render(&props);
        assert!(loading.contains(LOADING_MESSAGE));
        assert!(!loading.contains(GENERIC_QUERY_ERROR));
    }

    #[tokio::test]
    async fn clears_screen_by_default() {
        let store = SearchTermStore::spawn(Duration::from_millis(10));
        let mut sink = TerminalSink::new(Vec::new(), Theme::plain());
        sink.render(&base_props(&store)).unwrap();
        assert!(String::from_utf8(sink.into_inner()).unwrap().starts_with(CLEAR_SCREEN));
    }
}
