//! Section renderers for the search screen.
//!
//! # Components
//!
//! - [`header`]: Centered title
//! - [`search`]: Search input box
//! - [`trending`]: Numbered trending terms
//! - [`table`]: Movie rows
//! - [`empty`]: Loading, error and no-results lines
//! - [`footer`]: Usage hint
//!
//! # Layout
//!
//! ```text
//! [Header]
//! [Search Bar - 3 lines]
//! [Trending, when present]
//! [Section title]
//! [Border]
//! [Movie rows | loading | error | no results]
//! [Border]
//! [Footer]
//! ```

pub mod empty;
pub mod footer;
pub mod header;
pub mod search;
pub mod table;
pub mod trending;

use crate::ui::helpers::write_border;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ListBody, UIViewModel, ALL_MOVIES_TITLE};
use std::io::{self, Write};

/// Writes the whole screen for `vm`.
pub fn render_screen(out: &mut dyn Write, vm: &UIViewModel, theme: &Theme, cols: usize) -> io::Result<()> {
    header::render_header(out, &vm.header, theme, cols)?;
    search::render_search_bar(out, &vm.search_bar, theme, cols)?;
    writeln!(out)?;

    if let Some(items) = &vm.trending {
        trending::render_trending(out, items, theme)?;
    }

    writeln!(out, " {}{}{ALL_MOVIES_TITLE}{}", theme.bold(), theme.fg(&theme.colors.title_fg), theme.reset())?;
    write_border(out, &theme.colors.border, theme, cols)?;

    match &vm.body {
        ListBody::Loading => empty::render_loading(out, theme)?,
        ListBody::Error(message) | ListBody::Empty(message) => empty::render_message(out, message, theme)?,
        ListBody::Movies(items) => table::render_movie_rows(out, items, theme, cols)?,
    }

    write_border(out, &theme.colors.border, theme, cols)?;
    footer::render_footer(out, &vm.footer, theme, cols)
}
