//! Movie list renderer.
//!
//! Each movie is one row: the title (with search-term highlights) padded to a
//! fixed column, then rating, original language and release year.

use crate::ui::helpers::{self, char_len};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;
use std::io::{self, Write};

/// Writes one row per movie.
pub fn render_movie_rows(out: &mut dyn Write, items: &[DisplayItem], theme: &Theme, cols: usize) -> io::Result<()> {
    let title_width = items
        .iter()
        .map(|item| char_len(&item.title))
        .max()
        .unwrap_or(0)
        .min(cols.saturating_sub(24));

    for item in items {
        render_movie_row(out, item, theme, title_width)?;
    }
    Ok(())
}

fn render_movie_row(out: &mut dyn Write, item: &DisplayItem, theme: &Theme, title_width: usize) -> io::Result<()> {
    let text_color = &theme.colors.text_normal;

    write!(out, "  {}", theme.fg(text_color))?;
    helpers::write_highlighted(out, &item.title, &item.highlight_ranges, theme, text_color)?;
    write!(out, "{}", " ".repeat(title_width.saturating_sub(char_len(&item.title)) + 2))?;

    writeln!(
        out,
        "{}★ {}{}  {}{} · {}{}",
        theme.fg(&theme.colors.rating_fg),
        item.rating,
        theme.reset(),
        theme.fg(&theme.colors.text_dim),
        item.language,
        item.year,
        theme.reset(),
    )
}
