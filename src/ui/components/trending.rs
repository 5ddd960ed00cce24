//! Trending section renderer.

use crate::ui::theme::Theme;
use crate::ui::viewmodel::{TrendingItem, TRENDING_TITLE};
use std::io::{self, Write};

/// Writes the "Tendencia" heading and one numbered line per entry.
pub fn render_trending(out: &mut dyn Write, items: &[TrendingItem], theme: &Theme) -> io::Result<()> {
    writeln!(out, " {}{}{TRENDING_TITLE}{}", theme.bold(), theme.fg(&theme.colors.title_fg), theme.reset())?;

    for item in items {
        let searches = if item.count == 1 { "búsqueda" } else { "búsquedas" };
        writeln!(
            out,
            "  {}{}{:>2}{}  {}{}{}  {}· {} {searches}{}",
            theme.bold(),
            theme.fg(&theme.colors.accent),
            item.rank,
            theme.reset(),
            theme.fg(&theme.colors.text_normal),
            item.search_term,
            theme.reset(),
            theme.fg(&theme.colors.text_dim),
            item.count,
            theme.reset(),
        )?;
    }

    writeln!(out)
}
