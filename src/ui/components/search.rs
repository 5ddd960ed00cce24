//! Search bar renderer.

use crate::ui::helpers::char_len;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;
use std::io::{self, Write};

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

/// Writes a 3-line bordered box with the query, or the dimmed placeholder
/// when the query is empty.
///
/// ```text
/// [margin] ┌─────────────────┐
/// [margin] │ 🔍 query        │
/// [margin] └─────────────────┘
/// ```
pub fn render_search_bar(out: &mut dyn Write, search: &SearchBarInfo, theme: &Theme, cols: usize) -> io::Result<()> {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2).max(12);
    let inner_width = box_width.saturating_sub(2);
    let margin = " ".repeat(SEARCH_BOX_MARGIN);
    let border = theme.fg(&theme.colors.search_bar_border);

    writeln!(out, "{margin}{border}┌{}┐{}", "─".repeat(inner_width), theme.reset())?;

    let (text, style) = if search.query.is_empty() {
        (search.placeholder.as_str(), format!("{}{}", theme.dim(), theme.fg(&theme.colors.text_dim)))
    } else {
        (search.query.as_str(), theme.fg(&theme.colors.text_normal))
    };
    let content = format!(" > {text}");
    let padding = inner_width.saturating_sub(char_len(&content));

    writeln!(
        out,
        "{margin}{border}│{}{style}{content}{}{}{border}│{}",
        theme.reset(),
        " ".repeat(padding),
        theme.reset(),
        theme.reset(),
    )?;

    writeln!(out, "{margin}{border}└{}┘{}", "─".repeat(inner_width), theme.reset())
}
