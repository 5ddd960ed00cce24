//! Title header renderer.

use crate::ui::helpers::center_padding;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;
use std::io::{self, Write};

/// Writes the centered title with its accented word, followed by a blank line.
pub fn render_header(out: &mut dyn Write, header: &HeaderInfo, theme: &Theme, cols: usize) -> io::Result<()> {
    let padding = center_padding(header.len(), cols);
    let title_color = theme.fg(&theme.colors.title_fg);

    writeln!(out)?;
    writeln!(
        out,
        "{}{}{title_color}{}{}{}{title_color}{}{}",
        " ".repeat(padding),
        theme.bold(),
        header.before,
        theme.fg(&theme.colors.accent),
        header.accent,
        header.after,
        theme.reset(),
    )?;
    writeln!(out)
}
