//! Footer hint renderer.

use crate::ui::helpers::{center_padding, char_len};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;
use std::io::{self, Write};

/// Writes the centered, dimmed usage hint. Truncated on narrow terminals.
pub fn render_footer(out: &mut dyn Write, footer: &FooterInfo, theme: &Theme, cols: usize) -> io::Result<()> {
    let hint: String = footer.hint.chars().take(cols).collect();
    let padding = center_padding(char_len(&hint), cols);

    writeln!(
        out,
        "{}{}{}{hint}{}",
        " ".repeat(padding),
        theme.dim(),
        theme.fg(&theme.colors.text_dim),
        theme.reset()
    )
}
