//! Status line renderers for the movie section: loading, error, no results.

use crate::ui::theme::Theme;
use crate::ui::viewmodel::LOADING_MESSAGE;
use std::io::{self, Write};

pub fn render_loading(out: &mut dyn Write, theme: &Theme) -> io::Result<()> {
    writeln!(out, "  {}⠋ {LOADING_MESSAGE}{}", theme.fg(&theme.colors.accent), theme.reset())
}

/// Writes `message` in the error color. Used for both failures and the
/// no-results notice.
pub fn render_message(out: &mut dyn Write, message: &str, theme: &Theme) -> io::Result<()> {
    writeln!(out, "  {}{message}{}", theme.fg(&theme.colors.error_fg), theme.reset())
}
