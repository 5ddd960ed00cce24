//! Shared rendering utilities.
//!
//! Everything here writes to a `dyn Write` and measures text in characters,
//! not bytes, so accented titles line up.

use crate::ui::theme::Theme;
use std::io::{self, Write};

/// Clears the screen and moves the cursor home.
pub const CLEAR_SCREEN: &str = "\u{1b}[2J\u{1b}[H";

/// Width of `text` in characters.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Left padding that centers `len` characters in `cols`.
#[must_use]
pub const fn center_padding(len: usize, cols: usize) -> usize {
    cols.saturating_sub(len) / 2
}

/// Writes a horizontal rule of `cols` characters.
pub fn write_border(out: &mut dyn Write, color: &str, theme: &Theme, cols: usize) -> io::Result<()> {
    writeln!(out, "{}{}{}", theme.fg(color), "─".repeat(cols), theme.reset())
}

/// Writes `text` with the given character ranges highlighted.
///
/// Ranges are `(start, end)` character indices, end exclusive, sorted and
/// non-overlapping. Text outside the ranges is restored to `base_color`.
pub fn write_highlighted(
    out: &mut dyn Write,
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    base_color: &str,
) -> io::Result<()> {
    if ranges.is_empty() {
        return write!(out, "{text}");
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        let normal_section: String = chars[current_pos..start].iter().collect();
        write!(out, "{normal_section}")?;

        let highlighted_section: String = chars[start..end].iter().collect();
        write!(
            out,
            "{}{}{highlighted_section}{}{}",
            theme.fg(&theme.colors.match_highlight_fg),
            theme.bg(&theme.colors.match_highlight_bg),
            theme.reset(),
            theme.fg(base_color),
        )?;

        current_pos = end;
    }

    let remaining: String = chars[current_pos..].iter().collect();
    write!(out, "{remaining}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlighted_text_keeps_every_character() {
        let mut out = Vec::new();
        let theme = Theme::plain();
        write_highlighted(&mut out, "Amélie", &[(0, 1), (2, 4), (9, 12)], &theme, "#ffffff").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Amélie");
    }

    #[test]
    fn highlights_wrap_ranges_in_escape_codes() {
        let mut out = Vec::new();
        let theme = Theme::default();
        write_highlighted(&mut out, "Dune", &[(0, 2)], &theme, "#ffffff").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\u{1b}[38;2;"));
        assert!(text.contains("Du\u{1b}[0m"));
        assert!(text.ends_with("ne"));
    }

    #[test]
    fn centering_uses_character_counts() {
        assert_eq!(char_len("película"), 8);
        assert_eq!(center_padding(8, 20), 6);
        assert_eq!(center_padding(30, 20), 0);
    }
}
