//! Color schemes and ANSI escape sequence generation.
//!
//! Three built-in themes are available: `dark` (default), `light`, and
//! `plain`. The plain theme emits no escape sequences at all, which is what
//! tests and non-terminal outputs want.
//!
//! # Example
//!
//! ```
//! use cinefind::ui::Theme;
//!
//! let theme = Theme::from_name("dark").unwrap();
//! let title = format!("{}{}Cinefind{}", theme.bold(), theme.fg(&theme.colors.title_fg), theme.reset());
//! assert!(title.contains("Cinefind"));
//! ```

/// Color scheme for terminal rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Built-in theme name.
    pub name: String,
    /// Color palette, as `#rrggbb` hex strings.
    pub colors: ThemeColors,
    /// Whether escape sequences are emitted.
    pub ansi: bool,
}

/// Color definitions for all UI elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeColors {
    pub title_fg: String,
    /// Accent used for the highlighted word of the title and trending ranks.
    pub accent: String,
    pub text_normal: String,
    /// Dimmed text (footer, placeholders, secondary movie info).
    pub text_dim: String,
    pub border: String,
    pub search_bar_border: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,
    pub rating_fg: String,
    pub error_fg: String,
}

impl ThemeColors {
    fn dark() -> Self {
        Self {
            title_fg: "#ffffff".to_string(),
            accent: "#d6c7ff".to_string(),
            text_normal: "#cecefb".to_string(),
            text_dim: "#a8b5db".to_string(),
            border: "#221f3d".to_string(),
            search_bar_border: "#ab8bff".to_string(),
            match_highlight_fg: "#030014".to_string(),
            match_highlight_bg: "#d6c7ff".to_string(),
            rating_fg: "#f9e2af".to_string(),
            error_fg: "#ef4444".to_string(),
        }
    }

    fn light() -> Self {
        Self {
            title_fg: "#030014".to_string(),
            accent: "#7c3aed".to_string(),
            text_normal: "#1e1b4b".to_string(),
            text_dim: "#6c7086".to_string(),
            border: "#ccd0da".to_string(),
            search_bar_border: "#7c3aed".to_string(),
            match_highlight_fg: "#ffffff".to_string(),
            match_highlight_bg: "#7c3aed".to_string(),
            rating_fg: "#df8e1d".to_string(),
            error_fg: "#d20f39".to_string(),
        }
    }
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` for unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let (colors, ansi) = match name {
            "dark" => (ThemeColors::dark(), true),
            "light" => (ThemeColors::light(), true),
            "plain" => (ThemeColors::dark(), false),
            _ => return None,
        };

        Some(Self {
            name: name.to_string(),
            colors,
            ansi,
        })
    }

    /// Theme that renders text without any escape sequences.
    #[must_use]
    pub fn plain() -> Self {
        Self {
            name: "plain".to_string(),
            colors: ThemeColors::dark(),
            ansi: false,
        }
    }

    /// Converts a hex color to an RGB tuple, falling back to white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// 24-bit foreground color sequence (`\x1b[38;2;r;g;bm`).
    #[must_use]
    pub fn fg(&self, hex: &str) -> String {
        if !self.ansi {
            return String::new();
        }
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background color sequence (`\x1b[48;2;r;g;bm`).
    #[must_use]
    pub fn bg(&self, hex: &str) -> String {
        if !self.ansi {
            return String::new();
        }
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold(&self) -> &'static str {
        if self.ansi {
            "\u{001b}[1m"
        } else {
            ""
        }
    }

    #[must_use]
    pub const fn dim(&self) -> &'static str {
        if self.ansi {
            "\u{001b}[2m"
        } else {
            ""
        }
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset(&self) -> &'static str {
        if self.ansi {
            "\u{001b}[0m"
        } else {
            ""
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "dark".to_string(),
            colors: ThemeColors::dark(),
            ansi: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_become_truecolor_sequences() {
        let theme = Theme::default();
        assert_eq!(theme.fg("#ff8000"), "\u{1b}[38;2;255;128;0m");
        assert_eq!(theme.bg("030014"), "\u{1b}[48;2;3;0;20m");
        assert_eq!(theme.fg("nope"), "\u{1b}[38;2;255;255;255m");
    }

    #[test]
    fn plain_theme_emits_nothing() {
        let theme = Theme::from_name("plain").unwrap();
        assert_eq!(theme.fg("#ff8000"), "");
        assert_eq!(theme.bold(), "");
        assert_eq!(theme.reset(), "");
        assert!(Theme::from_name("solarized").is_none());
    }
}
