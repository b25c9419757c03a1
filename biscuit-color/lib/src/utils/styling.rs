use std::fmt;

use serde::Serialize;

use crate::utils::color::Color;
use crate::utils::escape_codes::render_string;

/// **Style** struct
///
/// One foreground color, one background color and a set of text options,
/// serialized in that order as a `;`-joined SGR code string.
///
/// A style with nothing set serializes to an empty string and renders text
/// unchanged.
///
/// ## Examples
///
/// ```
/// use biscuit_color::utils::color::Color;
/// use biscuit_color::utils::styling::Style;
///
/// let style = Style::new()
///     .fg(Color::FG_WHITE)
///     .bg(Color::BG_RED)
///     .with(Color::OP_BOLD);
/// assert_eq!(style.code(), "37;41;1");
/// assert_eq!(Style::new().code(), "");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Style {
    fg: Option<Color>,
    bg: Option<Color>,
    /// bit `n` set means option code `n` (0-9) is enabled
    options: u16,
}

impl Style {
    pub const fn new() -> Style {
        Style {
            fg: None,
            bg: None,
            options: 0,
        }
    }

    /// Set the foreground color.
    pub const fn fg(mut self, color: Color) -> Style {
        self.fg = Some(color);
        self
    }

    /// Set the background color.
    pub const fn bg(mut self, color: Color) -> Style {
        self.bg = Some(color);
        self
    }

    /// Add a text option (bold, italic, ...). Non-option codes are ignored.
    pub const fn with(mut self, option: Color) -> Style {
        if option.is_option() {
            self.options |= 1 << option.code();
        }
        self
    }

    /// Build a style from a mixed list of colors, classifying each one.
    ///
    /// Later foreground/background colors replace earlier ones; codes that
    /// are neither colors nor options are dropped.
    pub fn from_colors<I: IntoIterator<Item = Color>>(colors: I) -> Style {
        colors.into_iter().fold(Style::new(), |style, c| {
            if c.is_fg() {
                style.fg(c)
            } else if c.is_bg() {
                style.bg(c)
            } else {
                style.with(c)
            }
        })
    }

    pub fn fg_color(&self) -> Option<Color> {
        self.fg
    }

    pub fn bg_color(&self) -> Option<Color> {
        self.bg
    }

    /// The enabled options, in ascending code order.
    pub fn options(&self) -> Vec<Color> {
        (0..=9u8)
            .filter(|n| self.options & (1 << n) != 0)
            .map(Color)
            .collect()
    }

    /// Whether the style serializes to an empty code.
    pub fn is_empty(&self) -> bool {
        self.code().is_empty()
    }

    /// The `;`-joined SGR code: foreground, background, then options.
    ///
    /// A foreground outside the foreground ranges (or a background outside
    /// the background ranges) is left out.
    pub fn code(&self) -> String {
        let mut codes: Vec<String> = Vec::with_capacity(4);

        if let Some(fg) = self.fg.filter(|c| c.is_fg()) {
            codes.push(fg.to_string());
        }
        if let Some(bg) = self.bg.filter(|c| c.is_bg()) {
            codes.push(bg.to_string());
        }
        codes.extend(self.options().iter().map(Color::to_string));

        codes.join(";")
    }

    /// Render `text` with this style (plain text when color is unsupported).
    pub fn render<T: AsRef<str>>(&self, text: T) -> String {
        render_string(&self.code(), text.as_ref())
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// green text
pub const INFO: Style = Style::new().fg(Color::FG_GREEN);
/// bold light blue text
pub const NOTE: Style = Style::new().fg(Color::FG_LIGHT_BLUE).with(Color::OP_BOLD);
/// light white on black
pub const LIGHT: Style = Style::new().fg(Color::FG_LIGHT_WHITE).bg(Color::BG_BLACK);
/// light white on red
pub const ERROR: Style = Style::new().fg(Color::FG_LIGHT_WHITE).bg(Color::BG_RED);
/// bold red text
pub const DANGER: Style = Style::new().fg(Color::FG_RED).with(Color::OP_BOLD);
/// bold cyan text
pub const NOTICE: Style = Style::new().fg(Color::FG_CYAN).with(Color::OP_BOLD);
/// bold green text
pub const SUCCESS: Style = Style::new().fg(Color::FG_GREEN).with(Color::OP_BOLD);
pub const COMMENT: Style = Style::new().fg(Color::FG_YELLOW);
pub const PRIMARY: Style = Style::new().fg(Color::FG_BLUE);
/// bold yellow text
pub const WARNING: Style = Style::new().fg(Color::FG_YELLOW).with(Color::OP_BOLD);
pub const QUESTION: Style = Style::new().fg(Color::FG_MAGENTA);
pub const SECONDARY: Style = Style::new().fg(Color::FG_DARK_GRAY);

/// Look up one of the predefined styles by name.
pub fn named_style(name: &str) -> Option<Style> {
    let style = match name {
        "info" => INFO,
        "note" => NOTE,
        "light" => LIGHT,
        "error" | "err" => ERROR,
        "danger" => DANGER,
        "notice" => NOTICE,
        "success" | "suc" => SUCCESS,
        "comment" => COMMENT,
        "primary" => PRIMARY,
        "warning" | "warn" => WARNING,
        "question" => QUESTION,
        "secondary" => SECONDARY,
        _ => return None,
    };
    Some(style)
}
