use std::{collections::HashMap, fmt, str::FromStr, sync::LazyLock};

use serde::{Deserialize, Serialize};

use crate::error::ColorError;
use crate::utils::escape_codes::{render_code, render_string};

/// Offset between a base color and its high-intensity ("light") variant.
const LIGHT_OFFSET: u8 = 60;

/// Offset between a foreground color and the matching background color.
const BG_OFFSET: u8 = 10;

/// A single ANSI SGR parameter: a foreground color, a background color or a
/// text option such as bold.
///
/// ## Examples
///
/// ```
/// use biscuit_color::utils::color::Color;
///
/// assert_eq!(Color(36).light(), Color(96));
/// assert_eq!(Color(96).darken(), Color(36));
/// assert_eq!(Color::FG_RED.to_bg(), Color::BG_RED);
///
/// // options are outside the color ranges and pass through unchanged
/// assert_eq!(Color(5).light(), Color(5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Color(pub u8);

impl Color {
    pub const FG_BLACK: Color = Color(30);
    pub const FG_RED: Color = Color(31);
    pub const FG_GREEN: Color = Color(32);
    pub const FG_YELLOW: Color = Color(33);
    pub const FG_BLUE: Color = Color(34);
    pub const FG_MAGENTA: Color = Color(35);
    pub const FG_CYAN: Color = Color(36);
    pub const FG_WHITE: Color = Color(37);
    pub const FG_DEFAULT: Color = Color(39);

    pub const FG_DARK_GRAY: Color = Color(90);
    pub const FG_GRAY: Color = Color(90);
    pub const FG_LIGHT_RED: Color = Color(91);
    pub const FG_LIGHT_GREEN: Color = Color(92);
    pub const FG_LIGHT_YELLOW: Color = Color(93);
    pub const FG_LIGHT_BLUE: Color = Color(94);
    pub const FG_LIGHT_MAGENTA: Color = Color(95);
    pub const FG_LIGHT_CYAN: Color = Color(96);
    pub const FG_LIGHT_WHITE: Color = Color(97);

    pub const BG_BLACK: Color = Color(40);
    pub const BG_RED: Color = Color(41);
    pub const BG_GREEN: Color = Color(42);
    pub const BG_YELLOW: Color = Color(43);
    pub const BG_BLUE: Color = Color(44);
    pub const BG_MAGENTA: Color = Color(45);
    pub const BG_CYAN: Color = Color(46);
    pub const BG_WHITE: Color = Color(47);
    pub const BG_DEFAULT: Color = Color(49);

    pub const BG_DARK_GRAY: Color = Color(100);
    pub const BG_GRAY: Color = Color(100);
    pub const BG_LIGHT_RED: Color = Color(101);
    pub const BG_LIGHT_GREEN: Color = Color(102);
    pub const BG_LIGHT_YELLOW: Color = Color(103);
    pub const BG_LIGHT_BLUE: Color = Color(104);
    pub const BG_LIGHT_MAGENTA: Color = Color(105);
    pub const BG_LIGHT_CYAN: Color = Color(106);
    pub const BG_LIGHT_WHITE: Color = Color(107);

    pub const OP_RESET: Color = Color(0);
    pub const OP_BOLD: Color = Color(1);
    pub const OP_FUZZY: Color = Color(2);
    pub const OP_ITALIC: Color = Color(3);
    pub const OP_UNDERSCORE: Color = Color(4);
    pub const OP_BLINK: Color = Color(5);
    pub const OP_FAST_BLINK: Color = Color(6);
    pub const OP_REVERSE: Color = Color(7);
    pub const OP_CONCEALED: Color = Color(8);
    pub const OP_STRIKETHROUGH: Color = Color(9);

    /// Creates a new `Color` from a raw SGR parameter.
    #[inline]
    pub const fn new(code: u8) -> Self {
        Self(code)
    }

    /// Returns the raw SGR parameter.
    #[inline]
    pub const fn code(self) -> u8 {
        self.0
    }

    /// Foreground colors: 30-37, 39 and the high-intensity 90-97.
    pub const fn is_fg(self) -> bool {
        matches!(self.0, 30..=37 | 39 | 90..=97)
    }

    /// Background colors: 40-47, 49 and the high-intensity 100-107.
    pub const fn is_bg(self) -> bool {
        matches!(self.0, 40..=47 | 49 | 100..=107)
    }

    /// Text options (reset, bold, italic, ...): 0-9.
    pub const fn is_option(self) -> bool {
        self.0 <= 9
    }

    /// Whether the code is one this crate knows how to classify.
    pub const fn is_valid(self) -> bool {
        self.is_fg() || self.is_bg() || self.is_option()
    }

    /// The high-intensity variant of a base color (30-47 → 90-107).
    pub const fn light(self) -> Color {
        match self.0 {
            30..=47 => Color(self.0 + LIGHT_OFFSET),
            _ => self,
        }
    }

    /// The base variant of a high-intensity color (90-107 → 30-47).
    pub const fn darken(self) -> Color {
        match self.0 {
            90..=107 => Color(self.0 - LIGHT_OFFSET),
            _ => self,
        }
    }

    /// The foreground counterpart of a background color.
    pub const fn to_fg(self) -> Color {
        match self.0 {
            40..=47 | 49 | 100..=107 => Color(self.0 - BG_OFFSET),
            _ => self,
        }
    }

    /// The background counterpart of a foreground color.
    pub const fn to_bg(self) -> Color {
        match self.0 {
            30..=37 | 39 | 90..=97 => Color(self.0 + BG_OFFSET),
            _ => self,
        }
    }

    /// Look a color up by name, e.g. `red`, `lightBlue`, `bold`.
    ///
    /// Color names resolve to foreground colors; use [`Color::to_bg`] for
    /// the background variant.
    pub fn from_name(name: &str) -> Result<Color, ColorError> {
        COLOR_NAMES
            .get(name)
            .copied()
            .ok_or_else(|| ColorError::UnknownColor(name.to_string()))
    }

    /// The canonical name of the color, if it has one.
    pub fn name(self) -> Option<&'static str> {
        let color = if self.is_bg() { self.to_fg() } else { self };
        CANONICAL_NAMES
            .iter()
            .find(|(_, c)| *c == color)
            .map(|(name, _)| *name)
    }

    /// Render `text` in this color (plain text when color is unsupported).
    pub fn render<T: AsRef<str>>(self, text: T) -> String {
        render_string(&self.to_string(), text.as_ref())
    }

    /// Render `args`, joined by single spaces, in this color.
    pub fn sprint<I, D>(self, args: I) -> String
    where
        I: IntoIterator<Item = D>,
        D: fmt::Display,
    {
        render_code(&self.to_string(), args)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for Color {
    #[inline]
    fn from(code: u8) -> Self {
        Self(code)
    }
}

impl From<Color> for u8 {
    #[inline]
    fn from(color: Color) -> Self {
        color.0
    }
}

impl FromStr for Color {
    type Err = ColorError;

    /// Accepts either a color name or a numeric SGR code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<u8>() {
            let color = Color(code);
            if color.is_valid() {
                return Ok(color);
            }
        }
        Color::from_name(s)
    }
}

/// Names used when displaying a color, in lookup priority order.
const CANONICAL_NAMES: [(&str, Color); 28] = [
    ("black", Color::FG_BLACK),
    ("red", Color::FG_RED),
    ("green", Color::FG_GREEN),
    ("yellow", Color::FG_YELLOW),
    ("blue", Color::FG_BLUE),
    ("magenta", Color::FG_MAGENTA),
    ("cyan", Color::FG_CYAN),
    ("white", Color::FG_WHITE),
    ("default", Color::FG_DEFAULT),
    ("gray", Color::FG_GRAY),
    ("lightRed", Color::FG_LIGHT_RED),
    ("lightGreen", Color::FG_LIGHT_GREEN),
    ("lightYellow", Color::FG_LIGHT_YELLOW),
    ("lightBlue", Color::FG_LIGHT_BLUE),
    ("lightMagenta", Color::FG_LIGHT_MAGENTA),
    ("lightCyan", Color::FG_LIGHT_CYAN),
    ("lightWhite", Color::FG_LIGHT_WHITE),
    ("reset", Color::OP_RESET),
    ("bold", Color::OP_BOLD),
    ("fuzzy", Color::OP_FUZZY),
    ("italic", Color::OP_ITALIC),
    ("underscore", Color::OP_UNDERSCORE),
    ("blink", Color::OP_BLINK),
    ("fastBlink", Color::OP_FAST_BLINK),
    ("reverse", Color::OP_REVERSE),
    ("concealed", Color::OP_CONCEALED),
    ("strikethrough", Color::OP_STRIKETHROUGH),
    ("darkGray", Color::FG_DARK_GRAY),
];

/// Lookup table of every accepted color name, including snake_case and
/// `hi*` aliases.
pub static COLOR_NAMES: LazyLock<HashMap<&'static str, Color>> = LazyLock::new(|| {
    let mut m: HashMap<&'static str, Color> = CANONICAL_NAMES.iter().copied().collect();

    m.insert("dark_gray", Color::FG_DARK_GRAY);
    m.insert("grey", Color::FG_GRAY);

    m.insert("light_red", Color::FG_LIGHT_RED);
    m.insert("hiRed", Color::FG_LIGHT_RED);
    m.insert("light_green", Color::FG_LIGHT_GREEN);
    m.insert("hiGreen", Color::FG_LIGHT_GREEN);
    m.insert("light_yellow", Color::FG_LIGHT_YELLOW);
    m.insert("hiYellow", Color::FG_LIGHT_YELLOW);
    m.insert("light_blue", Color::FG_LIGHT_BLUE);
    m.insert("hiBlue", Color::FG_LIGHT_BLUE);
    m.insert("light_magenta", Color::FG_LIGHT_MAGENTA);
    m.insert("hiMagenta", Color::FG_LIGHT_MAGENTA);
    m.insert("light_cyan", Color::FG_LIGHT_CYAN);
    m.insert("hiCyan", Color::FG_LIGHT_CYAN);
    m.insert("light_white", Color::FG_LIGHT_WHITE);
    m.insert("hiWhite", Color::FG_LIGHT_WHITE);

    m.insert("fast_blink", Color::OP_FAST_BLINK);
    m.insert("underline", Color::OP_UNDERSCORE);

    m
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_and_darken_shift_by_sixty() {
        assert_eq!(Color(36).light(), Color(96));
        assert_eq!(Color(96).darken(), Color(36));
        assert_eq!(Color::BG_BLUE.light(), Color::BG_LIGHT_BLUE);
        assert_eq!(Color::BG_LIGHT_BLUE.darken(), Color::BG_BLUE);
    }

    #[test]
    fn transforms_pass_through_out_of_range() {
        assert_eq!(Color(5).light(), Color(5));
        assert_eq!(Color(5).darken(), Color(5));
        assert_eq!(Color(96).light(), Color(96));
        assert_eq!(Color(36).darken(), Color(36));
        assert_eq!(Color::OP_BOLD.to_bg(), Color::OP_BOLD);
        assert_eq!(Color::OP_BOLD.to_fg(), Color::OP_BOLD);
        assert_eq!(Color(200).light(), Color(200));
    }

    #[test]
    fn fg_bg_conversion() {
        assert_eq!(Color::FG_RED.to_bg(), Color::BG_RED);
        assert_eq!(Color::BG_RED.to_fg(), Color::FG_RED);
        assert_eq!(Color::FG_LIGHT_CYAN.to_bg(), Color::BG_LIGHT_CYAN);
        assert_eq!(Color::FG_DEFAULT.to_bg(), Color::BG_DEFAULT);
        // already in the target range
        assert_eq!(Color::BG_RED.to_bg(), Color::BG_RED);
        assert_eq!(Color::FG_RED.to_fg(), Color::FG_RED);
    }

    #[test]
    fn classification() {
        assert!(Color::FG_GREEN.is_fg());
        assert!(!Color::FG_GREEN.is_bg());
        assert!(Color::BG_LIGHT_WHITE.is_bg());
        assert!(Color::OP_STRIKETHROUGH.is_option());
        assert!(!Color(38).is_valid());
        assert!(!Color(108).is_valid());
    }

    #[test]
    fn names_resolve_both_ways() {
        assert_eq!(Color::from_name("lightBlue").unwrap(), Color::FG_LIGHT_BLUE);
        assert_eq!(Color::from_name("light_blue").unwrap(), Color::FG_LIGHT_BLUE);
        assert_eq!(Color::from_name("bold").unwrap(), Color::OP_BOLD);
        assert_eq!(Color::FG_RED.name(), Some("red"));
        assert_eq!(Color::BG_RED.name(), Some("red"));
        assert_eq!(Color::FG_GRAY.name(), Some("gray"));
        assert_eq!(Color(38).name(), None);
    }

    #[test]
    fn from_str_accepts_codes_and_names() {
        assert_eq!("31".parse::<Color>().unwrap(), Color::FG_RED);
        assert_eq!("magenta".parse::<Color>().unwrap(), Color::FG_MAGENTA);
        assert!(matches!(
            "38".parse::<Color>(),
            Err(ColorError::UnknownColor(_))
        ));
        assert!("chartreuse".parse::<Color>().is_err());
    }

    #[test]
    fn display_is_the_code() {
        assert_eq!(Color::BG_LIGHT_WHITE.to_string(), "107");
        assert_eq!(Color::OP_RESET.to_string(), "0");
    }

    #[test]
    #[serial_test::serial]
    fn sprint_joins_args() {
        use crate::terminal::support::ColorOverride;

        {
            let _guard = ColorOverride::enabled();
            assert_eq!(Color::FG_RED.sprint(["exit", "code"]), "\x1b[31mexit code\x1b[0m");
            assert_eq!(Color::FG_GREEN.sprint([1, 2]), "\x1b[32m1 2\x1b[0m");
        }
        let _guard = ColorOverride::disabled();
        assert_eq!(Color::FG_RED.sprint(["exit", "code"]), "exit code");
    }
}
