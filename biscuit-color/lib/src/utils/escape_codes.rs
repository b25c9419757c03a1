//! Rendering and stripping of SGR color escape codes.
//!
//! All rendered text has the shape `\x1b[<codes>m<text>\x1b[0m`, where
//! `<codes>` is a `;`-joined list of SGR parameters.

use std::fmt::Display;
use std::sync::LazyLock;

use regex::Regex;

use crate::terminal::support::{is_support_color, no_color};

/// Escape sequence that resets all attributes.
pub const RESET: &str = "\x1b[0m";

/// Matches SGR sequences: `\x1b[` + parameters + `m`.
static COLOR_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("Invalid color code regex"));

/// Whether rendered output should carry escape codes.
///
/// False when colorless output was requested or the cached level is `None`.
pub fn color_enabled() -> bool {
    !no_color() && is_support_color()
}

/// Strip color codes from a string while retaining everything else.
pub fn clear_code<T: AsRef<str>>(content: T) -> String {
    COLOR_CODE_RE.replace_all(content.as_ref(), "").into_owned()
}

/// Whether the content contains any SGR color code.
pub fn has_color_codes<T: AsRef<str>>(content: T) -> bool {
    COLOR_CODE_RE.is_match(content.as_ref())
}

/// Wrap `text` in `code` unconditionally.
///
/// An empty code leaves the text unchanged.
pub fn wrap_code(code: &str, text: &str) -> String {
    if code.is_empty() {
        return text.to_string();
    }
    format!("\x1b[{code}m{text}{RESET}")
}

/// Render `args`, joined by single spaces, with the SGR `code`.
///
/// - no args → empty string
/// - empty code → the joined text, unchanged
/// - color disabled → the joined text with any color codes removed
///
/// ## Examples
///
/// ```
/// use biscuit_color::utils::escape_codes::render_code;
/// use biscuit_color::terminal::support::ColorOverride;
///
/// let _guard = ColorOverride::enabled();
/// assert_eq!(render_code("1;31", ["error:", "boom"]), "\x1b[1;31merror: boom\x1b[0m");
/// ```
pub fn render_code<I, D>(code: &str, args: I) -> String
where
    I: IntoIterator<Item = D>,
    D: Display,
{
    let message = args
        .into_iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(" ");

    if message.is_empty() || code.is_empty() {
        return message;
    }
    if !color_enabled() {
        return clear_code(message);
    }
    wrap_code(code, &message)
}

/// Render a single string with the SGR `code`.
///
/// Same rules as [`render_code`].
pub fn render_string(code: &str, text: &str) -> String {
    if code.is_empty() || text.is_empty() {
        return text.to_string();
    }
    if !color_enabled() {
        return clear_code(text);
    }
    wrap_code(code, text)
}
