//! Color tag markup.
//!
//! Markup is a flat sequence of `<name>body</>` spans. Names are
//! `[0-9A-Za-z_]+`, the closing tag is always the bare `</>`, and there are
//! no attributes.
//!
//! Matching is lazy and single-pass, so tags do **not** nest: in
//! `<a><b>text</></>` the outer `<a>` span ends at the first `</>`, and the
//! inner `<b>` markup is left in its body as literal text.
//!
//! ## Examples
//!
//! ```
//! use biscuit_color::utils::tags::{clear_tag, parse_tag};
//!
//! assert_eq!(parse_tag("<info>ok</>"), "\x1b[0;32mok\x1b[0m");
//! assert_eq!(parse_tag("<bogus>x</>"), "<bogus>x</>");
//! assert_eq!(clear_tag("<bogus>x</> and <info>y</>"), "x and y");
//! ```

use std::{collections::HashMap, sync::LazyLock};

use regex::{Captures, Regex};

use crate::utils::escape_codes::{clear_code, color_enabled, render_string, wrap_code};

/// Closing tag of every span.
pub const CLOSE_TAG: &str = "</>";

/// Matches one well-formed span, capturing the tag name and the body.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([0-9A-Za-z_]+)>(?s:(.*?))</>").expect("Invalid color tag regex")
});

/// Lookup table mapping tag names to SGR codes.
pub static COLOR_TAGS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::with_capacity(128);

    // basic colors (the "1"/"B"/"_b" suffixes add bold)
    m.insert("red", "0;31");
    m.insert("red1", "1;31");
    m.insert("redB", "1;31");
    m.insert("red_b", "1;31");
    m.insert("blue", "0;34");
    m.insert("blue1", "1;34");
    m.insert("blueB", "1;34");
    m.insert("blue_b", "1;34");
    m.insert("cyan", "0;36");
    m.insert("cyan1", "1;36");
    m.insert("cyanB", "1;36");
    m.insert("cyan_b", "1;36");
    m.insert("green", "0;32");
    m.insert("green1", "1;32");
    m.insert("greenB", "1;32");
    m.insert("green_b", "1;32");
    m.insert("black", "0;30");
    m.insert("white", "1;37");
    m.insert("default", "0;39");
    m.insert("normal", "0;39");
    m.insert("brown", "0;33");
    m.insert("yellow", "0;33");
    m.insert("ylw0", "0;33");
    m.insert("yellowB", "1;33");
    m.insert("ylw1", "1;33");
    m.insert("ylwB", "1;33");
    m.insert("magenta", "0;35");
    m.insert("mga", "0;35");
    m.insert("magentaB", "1;35");
    m.insert("magenta1", "1;35");
    m.insert("mgb", "1;35");
    m.insert("mga1", "1;35");
    m.insert("mgaB", "1;35");

    // high-intensity colors
    m.insert("gray", "0;90");
    m.insert("darkGray", "0;90");
    m.insert("dark_gray", "0;90");
    m.insert("lightYellow", "0;93");
    m.insert("light_yellow", "0;93");
    m.insert("hiYellow", "0;93");
    m.insert("hi_yellow", "0;93");
    m.insert("hiYellowB", "1;93");
    m.insert("hi_yellow_b", "1;93");
    m.insert("lightMagenta", "0;95");
    m.insert("light_magenta", "0;95");
    m.insert("hiMagenta", "0;95");
    m.insert("hi_magenta", "0;95");
    m.insert("lightMagenta1", "1;95");
    m.insert("hiMagentaB", "1;95");
    m.insert("hi_magenta_b", "1;95");
    m.insert("lightRed", "0;91");
    m.insert("light_red", "0;91");
    m.insert("hiRed", "0;91");
    m.insert("hi_red", "0;91");
    m.insert("lightRedB", "1;91");
    m.insert("light_red_b", "1;91");
    m.insert("hi_red_b", "1;91");
    m.insert("lightGreen", "0;92");
    m.insert("light_green", "0;92");
    m.insert("hiGreen", "0;92");
    m.insert("hi_green", "0;92");
    m.insert("lightGreenB", "1;92");
    m.insert("light_green_b", "1;92");
    m.insert("hi_green_b", "1;92");
    m.insert("lightBlue", "0;94");
    m.insert("light_blue", "0;94");
    m.insert("hiBlue", "0;94");
    m.insert("hi_blue", "0;94");
    m.insert("lightBlueB", "1;94");
    m.insert("light_blue_b", "1;94");
    m.insert("hi_blue_b", "1;94");
    m.insert("lightCyan", "0;96");
    m.insert("light_cyan", "0;96");
    m.insert("hiCyan", "0;96");
    m.insert("hi_cyan", "0;96");
    m.insert("lightCyanB", "1;96");
    m.insert("light_cyan_b", "1;96");
    m.insert("hi_cyan_b", "1;96");
    m.insert("lightWhite", "0;97;40");
    m.insert("light_white", "0;97;40");

    // text options
    m.insert("bold", "1");
    m.insert("b", "1");
    m.insert("italic", "3");
    m.insert("i", "3");
    m.insert("underscore", "4");
    m.insert("us", "4");
    m.insert("blink", "5");
    m.insert("fb", "6");
    m.insert("reverse", "7");
    m.insert("st", "9");

    // alert styles
    m.insert("suc", "1;32");
    m.insert("success", "1;32");
    m.insert("info", "0;32");
    m.insert("comment", "0;33");
    m.insert("note", "36;1");
    m.insert("notice", "36;4");
    m.insert("warn", "0;1;33");
    m.insert("warning", "0;30;43");
    m.insert("primary", "0;34");
    m.insert("danger", "1;31");
    m.insert("err", "97;41");
    m.insert("error", "97;41");

    m
});

/// The SGR code of a tag, if the tag is known.
pub fn tag_code(name: &str) -> Option<&'static str> {
    COLOR_TAGS.get(name).copied()
}

/// Every known tag name, sorted.
pub fn tag_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = COLOR_TAGS.keys().copied().collect();
    names.sort_unstable();
    names
}

/// Replace every known `<name>body</>` span with its escape sequence.
///
/// Substitution is unconditional; unknown tags are left exactly as written,
/// angle brackets included.
pub fn parse_tag<T: AsRef<str>>(content: T) -> String {
    let content = content.as_ref();
    if !content.contains(CLOSE_TAG) {
        return content.to_string();
    }

    TAG_RE
        .replace_all(content, |caps: &Captures| match tag_code(&caps[1]) {
            Some(code) => wrap_code(code, &caps[2]),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Remove the markup of every `<name>body</>` span (known or not) and any
/// color codes, keeping only the body text.
///
/// Text outside a complete span, including unterminated tags, is kept as is.
pub fn clear_tag<T: AsRef<str>>(content: T) -> String {
    let content = content.as_ref();
    if !content.contains(CLOSE_TAG) {
        return clear_code(content);
    }

    clear_code(TAG_RE.replace_all(content, "$2"))
}

/// Render tags when the terminal supports color, strip them otherwise.
pub fn parse_tag_by_env<T: AsRef<str>>(content: T) -> String {
    if color_enabled() {
        parse_tag(content)
    } else {
        clear_tag(content)
    }
}

/// Render `text` with the code of `tag` (plain text for unknown tags or when
/// color is unsupported).
pub fn apply_tag(tag: &str, text: &str) -> String {
    render_string(tag_code(tag).unwrap_or_default(), text)
}

/// Wrap `text` in `<tag>...</>` markup.
pub fn wrap_tag(text: &str, tag: &str) -> String {
    if tag.is_empty() || text.is_empty() {
        return text.to_string();
    }
    format!("<{tag}>{text}{CLOSE_TAG}")
}
