//! Print helpers that render color tags on the way out.

use std::io::{self, Write};

use crate::utils::tags::parse_tag_by_env;

/// Render the tags in `content` for the current terminal.
pub fn sprint<T: AsRef<str>>(content: T) -> String {
    parse_tag_by_env(content)
}

/// Write `content` to `writer` with its tags rendered.
pub fn fprint<W: Write, T: AsRef<str>>(writer: &mut W, content: T) -> io::Result<()> {
    writer.write_all(sprint(content).as_bytes())
}

/// Like [`fprint`], followed by a newline.
pub fn fprintln<W: Write, T: AsRef<str>>(writer: &mut W, content: T) -> io::Result<()> {
    fprint(writer, content)?;
    writer.write_all(b"\n")
}

/// Print `content` to stdout with its tags rendered.
pub fn print<T: AsRef<str>>(content: T) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    fprint(&mut stdout, content)?;
    stdout.flush()
}

/// Print `content` and a newline to stdout with its tags rendered.
pub fn println<T: AsRef<str>>(content: T) -> io::Result<()> {
    fprintln(&mut io::stdout().lock(), content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::support::ColorOverride;
    use serial_test::serial;

    #[test]
    #[serial]
    fn fprint_renders_tags() {
        let _guard = ColorOverride::enabled();
        let mut out = Vec::new();
        fprint(&mut out, "<info>ok</>").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\x1b[0;32mok\x1b[0m");
    }

    #[test]
    #[serial]
    fn fprintln_strips_without_color() {
        let _guard = ColorOverride::disabled();
        let mut out = Vec::new();
        fprintln(&mut out, "<info>ok</>").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "ok\n");
    }
}
