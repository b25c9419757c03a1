/// Error types for the biscuit-color library.
///
/// Nothing on the rendering path returns these. They surface through
/// [`Detection::warning`](crate::discovery::detection::Detection),
/// the one-shot [`last_err`](crate::terminal::support::last_err) slot and
/// the `FromStr` parsers.
#[derive(Debug, thiserror::Error)]
pub enum ColorError {
    /// `TERM_PROGRAM_VERSION` could not be parsed while detecting iTerm2.
    #[error("invalid TERM_PROGRAM_VERSION value: {0:?}")]
    InvalidTermProgramVersion(String),

    /// A Windows console-mode call failed.
    ///
    /// The `op` field names the call that failed (e.g. "SetConsoleMode").
    #[error("console mode call {op} failed: {source}")]
    ConsoleMode {
        op: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// A string could not be parsed into a `ColorLevel`.
    #[error("unknown color level: {0:?}")]
    UnknownLevel(String),

    /// A string could not be parsed into a `Color`.
    #[error("unknown color name: {0:?}")]
    UnknownColor(String),
}

/// Convenience Result type for biscuit-color operations.
pub type Result<T> = std::result::Result<T, ColorError>;
