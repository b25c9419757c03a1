//! Snapshot of the environment variables used for color detection.
//!
//! Detection never reads the environment directly. It works on a [`TermEnv`]
//! so the decision procedure stays a pure function that tests can drive
//! with any set of values.

use std::env;

use serde::{Deserialize, Serialize};

/// The environment variables consulted while detecting color support.
///
/// Unset variables are stored as empty strings; absence and emptiness are
/// treated the same way everywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermEnv {
    /// `TERM`
    pub term: String,
    /// `TERMINAL_EMULATOR` (set by JetBrains IDEs)
    pub terminal_emulator: String,
    /// `COLORTERM`
    pub colorterm: String,
    /// `FORCE_COLOR`
    pub force_color: String,
    /// `TERM_PROGRAM`
    pub term_program: String,
    /// `TERM_PROGRAM_VERSION`
    pub term_program_version: String,
    /// `NO_COLOR`
    pub no_color: String,
    /// `WSL_DISTRO_NAME`
    pub wsl_distro_name: String,
    /// `ConEmuANSI`
    pub con_emu_ansi: String,
    /// `ANSICON`
    pub ansicon: String,
    /// `ANSICON_VER`
    pub ansicon_ver: String,
}

impl TermEnv {
    /// Names of every variable captured by a snapshot.
    pub const VARS: [&'static str; 11] = [
        "TERM",
        "TERMINAL_EMULATOR",
        "COLORTERM",
        "FORCE_COLOR",
        "TERM_PROGRAM",
        "TERM_PROGRAM_VERSION",
        "NO_COLOR",
        "WSL_DISTRO_NAME",
        "ConEmuANSI",
        "ANSICON",
        "ANSICON_VER",
    ];

    /// Capture the current process environment.
    pub fn from_env() -> TermEnv {
        TermEnv::from_lookup(|key| env::var(key).ok())
    }

    /// Build a snapshot from an arbitrary lookup function.
    ///
    /// ## Examples
    ///
    /// ```
    /// use biscuit_color::discovery::term_env::TermEnv;
    ///
    /// let env = TermEnv::from_lookup(|key| match key {
    ///     "TERM" => Some("xterm".to_string()),
    ///     _ => None,
    /// });
    /// assert_eq!(env.term, "xterm");
    /// assert!(env.colorterm.is_empty());
    /// ```
    pub fn from_lookup<F>(lookup: F) -> TermEnv
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).unwrap_or_default();

        TermEnv {
            term: get("TERM"),
            terminal_emulator: get("TERMINAL_EMULATOR"),
            colorterm: get("COLORTERM"),
            force_color: get("FORCE_COLOR"),
            term_program: get("TERM_PROGRAM"),
            term_program_version: get("TERM_PROGRAM_VERSION"),
            no_color: get("NO_COLOR"),
            wsl_distro_name: get("WSL_DISTRO_NAME"),
            con_emu_ansi: get("ConEmuANSI"),
            ansicon: get("ANSICON"),
            ansicon_ver: get("ANSICON_VER"),
        }
    }

    /// Build a snapshot from `(name, value)` pairs; unknown names are ignored.
    pub fn from_pairs<'a, I>(pairs: I) -> TermEnv
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let pairs: Vec<(&str, &str)> = pairs.into_iter().collect();
        TermEnv::from_lookup(|key| {
            pairs
                .iter()
                .rev()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        })
    }

    /// Whether `NO_COLOR` asks for colorless output.
    pub fn wants_no_color(&self) -> bool {
        !self.no_color.is_empty()
    }
}
