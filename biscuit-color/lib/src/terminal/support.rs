//! Process-wide color support state.
//!
//! The level is detected once, on first access, and cached. Tests can force
//! a different level; every force operation backs up the previous state into
//! a single slot which [`revert_color_support`] restores.
//!
//! The state sits behind a lock so reads never see a torn value, but forcing
//! is still global: tests that force levels must not run in parallel with
//! tests that read them (use `#[serial_test::serial]`).
//!
//! ## Examples
//!
//! ```
//! use biscuit_color::discovery::level::ColorLevel;
//! use biscuit_color::terminal::support::{ColorOverride, term_color_level};
//!
//! {
//!     let _guard = ColorOverride::level(ColorLevel::Color256);
//!     assert_eq!(term_color_level(), ColorLevel::Color256);
//! }
//! // previous level restored here
//! ```

use std::sync::{LazyLock, Mutex, RwLock};

use crate::discovery::console::enable_virtual_terminal_processing;
use crate::discovery::detection::{Detection, detect};
use crate::discovery::level::ColorLevel;
use crate::discovery::term_env::TermEnv;
use crate::error::ColorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Snapshot {
    level: ColorLevel,
    no_color: bool,
}

#[derive(Debug)]
struct ColorSupport {
    current: Snapshot,
    backup: Snapshot,
}

static STATE: LazyLock<RwLock<ColorSupport>> = LazyLock::new(|| RwLock::new(init_support()));

static LAST_ERR: Mutex<Option<ColorError>> = Mutex::new(None);

/// Detect once and apply the Windows console side effect if needed.
fn init_support() -> ColorSupport {
    let no_color = TermEnv::from_env().wants_no_color();
    build_support(detect(), no_color, enable_virtual_terminal_processing)
}

/// Turn a detection into the cached state.
///
/// Warnings go to the [`last_err`] slot. When `enable` fails the level
/// degrades to `None` and its error replaces any earlier warning.
fn build_support(
    detection: Detection,
    no_color: bool,
    enable: impl FnOnce() -> Result<(), ColorError>,
) -> ColorSupport {
    let Detection {
        mut level,
        needs_vtp,
        warning,
        ..
    } = detection;

    if let Some(warning) = warning {
        save_last_err(warning);
    }

    if needs_vtp && let Err(e) = enable() {
        tracing::warn!(
            error = %e,
            "Failed to enable virtual terminal processing, disabling color"
        );
        save_last_err(e);
        level = ColorLevel::None;
    }

    let current = Snapshot { level, no_color };
    ColorSupport {
        current,
        backup: current,
    }
}

fn save_last_err(err: ColorError) {
    let mut slot = LAST_ERR.lock().unwrap_or_else(|e| e.into_inner());
    *slot = Some(err);
}

fn read_state() -> Snapshot {
    STATE.read().unwrap_or_else(|e| e.into_inner()).current
}

/// Back up the current state, then apply `f` to it.
fn force(f: impl FnOnce(&mut Snapshot)) -> Snapshot {
    let mut state = STATE.write().unwrap_or_else(|e| e.into_inner());
    let previous = state.current;
    state.backup = previous;
    f(&mut state.current);
    tracing::debug!(
        from = ?previous.level,
        to = ?state.current.level,
        no_color = state.current.no_color,
        "Forced color support"
    );
    previous
}

/// The cached color level of the attached terminal.
pub fn term_color_level() -> ColorLevel {
    read_state().level
}

/// Whether colorless output was requested (`NO_COLOR`, or [`disable_color`]).
pub fn no_color() -> bool {
    read_state().no_color
}

/// Whether the terminal supports at least 16 colors.
pub fn is_support_color() -> bool {
    term_color_level() > ColorLevel::None
}

/// Whether the terminal supports at least 256 colors.
pub fn is_support_256_color() -> bool {
    term_color_level() >= ColorLevel::Color256
}

/// Whether the terminal supports 24-bit color.
pub fn is_support_true_color() -> bool {
    term_color_level() == ColorLevel::TrueColor
}

/// Force the cached level, returning the previous one.
pub fn set_color_level(level: ColorLevel) -> ColorLevel {
    force(|s| s.level = level).level
}

/// Force true color output and clear the no-color flag.
pub fn force_enable_color() {
    force(|s| {
        s.level = ColorLevel::TrueColor;
        s.no_color = false;
    });
}

/// Disable color output for the rest of the process (or until reverted).
pub fn disable_color() {
    force(|s| {
        s.level = ColorLevel::None;
        s.no_color = true;
    });
}

/// Restore the state saved by the last force operation.
pub fn revert_color_support() {
    let mut state = STATE.write().unwrap_or_else(|e| e.into_inner());
    state.current = state.backup;
    tracing::debug!(level = ?state.current.level, "Reverted color support");
}

/// Take the last internal error, clearing the slot.
///
/// Set when the init-time detection met a non-fatal problem, such as a
/// failed Windows console-mode call.
pub fn last_err() -> Option<ColorError> {
    // detection runs on first access; make sure it had the chance to report
    LazyLock::force(&STATE);
    LAST_ERR.lock().unwrap_or_else(|e| e.into_inner()).take()
}

/// Scoped override of the cached color state.
///
/// The previous state is restored when the guard drops, independently of
/// the single backup slot used by [`revert_color_support`].
#[derive(Debug)]
#[must_use = "the override is reverted as soon as the guard is dropped"]
pub struct ColorOverride {
    saved: Snapshot,
}

impl ColorOverride {
    fn apply(f: impl FnOnce(&mut Snapshot)) -> ColorOverride {
        let mut state = STATE.write().unwrap_or_else(|e| e.into_inner());
        let saved = state.current;
        f(&mut state.current);
        ColorOverride { saved }
    }

    /// Force `level`, leaving the no-color flag untouched.
    pub fn level(level: ColorLevel) -> ColorOverride {
        ColorOverride::apply(|s| s.level = level)
    }

    /// Force true color with the no-color flag cleared.
    pub fn enabled() -> ColorOverride {
        ColorOverride::apply(|s| {
            s.level = ColorLevel::TrueColor;
            s.no_color = false;
        })
    }

    /// Force colorless output.
    pub fn disabled() -> ColorOverride {
        ColorOverride::apply(|s| {
            s.level = ColorLevel::None;
            s.no_color = true;
        })
    }
}

impl Drop for ColorOverride {
    fn drop(&mut self) {
        let mut state = STATE.write().unwrap_or_else(|e| e.into_inner());
        state.current = self.saved;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::detection::DetectionSource;
    use serial_test::serial;

    #[test]
    #[serial]
    fn predicates_follow_the_level() {
        let _guard = ColorOverride::level(ColorLevel::None);

        for level in ColorLevel::ALL {
            set_color_level(level);
            assert_eq!(is_support_color(), level > ColorLevel::None);
            assert_eq!(is_support_256_color(), level >= ColorLevel::Color256);
            assert_eq!(is_support_true_color(), level == ColorLevel::TrueColor);
        }
    }

    #[test]
    #[serial]
    fn force_enable_then_revert_round_trips() {
        let _guard = ColorOverride::level(ColorLevel::Basic16);
        let before = (term_color_level(), no_color());

        force_enable_color();
        assert_eq!(term_color_level(), ColorLevel::TrueColor);
        assert!(!no_color());

        revert_color_support();
        assert_eq!((term_color_level(), no_color()), before);
    }

    #[test]
    #[serial]
    fn disable_then_revert_round_trips() {
        let _guard = ColorOverride::enabled();

        disable_color();
        assert_eq!(term_color_level(), ColorLevel::None);
        assert!(no_color());

        revert_color_support();
        assert_eq!(term_color_level(), ColorLevel::TrueColor);
        assert!(!no_color());
    }

    #[test]
    #[serial]
    fn set_color_level_returns_previous() {
        let _guard = ColorOverride::level(ColorLevel::Color256);

        assert_eq!(set_color_level(ColorLevel::Basic16), ColorLevel::Color256);
        revert_color_support();
        assert_eq!(term_color_level(), ColorLevel::Color256);
    }

    #[test]
    #[serial]
    fn override_guard_restores_on_drop() {
        let before = (term_color_level(), no_color());
        {
            let _guard = ColorOverride::disabled();
            assert!(no_color());
            assert!(!is_support_color());
        }
        assert_eq!((term_color_level(), no_color()), before);
    }

    #[test]
    #[serial]
    fn last_err_is_cleared_on_read() {
        save_last_err(ColorError::InvalidTermProgramVersion("x".into()));
        assert!(last_err().is_some());
        assert!(last_err().is_none());
    }

    /// Run the lazy init and drain whatever it reported, so the slot only
    /// holds what the test puts there.
    fn drain_last_err() {
        let _ = last_err();
    }

    #[test]
    #[serial]
    fn failed_vtp_degrades_to_none() {
        drain_last_err();
        let detection =
            Detection::new(ColorLevel::TrueColor, DetectionSource::WindowsBuild).with_vtp();

        let support = build_support(detection, false, || {
            Err(ColorError::ConsoleMode {
                op: "SetConsoleMode",
                source: std::io::Error::other("access denied"),
            })
        });

        assert_eq!(support.current.level, ColorLevel::None);
        assert_eq!(support.backup, support.current);
        assert!(matches!(
            last_err(),
            Some(ColorError::ConsoleMode { op: "SetConsoleMode", .. })
        ));
        assert!(last_err().is_none());
    }

    #[test]
    #[serial]
    fn successful_vtp_keeps_level() {
        drain_last_err();
        let detection =
            Detection::new(ColorLevel::Color256, DetectionSource::WindowsBuild).with_vtp();

        let support = build_support(detection, true, || Ok(()));

        assert_eq!(support.current.level, ColorLevel::Color256);
        assert!(support.current.no_color);
        assert!(last_err().is_none());
    }

    #[test]
    #[serial]
    fn detection_warning_reaches_last_err() {
        drain_last_err();
        let detection = Detection::new(ColorLevel::Color256, DetectionSource::TermProgram)
            .with_warning(ColorError::InvalidTermProgramVersion("beta".into()));

        let support = build_support(detection, false, || {
            panic!("console mode must not be touched without vtp")
        });

        assert_eq!(support.current.level, ColorLevel::Color256);
        assert!(matches!(
            last_err(),
            Some(ColorError::InvalidTermProgramVersion(ref v)) if v == "beta"
        ));
        assert!(last_err().is_none());
    }
}
