//! Environment-based color capability detection.
//!
//! No terminal query is sent; the level is derived from environment
//! variables and a couple of OS probes. The procedure, first match wins:
//!
//! 1. WSL (POSIX only) → true color
//! 2. `TERMINAL_EMULATOR=JetBrains-JediTerm` with `TERM != screen` → true color
//! 3. `COLORTERM`, `FORCE_COLOR`, `TERM_PROGRAM` overrides
//! 4. the platform fallback (`TERM` heuristics, or the Windows build number)
//!
//! ## Examples
//!
//! ```
//! use biscuit_color::discovery::detection::detect_with;
//! use biscuit_color::discovery::level::ColorLevel;
//! use biscuit_color::discovery::platform::PosixPlatform;
//! use biscuit_color::discovery::term_env::TermEnv;
//!
//! let platform = PosixPlatform::with_kernel_version(None::<String>);
//! let env = TermEnv::from_pairs([("COLORTERM", "truecolor")]);
//!
//! assert_eq!(detect_with(&env, &platform).level, ColorLevel::TrueColor);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::discovery::level::ColorLevel;
use crate::discovery::platform::{PlatformDetector, current_platform};
use crate::discovery::term_env::TermEnv;
use crate::error::ColorError;

/// `TERMINAL_EMULATOR` value set by JetBrains IDE terminals.
pub const JETBRAINS_TERMINAL: &str = "JetBrains-JediTerm";

/// Which rule produced a [`Detection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectionSource {
    Wsl,
    JetBrains,
    ColorTerm,
    ForceColor,
    TermProgram,
    Term,
    ConEmu,
    Ansicon,
    WindowsBuild,
}

impl fmt::Display for DetectionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DetectionSource::Wsl => "WSL",
            DetectionSource::JetBrains => "TERMINAL_EMULATOR",
            DetectionSource::ColorTerm => "COLORTERM",
            DetectionSource::ForceColor => "FORCE_COLOR",
            DetectionSource::TermProgram => "TERM_PROGRAM",
            DetectionSource::Term => "TERM",
            DetectionSource::ConEmu => "ConEmuANSI",
            DetectionSource::Ansicon => "ANSICON",
            DetectionSource::WindowsBuild => "Windows build",
        };
        write!(f, "{name}")
    }
}

/// The outcome of one detection pass.
#[derive(Debug)]
pub struct Detection {
    /// The detected color level.
    pub level: ColorLevel,
    /// The rule that decided the level.
    pub source: DetectionSource,
    /// Whether Windows virtual terminal processing must be enabled for
    /// escapes to render.
    pub needs_vtp: bool,
    /// A non-fatal problem met along the way (e.g. an unparseable
    /// `TERM_PROGRAM_VERSION`).
    pub warning: Option<ColorError>,
}

impl Detection {
    pub fn new(level: ColorLevel, source: DetectionSource) -> Detection {
        Detection {
            level,
            source,
            needs_vtp: false,
            warning: None,
        }
    }

    /// Mark the detection as requiring virtual terminal processing.
    pub fn with_vtp(mut self) -> Detection {
        self.needs_vtp = true;
        self
    }

    /// Attach a non-fatal warning.
    pub fn with_warning(mut self, warning: ColorError) -> Detection {
        self.warning = Some(warning);
        self
    }
}

/// Detect the color level of the current process environment.
pub fn detect_color_level() -> ColorLevel {
    detect().level
}

/// Run the full detection against the current environment and platform.
pub fn detect() -> Detection {
    let env = TermEnv::from_env();
    let platform = current_platform();
    detect_with(&env, platform.as_ref())
}

/// Run the detection against an explicit environment snapshot and platform.
///
/// This is a pure function of its inputs.
pub fn detect_with(env: &TermEnv, platform: &dyn PlatformDetector) -> Detection {
    if platform.is_wsl(env) {
        tracing::info!(
            color_level = ?ColorLevel::TrueColor,
            source = "WSL",
            "Detected true color support on WSL"
        );
        return Detection::new(ColorLevel::TrueColor, DetectionSource::Wsl);
    }

    if env.term != "screen" && env.terminal_emulator == JETBRAINS_TERMINAL {
        tracing::info!(
            color_level = ?ColorLevel::TrueColor,
            source = "TERMINAL_EMULATOR",
            platform = %platform.kind(),
            "Detected true color support on JetBrains terminal"
        );
        return Detection::new(ColorLevel::TrueColor, DetectionSource::JetBrains);
    }

    if let Some(detection) = detect_from_overrides(env) {
        tracing::info!(
            color_level = ?detection.level,
            source = %detection.source,
            "Detected color level from environment override"
        );
        return detection;
    }

    let detection = platform.fallback(env);
    tracing::info!(
        color_level = ?detection.level,
        source = %detection.source,
        platform = %platform.kind(),
        needs_vtp = detection.needs_vtp,
        "Detected color level from platform fallback"
    );
    detection
}

/// Check the overriding environment variables.
///
/// Returns `None` when none of them decides the level.
fn detect_from_overrides(env: &TermEnv) -> Option<Detection> {
    let colorterm = env.colorterm.as_str();

    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return Some(Detection::new(ColorLevel::TrueColor, DetectionSource::ColorTerm));
    }
    if !colorterm.is_empty() {
        return Some(Detection::new(ColorLevel::Basic16, DetectionSource::ColorTerm));
    }
    if !env.force_color.is_empty() {
        return Some(Detection::new(ColorLevel::Basic16, DetectionSource::ForceColor));
    }

    match env.term_program.as_str() {
        "Apple_Terminal" => Some(Detection::new(
            ColorLevel::Color256,
            DetectionSource::TermProgram,
        )),
        "Terminus" | "Hyper" => Some(Detection::new(
            ColorLevel::TrueColor,
            DetectionSource::TermProgram,
        )),
        "iTerm.app" => Some(detect_iterm(&env.term_program_version)),
        _ => None,
    }
}

/// iTerm2 gained true color in its 3.x line.
fn detect_iterm(version: &str) -> Detection {
    if version.is_empty() {
        return Detection::new(ColorLevel::Color256, DetectionSource::TermProgram);
    }

    let major = version.split('.').next().unwrap_or_default();
    match major.trim().parse::<u32>() {
        Ok(3) => Detection::new(ColorLevel::TrueColor, DetectionSource::TermProgram),
        Ok(_) => Detection::new(ColorLevel::Color256, DetectionSource::TermProgram),
        Err(e) => {
            tracing::debug!(version, error = %e, "Unparseable iTerm version");
            Detection::new(ColorLevel::Color256, DetectionSource::TermProgram)
                .with_warning(ColorError::InvalidTermProgramVersion(version.to_string()))
        }
    }
}
