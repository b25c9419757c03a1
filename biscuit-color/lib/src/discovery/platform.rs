//! Platform-specific parts of color detection.
//!
//! The shared decision procedure in [`detection`](super::detection) asks a
//! [`PlatformDetector`] two questions: "is this WSL?" and "what does the
//! platform fall back to when no environment override matched?". POSIX
//! systems answer from `TERM`; Windows answers from its build number.
//!
//! Both implementations compile everywhere so either can be exercised in
//! tests; [`current_platform`] picks the one matching the build target.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::discovery::detection::{Detection, DetectionSource};
use crate::discovery::level::ColorLevel;
use crate::discovery::os_detection::{
    KERNEL_VERSION_PATH, WindowsVersion, is_wsl_kernel, read_kernel_version, windows_version,
};
use crate::discovery::term_env::TermEnv;

/// First Windows 10 build whose console understands ANSI escapes.
pub const WINDOWS_ANSI_BUILD: u32 = 10586;

/// First Windows 10 build whose console supports 24-bit color.
pub const WINDOWS_TRUECOLOR_BUILD: u32 = 14931;

/// ANSICON started supporting 256 colors with release 1.81.
const ANSICON_256_VERSION: u32 = 181;

/// Which family of detection rules applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformKind {
    Posix,
    Windows,
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformKind::Posix => write!(f, "POSIX"),
            PlatformKind::Windows => write!(f, "Windows"),
        }
    }
}

/// The platform-dependent half of color detection.
pub trait PlatformDetector {
    /// The rule family this detector implements.
    fn kind(&self) -> PlatformKind;

    /// Whether the process runs inside the Windows Subsystem for Linux.
    fn is_wsl(&self, env: &TermEnv) -> bool;

    /// The level to use when no environment override decided it.
    fn fallback(&self, env: &TermEnv) -> Detection;
}

/// Detection rules for Linux, macOS, the BSDs and WSL.
#[derive(Debug, Clone, Default)]
pub struct PosixPlatform {
    kernel_version: Option<String>,
}

impl PosixPlatform {
    /// Read the kernel version banner from [`KERNEL_VERSION_PATH`].
    pub fn probe() -> PosixPlatform {
        PosixPlatform {
            kernel_version: read_kernel_version(KERNEL_VERSION_PATH),
        }
    }

    /// Use a known kernel version banner instead of reading it.
    pub fn with_kernel_version<S: Into<String>>(kernel_version: Option<S>) -> PosixPlatform {
        PosixPlatform {
            kernel_version: kernel_version.map(Into::into),
        }
    }
}

impl PlatformDetector for PosixPlatform {
    fn kind(&self) -> PlatformKind {
        PlatformKind::Posix
    }

    fn is_wsl(&self, env: &TermEnv) -> bool {
        if !env.wsl_distro_name.is_empty() {
            return true;
        }
        self.kernel_version.as_deref().is_some_and(is_wsl_kernel)
    }

    fn fallback(&self, env: &TermEnv) -> Detection {
        let term = env.term.as_str();

        let level = if term.is_empty() {
            ColorLevel::None
        } else if term == "screen" || term.contains("256color") || term.contains("xterm") {
            ColorLevel::Color256
        } else {
            // any other non-empty TERM still implies basic ANSI support
            ColorLevel::Basic16
        };

        tracing::debug!(term, ?level, "Fell back to TERM heuristics");
        Detection::new(level, DetectionSource::Term)
    }
}

/// Detection rules for native Windows consoles.
#[derive(Debug, Clone, Default)]
pub struct WindowsPlatform {
    version: Option<WindowsVersion>,
}

impl WindowsPlatform {
    /// Query the running Windows version.
    pub fn probe() -> WindowsPlatform {
        WindowsPlatform {
            version: windows_version(),
        }
    }

    /// Use a known Windows version instead of querying it.
    pub fn with_version(version: WindowsVersion) -> WindowsPlatform {
        WindowsPlatform {
            version: Some(version),
        }
    }

    /// Whether the console predates ANSI support (pre Windows 10 build 10586).
    ///
    /// An unknown version is treated as legacy.
    fn is_legacy_console(&self) -> bool {
        match self.version {
            Some(v) => v.major < 10 || v.build < WINDOWS_ANSI_BUILD,
            None => true,
        }
    }
}

impl PlatformDetector for WindowsPlatform {
    fn kind(&self) -> PlatformKind {
        PlatformKind::Windows
    }

    fn is_wsl(&self, _env: &TermEnv) -> bool {
        false
    }

    fn fallback(&self, env: &TermEnv) -> Detection {
        // ConEmu enables true color by default alongside ANSI
        if env.con_emu_ansi == "ON" {
            return Detection::new(ColorLevel::TrueColor, DetectionSource::ConEmu);
        }

        if self.is_legacy_console() {
            if env.ansicon.is_empty() {
                tracing::debug!(version = ?self.version, "Legacy console without ANSICON");
                return Detection::new(ColorLevel::None, DetectionSource::WindowsBuild);
            }

            let level = match env.ansicon_ver.trim().parse::<u32>() {
                Ok(v) if v >= ANSICON_256_VERSION => ColorLevel::Color256,
                _ => ColorLevel::Basic16,
            };
            return Detection::new(level, DetectionSource::Ansicon);
        }

        let build = self.version.map(|v| v.build).unwrap_or_default();
        let level = if build < WINDOWS_TRUECOLOR_BUILD {
            ColorLevel::Color256
        } else {
            ColorLevel::TrueColor
        };

        tracing::debug!(build, ?level, "Detected from Windows build number");
        Detection::new(level, DetectionSource::WindowsBuild).with_vtp()
    }
}

/// The detector for the platform this crate was built for.
pub fn current_platform() -> Box<dyn PlatformDetector> {
    if cfg!(windows) {
        Box::new(WindowsPlatform::probe())
    } else {
        Box::new(PosixPlatform::probe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posix() -> PosixPlatform {
        PosixPlatform::with_kernel_version(Some("Linux version 6.8.0-45-generic"))
    }

    fn windows(build: u32) -> WindowsPlatform {
        WindowsPlatform::with_version(WindowsVersion { major: 10, build })
    }

    fn term(value: &str) -> TermEnv {
        TermEnv::from_pairs([("TERM", value)])
    }

    #[test]
    fn posix_term_heuristics() {
        let p = posix();
        assert_eq!(p.fallback(&term("")).level, ColorLevel::None);
        assert_eq!(p.fallback(&term("screen")).level, ColorLevel::Color256);
        assert_eq!(p.fallback(&term("tmux-256color")).level, ColorLevel::Color256);
        assert_eq!(p.fallback(&term("xterm")).level, ColorLevel::Color256);
        assert_eq!(p.fallback(&term("vt100")).level, ColorLevel::Basic16);
        assert_eq!(p.fallback(&term("linux")).level, ColorLevel::Basic16);
    }

    #[test]
    fn posix_fallback_never_needs_vtp() {
        assert!(!posix().fallback(&term("xterm-256color")).needs_vtp);
    }

    #[test]
    fn posix_wsl_from_env_or_kernel() {
        let env = TermEnv::from_pairs([("WSL_DISTRO_NAME", "Ubuntu")]);
        assert!(posix().is_wsl(&env));

        let wsl = PosixPlatform::with_kernel_version(Some("5.15.90.1-microsoft-standard-WSL2"));
        assert!(wsl.is_wsl(&TermEnv::default()));

        assert!(!posix().is_wsl(&TermEnv::default()));
        assert!(!PosixPlatform::with_kernel_version(None::<String>).is_wsl(&TermEnv::default()));
    }

    #[test]
    fn windows_conemu_wins() {
        let env = TermEnv::from_pairs([("ConEmuANSI", "ON")]);
        let d = windows(1000).fallback(&env);
        assert_eq!(d.level, ColorLevel::TrueColor);
        assert_eq!(d.source, DetectionSource::ConEmu);
        assert!(!d.needs_vtp);
    }

    #[test]
    fn windows_legacy_console_uses_ansicon() {
        let none = windows(9600).fallback(&TermEnv::default());
        assert_eq!(none.level, ColorLevel::None);

        let basic = windows(9600).fallback(&TermEnv::from_pairs([("ANSICON", "80x300")]));
        assert_eq!(basic.level, ColorLevel::Basic16);

        let hundreds = windows(9600).fallback(&TermEnv::from_pairs([
            ("ANSICON", "80x300"),
            ("ANSICON_VER", "186"),
        ]));
        assert_eq!(hundreds.level, ColorLevel::Color256);
        assert!(!hundreds.needs_vtp);
    }

    #[test]
    fn windows_eight_is_legacy() {
        let p = WindowsPlatform::with_version(WindowsVersion {
            major: 6,
            build: 20000,
        });
        assert_eq!(p.fallback(&TermEnv::default()).level, ColorLevel::None);
    }

    #[test]
    fn windows_build_thresholds() {
        let d = windows(WINDOWS_ANSI_BUILD).fallback(&TermEnv::default());
        assert_eq!(d.level, ColorLevel::Color256);
        assert!(d.needs_vtp);

        let d = windows(WINDOWS_TRUECOLOR_BUILD).fallback(&TermEnv::default());
        assert_eq!(d.level, ColorLevel::TrueColor);
        assert!(d.needs_vtp);
    }

    #[test]
    fn windows_unknown_version_is_legacy() {
        let d = WindowsPlatform::default().fallback(&TermEnv::default());
        assert_eq!(d.level, ColorLevel::None);
    }

    #[test]
    fn windows_is_never_wsl() {
        let env = TermEnv::from_pairs([("WSL_DISTRO_NAME", "Ubuntu")]);
        assert!(!windows(22631).is_wsl(&env));
    }
}
