use serde::Serialize;

use crate::discovery::level::ColorLevel;
use crate::discovery::os_detection::{current_shell, is_tty};
use crate::discovery::platform::{PlatformKind, current_platform};
use crate::terminal::support::{no_color, term_color_level};

fn new_terminal() -> Terminal {
    let color_level = term_color_level();
    Terminal {
        color_level,
        no_color: no_color(),
        supports_color: color_level > ColorLevel::None,
        supports_256_color: color_level >= ColorLevel::Color256,
        supports_true_color: color_level == ColorLevel::TrueColor,
        is_tty: is_tty(),
        platform: current_platform().kind(),
        shell: current_shell(true),
    }
}

/// A snapshot of the cached color support of the attached terminal.
#[derive(Debug, Clone, Serialize)]
pub struct Terminal {
    /// The cached color level
    pub color_level: ColorLevel,
    /// Whether colorless output was requested
    pub no_color: bool,

    pub supports_color: bool,
    pub supports_256_color: bool,
    pub supports_true_color: bool,

    /// Whether stdout is connected to a TTY
    pub is_tty: bool,
    /// Which detection rules apply on this platform
    pub platform: PlatformKind,
    /// Name of the user's shell, if known
    pub shell: Option<String>,
}

impl Default for Terminal {
    fn default() -> Terminal {
        new_terminal()
    }
}

impl Terminal {
    pub fn new() -> Terminal {
        new_terminal()
    }

    /// Whether tags and codes will actually be rendered as escapes.
    pub fn renders_color(&self) -> bool {
        !self.no_color && self.supports_color
    }
}
