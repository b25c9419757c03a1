use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ColorError;

/// The color capability of a terminal.
///
/// Levels are totally ordered, so "supports 256 colors" is simply
/// `level >= ColorLevel::Color256`.
///
/// ## Examples
///
/// ```
/// use biscuit_color::discovery::level::ColorLevel;
///
/// assert!(ColorLevel::TrueColor > ColorLevel::Color256);
/// assert_eq!("256".parse::<ColorLevel>().unwrap(), ColorLevel::Color256);
/// assert_eq!(ColorLevel::Basic16.to_string(), "16");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ColorLevel {
    /// no color support
    #[default]
    None,
    /// 16 colors (8 normal plus "bright" variants)
    Basic16,
    /// 256 color palette (8 bit)
    Color256,
    /// 16 million colors (24 bit)
    TrueColor,
}

impl ColorLevel {
    /// All levels, lowest first.
    pub const ALL: [ColorLevel; 4] = [
        ColorLevel::None,
        ColorLevel::Basic16,
        ColorLevel::Color256,
        ColorLevel::TrueColor,
    ];

    /// Number of distinct colors the level can display.
    pub const fn color_count(self) -> u32 {
        match self {
            ColorLevel::None => 0,
            ColorLevel::Basic16 => 16,
            ColorLevel::Color256 => 256,
            ColorLevel::TrueColor => 16_777_216,
        }
    }

    /// Whether any color output is possible at this level.
    pub fn is_color(self) -> bool {
        self > ColorLevel::None
    }
}

impl fmt::Display for ColorLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorLevel::None => write!(f, "none"),
            ColorLevel::Basic16 => write!(f, "16"),
            ColorLevel::Color256 => write!(f, "256"),
            ColorLevel::TrueColor => write!(f, "truecolor"),
        }
    }
}

impl FromStr for ColorLevel {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "off" | "0" | "no" => Ok(ColorLevel::None),
            "16" | "basic" | "ansi" | "ansi16" => Ok(ColorLevel::Basic16),
            "256" | "ansi256" | "8bit" | "hundreds" => Ok(ColorLevel::Color256),
            "true" | "truecolor" | "24bit" | "rgb" | "millions" => Ok(ColorLevel::TrueColor),
            _ => Err(ColorError::UnknownLevel(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_totally_ordered() {
        for window in ColorLevel::ALL.windows(2) {
            assert!(window[0] < window[1]);
        }
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for level in ColorLevel::ALL {
            assert_eq!(level.to_string().parse::<ColorLevel>().unwrap(), level);
        }
    }

    #[test]
    fn from_str_accepts_aliases() {
        assert_eq!("24bit".parse::<ColorLevel>().unwrap(), ColorLevel::TrueColor);
        assert_eq!(" ANSI ".parse::<ColorLevel>().unwrap(), ColorLevel::Basic16);
        assert_eq!("off".parse::<ColorLevel>().unwrap(), ColorLevel::None);
    }

    #[test]
    fn from_str_rejects_unknown() {
        let err = "purple".parse::<ColorLevel>().unwrap_err();
        assert!(matches!(err, ColorError::UnknownLevel(ref v) if v == "purple"));
    }

    #[test]
    fn color_count_grows_with_level() {
        assert_eq!(ColorLevel::None.color_count(), 0);
        assert_eq!(ColorLevel::TrueColor.color_count(), 16_777_216);
        assert!(!ColorLevel::None.is_color());
        assert!(ColorLevel::Basic16.is_color());
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&ColorLevel::Color256).unwrap();
        assert_eq!(json, "\"color256\"");
        let back: ColorLevel = serde_json::from_str("\"true_color\"").unwrap();
        assert_eq!(back, ColorLevel::TrueColor);
    }
}
