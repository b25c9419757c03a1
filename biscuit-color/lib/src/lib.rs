//! # biscuit-color
//!
//! Terminal color capability detection and color-tag rendering.
//!
//! This crate provides:
//!
//! - **Color Level Detection**: derive none / 16 / 256 / true color support
//!   from the environment (`TERM`, `COLORTERM`, `TERM_PROGRAM`, WSL, Windows
//!   build numbers, ...), without querying the terminal
//! - **Cached Support State**: the level is detected once per process and can
//!   be forced and reverted in tests
//! - **Color Tags**: render `<info>text</>` markup into ANSI escapes, or strip
//!   it when color is unsupported
//! - **Colors & Styles**: SGR color codes and fg/bg/option styles
//!
//! ## Quick Start
//!
//! ```
//! use biscuit_color::terminal::support::{is_support_color, term_color_level};
//! use biscuit_color::utils::tags::parse_tag_by_env;
//!
//! println!("color level: {}", term_color_level());
//!
//! let line = parse_tag_by_env("<info>done</> in <comment>3s</>");
//! if !is_support_color() {
//!     assert_eq!(line, "done in 3s");
//! }
//! ```
//!
//! ## Modules
//!
//! - [`discovery`] - Environment-based detection
//!   - [`discovery::detection`] - The decision procedure
//!   - [`discovery::platform`] - POSIX and Windows specific rules
//!   - [`discovery::term_env`] - Environment snapshot
//! - [`terminal`] - Cached support state and the `Terminal` snapshot
//! - [`utils`] - Colors, styles, escape codes and tag markup
//! - [`error`] - Error types

pub mod discovery;
pub mod error;
pub mod terminal;
pub mod utils;

pub use discovery::level::ColorLevel;
pub use error::{ColorError, Result};
pub use utils::color::Color;
pub use utils::styling::Style;
