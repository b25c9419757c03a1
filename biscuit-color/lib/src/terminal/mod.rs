//! Cached terminal color support
//!
//! This module holds the process-wide color level, the predicates derived
//! from it, and the force/revert helpers used by tests.

pub mod support;
#[allow(clippy::module_inception)]
pub mod terminal;

pub use terminal::Terminal;
