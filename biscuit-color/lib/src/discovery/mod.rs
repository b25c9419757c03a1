//! Terminal color capability discovery
//!
//! This module derives a [`level::ColorLevel`] from the process environment
//! without sending any query to the terminal.

pub mod console;
pub mod detection;
pub mod level;
pub mod os_detection;
pub mod platform;
pub mod term_env;
