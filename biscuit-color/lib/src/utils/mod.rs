//! Color values, styles, escape codes and tag markup

pub mod color;
pub mod escape_codes;
pub mod print;
pub mod styling;
pub mod tags;
