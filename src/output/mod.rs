//! Output formatting
//!
//! - [`text`]: progress and summary lines on the console
//! - [`json`]: machine-readable report of all selections

pub mod json;
pub mod text;
