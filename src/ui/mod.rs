//! Terminal output for dcm.
//!
//! This module contains:
//! - term: Colorized status lines
//! - report: Plain-text reports for list and inspect

pub mod report;
pub mod term;
