//! Shared utilities: dates and paths.

pub mod date;
pub mod path;
