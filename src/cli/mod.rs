//! Command-line interface: argument definitions and subcommand runners.

mod args;

pub mod file;
pub mod page;
pub mod render;

pub use args::{Cli, Commands};
