//! Delegated compilation seams.
//!
//! The pipeline never implements source-to-source work itself: transpilation
//! and coverage instrumentation are trait objects supplied by the caller.
//! [`OxcTranspiler`] is the shipped transpiler; no instrumenter ships with
//! the binary (the seam exists for embedders and tests).

mod js;

use std::path::Path;

use anyhow::Result;

pub use js::OxcTranspiler;

/// Source-to-source JS down-leveling.
pub trait Transpiler {
    fn transpile(&self, source: &str, file: &Path) -> Result<String>;
}

/// Coverage instrumentation, applied after transpilation.
pub trait Instrumenter {
    fn instrument(&self, source: &str, file: &Path) -> Result<String>;
}
