//! Transform decision and execution.
//!
//! [`Pipeline`] glues the delegated compilers to the destination cache:
//! it decides per destination whether re-transformation is needed, decorates
//! output with the provenance header, and demotes the injected strict-mode
//! pragma. All failures from the compilers and file I/O propagate unchanged.

pub mod header;
mod strict;

use std::fs;
use std::path::Path;

use anyhow::{Result, bail};

use crate::compiler::{Instrumenter, Transpiler};
use crate::debug;
use crate::freshness::{ContentHash, DestCache};
use crate::log;

pub use header::{HeaderInfo, HeaderSource};

/// Per-call switches for a transform.
#[derive(Debug, Clone, Copy)]
pub struct TransformFlags {
    pub transpile: bool,
    pub instrument: bool,
    pub emit_header: bool,
}

impl Default for TransformFlags {
    fn default() -> Self {
        Self {
            transpile: true,
            instrument: false,
            emit_header: true,
        }
    }
}

/// A full transform request: switches plus optional header inputs.
#[derive(Default)]
pub struct TransformRequest {
    pub transpile: bool,
    pub instrument: bool,
    pub header: Option<HeaderInfo>,
}

impl TransformRequest {
    fn from_flags(flags: TransformFlags, header: Option<HeaderInfo>) -> Self {
        Self {
            transpile: flags.transpile,
            instrument: flags.instrument,
            header: if flags.emit_header { header } else { None },
        }
    }
}

/// Transform pipeline owning the compiler seams and the destination cache.
pub struct Pipeline {
    transpiler: Box<dyn Transpiler>,
    instrumenter: Option<Box<dyn Instrumenter>>,
    cache: DestCache,
}

impl Pipeline {
    pub fn new(transpiler: Box<dyn Transpiler>) -> Self {
        Self {
            transpiler,
            instrumenter: None,
            cache: DestCache::new(),
        }
    }

    /// Attach a coverage instrumenter (none ships with the CLI).
    pub fn with_instrumenter(mut self, instrumenter: Box<dyn Instrumenter>) -> Self {
        self.instrumenter = Some(instrumenter);
        self
    }

    pub fn cache(&self) -> &DestCache {
        &self.cache
    }

    /// Transform raw content: header + compiled body + strict demotion.
    pub fn transform(&self, content: &str, file: &Path, req: &TransformRequest) -> Result<String> {
        let header_lines = header::lines(content, req.header.as_ref());

        let mut body = content.to_string();
        if req.transpile {
            body = self.transpiler.transpile(&body, file)?;
        }
        if req.instrument {
            match &self.instrumenter {
                Some(instrumenter) => body = instrumenter.instrument(&body, file)?,
                None => bail!(
                    "instrumentation requested for {} but no instrumenter is configured",
                    file.display()
                ),
            }
        }

        let mut out = String::with_capacity(body.len() + 256);
        for line in &header_lines {
            out.push_str(line);
            out.push('\n');
        }
        // Demotion targets the pragma the transpiler prepends; a pragma the
        // author wrote into untranspiled content stays in force
        let demoted = if req.transpile {
            strict::demote(&body)
        } else {
            None
        };
        match demoted {
            Some((comment, rest)) => {
                out.push_str(&comment);
                out.push('\n');
                out.push_str(rest);
            }
            None => out.push_str(&body),
        }
        Ok(out)
    }

    /// Transform a concatenation of several source files, memoized by
    /// destination. The header enumerates every contributing path.
    pub fn transform_bundle(
        &mut self,
        files: &[std::path::PathBuf],
        dest: Option<&Path>,
        flags: TransformFlags,
    ) -> Result<Option<String>> {
        let mut content = String::new();
        for file in files {
            content.push_str(&fs::read_to_string(file)?);
            if !content.ends_with('\n') {
                content.push('\n');
            }
        }
        let fingerprint = ContentHash::from_bytes(content.as_bytes());

        if let Some(dest) = dest
            && self.cache.is_current(dest, fingerprint)
        {
            debug!("babel"; "unchanged bundle of {} file(s)", files.len());
            return Ok(None);
        }

        log!("babel"; "bundle of {} file(s)", files.len());

        let mut header = HeaderInfo::bundle(files.to_vec());
        header.fingerprint = Some(fingerprint);
        // Diagnostics name the destination, or the first source for stdout
        let diag_file = dest
            .or_else(|| files.first().map(std::path::PathBuf::as_path))
            .unwrap_or_else(|| Path::new("<bundle>"));
        let req = TransformRequest::from_flags(flags, Some(header));
        let out = self.transform(&content, diag_file, &req)?;

        if let Some(dest) = dest {
            self.cache.record(dest, fingerprint);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(dest, &out)?;
        }

        Ok(Some(out))
    }

    /// Transform a file, memoized by destination.
    ///
    /// Returns `Ok(None)` when `dest` already carries the fingerprint of the
    /// current content: no compiler invocation, no write. Otherwise the
    /// transformed content is returned, and written to `dest` when given.
    pub fn transform_file(
        &mut self,
        file: &Path,
        dest: Option<&Path>,
        flags: TransformFlags,
    ) -> Result<Option<String>> {
        let content = fs::read_to_string(file)?;
        let fingerprint = ContentHash::from_bytes(content.as_bytes());

        if let Some(dest) = dest
            && self.cache.is_current(dest, fingerprint)
        {
            debug!("babel"; "unchanged: {}", file.display());
            return Ok(None);
        }

        log!("babel"; "{}", file.display());

        let req =
            TransformRequest::from_flags(flags, Some(HeaderInfo::single(file, fingerprint)));
        let out = self.transform(&content, file, &req)?;

        if let Some(dest) = dest {
            self.cache.record(dest, fingerprint);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(dest, &out)?;
        }

        Ok(Some(out))
    }
}
