//! Destination fingerprint cache.
//!
//! Maps each destination path to the fingerprint of the source content last
//! transformed into it. The cache is explicitly constructed and injected
//! into the transform pipeline; its lifetime belongs to the caller (one
//! build or watch process), not to hidden process state.
//!
//! Entries are never evicted. The invariant: a destination is re-transformed
//! iff the incoming fingerprint differs from (or is absent from) the stored
//! value.

use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};

use super::ContentHash;

/// Per-destination fingerprint cache (single-threaded, injected).
#[derive(Debug, Default)]
pub struct DestCache {
    hashes: FxHashMap<PathBuf, ContentHash>,
}

impl DestCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fingerprint last applied to `dest`, if any.
    pub fn get(&self, dest: &Path) -> Option<ContentHash> {
        self.hashes.get(dest).copied()
    }

    /// Record `hash` as the fingerprint now applied to `dest`.
    pub fn record(&mut self, dest: &Path, hash: ContentHash) {
        self.hashes.insert(dest.to_path_buf(), hash);
    }

    /// True when `dest` already carries `hash` (the memoization short-circuit).
    pub fn is_current(&self, dest: &Path, hash: ContentHash) -> bool {
        self.get(dest) == Some(hash)
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}
