//! Content-based freshness detection.
//!
//! - [`hash`]: blake3 `ContentHash`
//! - [`cache`]: injected destination → fingerprint cache

mod cache;
mod hash;

pub use cache::DestCache;
pub use hash::ContentHash;
