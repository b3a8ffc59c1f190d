//! Provenance header construction.
//!
//! Every decorated output starts with a fixed-shape comment block recording
//! when the transform ran, the fingerprint of the source content, and the
//! contributing source path(s).

use std::path::PathBuf;

use crate::freshness::ContentHash;
use crate::utils::date::DateTimeUtc;

/// Contributing source(s) named in the header.
#[derive(Debug, Clone)]
pub enum HeaderSource {
    /// No source path known.
    #[allow(dead_code)]
    Unknown,
    /// A single source file.
    File(PathBuf),
    /// A multi-file bundle; paths listed in input order.
    List(Vec<PathBuf>),
}

/// Inputs for the header block.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Precomputed fingerprint; computed from content when absent.
    pub fingerprint: Option<ContentHash>,
    pub source: HeaderSource,
}

impl HeaderInfo {
    pub fn single(file: impl Into<PathBuf>, fingerprint: ContentHash) -> Self {
        Self {
            fingerprint: Some(fingerprint),
            source: HeaderSource::File(file.into()),
        }
    }

    pub fn bundle(files: Vec<PathBuf>) -> Self {
        Self {
            fingerprint: None,
            source: HeaderSource::List(files),
        }
    }
}

/// Build the header comment lines for `content`.
///
/// No `info` at all produces no lines. A supplied fingerprint is trusted;
/// otherwise one is computed from `content`.
pub fn lines(content: &str, info: Option<&HeaderInfo>) -> Vec<String> {
    let Some(info) = info else {
        return Vec::new();
    };

    let fingerprint = info
        .fingerprint
        .unwrap_or_else(|| ContentHash::from_bytes(content.as_bytes()));

    let mut out = vec![
        "/*".to_string(),
        format!("* build time: {}", DateTimeUtc::now().format()),
        "*".to_string(),
        format!("* source hash: {}", fingerprint.to_hex()),
        "*".to_string(),
    ];

    match &info.source {
        HeaderSource::Unknown => out.push("* source file: (none)".to_string()),
        HeaderSource::File(file) => {
            out.push(format!("* source file: {}", file.display()));
        }
        HeaderSource::List(files) => {
            out.push(format!("* source file: {} files:", files.len()));
            for file in files {
                out.push(format!("*   {}", file.display()));
            }
        }
    }

    out.push("*/".to_string());
    out.push(String::new());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_no_info_no_lines() {
        assert!(lines("var a = 1;", None).is_empty());
    }

    #[test]
    fn test_single_source_with_fingerprint() {
        let hash = ContentHash::from_bytes(b"var a = 1;");
        let info = HeaderInfo::single(Path::new("htdocs/app.js"), hash);
        let lines = lines("var a = 1;", Some(&info));

        assert_eq!(lines[0], "/*");
        assert!(lines[1].starts_with("* build time: "));
        assert_eq!(lines[3], format!("* source hash: {}", hash.to_hex()));
        assert_eq!(lines[5], "* source file: htdocs/app.js");
        assert_eq!(lines[6], "*/");
        assert_eq!(lines[7], "");
    }

    #[test]
    fn test_fingerprint_computed_when_absent() {
        let info = HeaderInfo {
            fingerprint: None,
            source: HeaderSource::Unknown,
        };
        let content = "var a = 1;";
        let expected = ContentHash::from_bytes(content.as_bytes());
        let lines = lines(content, Some(&info));

        assert_eq!(lines[3], format!("* source hash: {}", expected.to_hex()));
        assert_eq!(lines[5], "* source file: (none)");
    }

    #[test]
    fn test_bundle_lists_each_path_in_order() {
        let info = HeaderInfo::bundle(vec![
            PathBuf::from("htdocs/views/API.js"),
            PathBuf::from("htdocs/views/List.js"),
            PathBuf::from("htdocs/views/Subject.js"),
        ]);
        let lines = lines("", Some(&info));

        assert_eq!(lines[5], "* source file: 3 files:");
        assert_eq!(lines[6], "*   htdocs/views/API.js");
        assert_eq!(lines[7], "*   htdocs/views/List.js");
        assert_eq!(lines[8], "*   htdocs/views/Subject.js");
        assert_eq!(lines[9], "*/");
    }
}
