//! Path utilities for destination relocation and href computation.
//!
//! Pure functions, no side effects. Hrefs always use forward slashes so the
//! output is stable across platforms.

use std::path::{Component, Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to joining with the current directory when relative.
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Lexically remove `.` and `..` components without touching the filesystem.
///
/// Used for destination paths that may not exist yet, where `canonicalize`
/// would fail.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Compute the path of `target` relative to the directory `from_dir`.
///
/// Both paths are compared lexically after cleaning; no filesystem access.
/// Returns `target` unchanged when the two share no common prefix root.
pub fn relative_from_dir(from_dir: &Path, target: &Path) -> PathBuf {
    let from = clean_path(from_dir);
    let to = clean_path(target);

    let from_comps: Vec<_> = from.components().collect();
    let to_comps: Vec<_> = to.components().collect();

    // Length of the shared prefix
    let common = from_comps
        .iter()
        .zip(to_comps.iter())
        .take_while(|(a, b)| a == b)
        .count();

    if common == 0 && from.is_absolute() != to.is_absolute() {
        return to;
    }

    let mut result = PathBuf::new();
    for _ in common..from_comps.len() {
        result.push("..");
    }
    for comp in &to_comps[common..] {
        result.push(comp.as_os_str());
    }
    result
}

/// Render a path as an href (forward slashes).
pub fn to_href(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_relative_becomes_absolute() {
        let normalized = normalize_path(Path::new("relative/file.txt"));
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_clean_path_removes_dots() {
        assert_eq!(
            clean_path(Path::new("a/./b/../c")),
            PathBuf::from("a/c")
        );
    }

    #[test]
    fn test_relative_from_dir_sibling_subtree() {
        let rel = relative_from_dir(
            Path::new("/site/public/html/redirect"),
            Path::new("/site/public/babel/html/redirect/index.js"),
        );
        assert_eq!(rel, PathBuf::from("../../babel/html/redirect/index.js"));
    }

    #[test]
    fn test_relative_from_dir_same_dir() {
        let rel = relative_from_dir(Path::new("/a/b"), Path::new("/a/b/x.js"));
        assert_eq!(rel, PathBuf::from("x.js"));
    }

    #[test]
    fn test_relative_from_dir_up_only() {
        let rel = relative_from_dir(Path::new("/a/b/c"), Path::new("/a/x.js"));
        assert_eq!(rel, PathBuf::from("../../x.js"));
    }

    #[test]
    fn test_to_href_forward_slashes() {
        assert_eq!(to_href(Path::new("a/b/c.js")), "a/b/c.js");
    }
}
