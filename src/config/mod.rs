//! Tool configuration loaded from `esdown.toml`.
//!
//! All settings have working defaults so the tool runs without a config
//! file. Unknown fields are detected via `serde_ignored` and reported, not
//! silently dropped. CLI flags override file values at the call sites.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::log;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(std::path::PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),
}

/// Root configuration structure representing esdown.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,
}

/// `[build]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildConfig {
    /// Output subdirectory receiving relocated transformed files.
    #[serde(default = "default_subdir")]
    pub subdir: String,

    /// Infix inserted before the compound extension of sibling files.
    #[serde(default = "default_infix")]
    pub infix: String,

    /// Transpilation target passed to the compiler, e.g. `es2015`.
    #[serde(default = "default_target")]
    pub target: String,

    /// Default build mode matched against link `mode=` metadata.
    #[serde(default = "default_mode")]
    pub mode: String,

    /// Emit the provenance header on transformed files.
    #[serde(default = "default_header")]
    pub header: bool,
}

fn default_subdir() -> String {
    "babel".to_string()
}

fn default_infix() -> String {
    ".babel".to_string()
}

fn default_target() -> String {
    "es2015".to_string()
}

fn default_mode() -> String {
    "standard".to_string()
}

const fn default_header() -> bool {
    true
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            subdir: default_subdir(),
            infix: default_infix(),
            target: default_target(),
            mode: default_mode(),
            header: default_header(),
        }
    }
}

impl Config {
    /// Load configuration, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.build.subdir, "babel");
        assert_eq!(config.build.infix, ".babel");
        assert_eq!(config.build.target, "es2015");
        assert_eq!(config.build.mode, "standard");
        assert!(config.build.header);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load(Path::new("/nonexistent/esdown.toml")).unwrap();
        assert_eq!(config.build.subdir, "babel");
    }

    #[test]
    fn test_load_overrides() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("esdown.toml");
        fs::write(
            &path,
            "[build]\nsubdir = \"compat\"\ntarget = \"es5\"\nheader = false\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.build.subdir, "compat");
        assert_eq!(config.build.target, "es5");
        assert!(!config.build.header);
        // Untouched fields keep defaults
        assert_eq!(config.build.infix, ".babel");
    }

    #[test]
    fn test_unknown_fields_collected() {
        let (_, ignored) =
            Config::parse_with_ignored("[build]\nsubdir = \"x\"\nbogus = 1\n").unwrap();
        assert_eq!(ignored, vec!["build.bogus".to_string()]);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("esdown.toml");
        fs::write(&path, "[build\n").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
