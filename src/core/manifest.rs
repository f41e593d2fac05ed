//! core::manifest
//!
//! The project manifest, `edge.toml`, read from the working directory.
//!
//! Only the keys this CLI consumes are modelled; other keys are ignored.
//!
//! ```toml
//! name = "my-site"
//! service_id = "SU1Z0isxPaozGVKXdv0eY"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Manifest file name.
pub const MANIFEST_FILE: &str = "edge.toml";

/// Errors from reading the manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse manifest '{path}': {message}")]
    ParseError { path: PathBuf, message: String },
}

/// Parsed `edge.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Project name
    pub name: Option<String>,
    /// Service this project deploys to
    pub service_id: Option<String>,
}

impl Manifest {
    /// Load `edge.toml` from `dir`.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn load(dir: &Path) -> Result<Option<Self>, ManifestError> {
        let path = dir.join(MANIFEST_FILE);
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path).map_err(|e| ManifestError::ReadError {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&contents)
            .map(Some)
            .map_err(|e| ManifestError::ParseError {
                path,
                message: e.to_string(),
            })
    }

    /// The manifest's service id, treating blank values as absent.
    pub fn service_id(&self) -> Option<&str> {
        self.service_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_none() {
        let temp = TempDir::new().unwrap();
        assert!(Manifest::load(temp.path()).unwrap().is_none());
    }

    #[test]
    fn reads_service_id_and_ignores_other_keys() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(MANIFEST_FILE),
            r#"
            manifest_version = 2
            name = "site"
            service_id = "abc123"

            [scripts]
            build = "make"
            "#,
        )
        .unwrap();

        let manifest = Manifest::load(temp.path()).unwrap().unwrap();
        assert_eq!(manifest.name.as_deref(), Some("site"));
        assert_eq!(manifest.service_id(), Some("abc123"));
    }

    #[test]
    fn blank_service_id_is_absent() {
        let manifest = Manifest {
            service_id: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(manifest.service_id(), None);
    }

    #[test]
    fn malformed_file_errors() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(MANIFEST_FILE), "service_id = ").unwrap();
        assert!(matches!(
            Manifest::load(temp.path()),
            Err(ManifestError::ParseError { .. })
        ));
    }
}
