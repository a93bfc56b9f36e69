//! Project layout and document loading.
//!
//! A project keeps its configuration under `config/` relative to the project
//! root:
//!
//! - `config/application.toml` is the base document. It is optional; a
//!   missing base reads as an empty table.
//! - `config/<environment>.toml` is the override document. It is required.
//!
//! The asymmetry follows the one-base, many-environments model. This module
//! only reads; parsing and merging happen in [`resolve`](crate::resolve).

use std::path::{Path, PathBuf};

use crate::environment::{BASE_DOCUMENT, Environment};
use crate::error::LegendError;

/// Directory holding configuration documents, relative to the project root.
pub const CONFIG_DIR: &str = "config";

/// Extension of configuration documents.
pub const EXTENSION: &str = "toml";

/// A file path paired with its raw contents.
pub type LoadedFile = (PathBuf, String);

/// Paths of a project's configuration documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLayout {
    root: PathBuf,
}

impl ConfigLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_dir(&self) -> PathBuf {
        self.root.join(CONFIG_DIR)
    }

    pub fn base_path(&self) -> PathBuf {
        self.document_path(BASE_DOCUMENT)
    }

    pub fn environment_path(&self, environment: &Environment) -> PathBuf {
        self.document_path(environment.as_str())
    }

    fn document_path(&self, stem: &str) -> PathBuf {
        self.config_dir().join(format!("{stem}.{EXTENSION}"))
    }

    /// Fail with [`LegendError::NotAProjectDirectory`] unless `config/` exists.
    pub fn ensure_project(&self) -> Result<(), LegendError> {
        let dir = self.config_dir();
        if dir.is_dir() {
            Ok(())
        } else {
            Err(LegendError::NotAProjectDirectory { dir })
        }
    }

    /// Read the base document, `None` if it does not exist.
    pub fn read_base(&self) -> Result<Option<LoadedFile>, LegendError> {
        read_optional(self.base_path())
    }

    /// Read an environment document; a missing file is
    /// [`LegendError::ConfigNotFound`].
    pub fn read_environment(&self, environment: &Environment) -> Result<LoadedFile, LegendError> {
        let path = self.environment_path(environment);
        read_optional(path.clone())?.ok_or(LegendError::ConfigNotFound { path })
    }

    /// Names of all environment documents, sorted. The base document is skipped.
    pub fn list_environments(&self) -> Result<Vec<String>, LegendError> {
        self.ensure_project()?;
        let dir = self.config_dir();
        let entries = std::fs::read_dir(&dir).map_err(|e| LegendError::Io {
            path: dir.clone(),
            source: e,
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| LegendError::Io {
                path: dir.clone(),
                source: e,
            })?;
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                && stem != BASE_DOCUMENT
            {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Read a file, mapping "not found" to `None` and propagating other I/O errors.
fn read_optional(path: PathBuf) -> Result<Option<LoadedFile>, LegendError> {
    match std::fs::read_to_string(&path) {
        Ok(content) => Ok(Some((path, content))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(LegendError::Io { path, source: e }),
    }
}
