//! Filesystem layout and atomic writes for the document store.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::Result;

/// Manages the base data directory and per-notebook paths.
///
/// Layout:
///
/// ```text
/// data/
/// ├── index.yaml                  ← device-local notebook index
/// └── {notebook_id}/
///     ├── notebook.yaml
///     ├── caretakers.yaml
///     └── days/
///         └── {YYYY-MM-DD}.yaml
/// ```
#[derive(Debug, Clone)]
pub struct DocumentConnection {
    base_directory: PathBuf,
}

impl DocumentConnection {
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base = base_directory.as_ref().to_path_buf();
        if !base.exists() {
            fs::create_dir_all(&base)?;
        }
        Ok(Self { base_directory: base })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn index_path(&self) -> PathBuf {
        self.base_directory.join("index.yaml")
    }

    pub fn notebook_directory(&self, notebook_id: &str) -> PathBuf {
        self.base_directory.join(notebook_id)
    }

    pub fn notebook_path(&self, notebook_id: &str) -> PathBuf {
        self.notebook_directory(notebook_id).join("notebook.yaml")
    }

    pub fn caretakers_path(&self, notebook_id: &str) -> PathBuf {
        self.notebook_directory(notebook_id).join("caretakers.yaml")
    }

    pub fn days_directory(&self, notebook_id: &str) -> PathBuf {
        self.notebook_directory(notebook_id).join("days")
    }

    pub fn day_path(&self, notebook_id: &str, date_key: &str) -> PathBuf {
        self.days_directory(notebook_id).join(format!("{}.yaml", date_key))
    }

    /// Write a document atomically: temp file in the same directory, then
    /// rename over the target.
    pub fn write_document(&self, path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = path.with_extension("yaml.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_document_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let conn = DocumentConnection::new(dir.path()).unwrap();
        let path = conn.day_path("nb1", "2026-03-05");

        conn.write_document(&path, "date: 2026-03-05\n").unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("yaml.tmp").exists());
    }
}
