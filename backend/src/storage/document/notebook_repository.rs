use std::fs;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::connection::DocumentConnection;
use super::records::{YamlIndex, YamlNotebook};
use crate::domain::models::NotebookMetadata;
use crate::errors::Result;

/// File-backed notebook metadata plus the device-local `index.yaml` of
/// known notebooks.
#[derive(Clone)]
pub struct NotebookRepository {
    connection: Arc<DocumentConnection>,
}

impl NotebookRepository {
    pub fn new(connection: Arc<DocumentConnection>) -> Self {
        Self { connection }
    }

    pub fn create(&self, caree_name: &str) -> Result<NotebookMetadata> {
        let metadata = NotebookMetadata {
            id: Uuid::new_v4().to_string(),
            caree_name: caree_name.to_string(),
            created_at: Utc::now(),
        };
        let contents = serde_yaml::to_string(&YamlNotebook::from(&metadata))?;
        self.connection
            .write_document(&self.connection.notebook_path(&metadata.id), &contents)?;
        Ok(metadata)
    }

    pub fn get(&self, notebook_id: &str) -> Result<Option<NotebookMetadata>> {
        let path = self.connection.notebook_path(notebook_id);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)?;
        let record: YamlNotebook = serde_yaml::from_str(&contents)?;
        Ok(Some(record.into_domain()?))
    }

    pub fn remember(&self, notebook_id: &str) -> Result<()> {
        let mut index = self.load_index()?;
        if !index.known_notebooks.iter().any(|id| id == notebook_id) {
            index.known_notebooks.push(notebook_id.to_string());
        }
        index.last_used = Some(notebook_id.to_string());
        self.save_index(&index)
    }

    pub fn known(&self) -> Result<Vec<String>> {
        Ok(self.load_index()?.known_notebooks)
    }

    pub fn last_used(&self) -> Result<Option<String>> {
        Ok(self.load_index()?.last_used)
    }

    fn load_index(&self) -> Result<YamlIndex> {
        let path = self.connection.index_path();
        if !path.exists() {
            return Ok(YamlIndex::default());
        }
        let contents = fs::read_to_string(&path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    fn save_index(&self, index: &YamlIndex) -> Result<()> {
        let contents = serde_yaml::to_string(index)?;
        self.connection
            .write_document(&self.connection.index_path(), &contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (NotebookRepository, TempDir) {
        let dir = TempDir::new().unwrap();
        let conn = Arc::new(DocumentConnection::new(dir.path()).unwrap());
        (NotebookRepository::new(conn), dir)
    }

    #[test]
    fn created_notebooks_can_be_read_back() {
        let (repo, _dir) = setup();
        let created = repo.create("Abuela Rosa").unwrap();

        let loaded = repo.get(&created.id).unwrap().unwrap();
        assert_eq!(loaded, created);
        assert!(repo.get("no-such-notebook").unwrap().is_none());
    }

    #[test]
    fn index_tracks_known_and_last_used() {
        let (repo, _dir) = setup();
        assert!(repo.known().unwrap().is_empty());
        assert!(repo.last_used().unwrap().is_none());

        repo.remember("nb1").unwrap();
        repo.remember("nb2").unwrap();
        repo.remember("nb1").unwrap();

        assert_eq!(repo.known().unwrap(), vec!["nb1", "nb2"]);
        assert_eq!(repo.last_used().unwrap(), Some("nb1".to_string()));
    }
}
