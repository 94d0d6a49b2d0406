use std::fs;
use std::sync::Arc;

use log::debug;

use super::connection::DocumentConnection;
use super::records::YamlCaretaker;
use crate::domain::models::Caretaker;
use crate::errors::Result;
use crate::storage::memory::assign_canonical_ids;

/// File-backed roster repository: one `caretakers.yaml` per notebook,
/// replaced whole on every save.
#[derive(Clone)]
pub struct CaretakerRepository {
    connection: Arc<DocumentConnection>,
}

impl CaretakerRepository {
    pub fn new(connection: Arc<DocumentConnection>) -> Self {
        Self { connection }
    }

    pub fn list(&self, notebook_id: &str) -> Result<Vec<Caretaker>> {
        let path = self.connection.caretakers_path(notebook_id);
        if !path.exists() {
            debug!("No roster document yet for notebook {}", notebook_id);
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&path)?;
        let records: Vec<YamlCaretaker> = serde_yaml::from_str(&contents)?;
        Ok(records.into_iter().map(Caretaker::from).collect())
    }

    pub fn save(&self, notebook_id: &str, roster: &[Caretaker]) -> Result<Vec<Caretaker>> {
        let saved = assign_canonical_ids(roster);
        let records: Vec<YamlCaretaker> = saved.iter().map(YamlCaretaker::from).collect();
        let contents = serde_yaml::to_string(&records)?;
        self.connection
            .write_document(&self.connection.caretakers_path(notebook_id), &contents)?;
        Ok(saved)
    }
}
