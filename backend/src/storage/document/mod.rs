//! Document store: YAML files under a base data directory.
//!
//! Each notebook gets its own directory with a metadata document, a roster
//! document, and one document per day. Writes replace whole documents
//! atomically via a temp file and rename, so a crash never leaves a
//! half-written day on disk.

mod caretaker_repository;
mod connection;
mod day_repository;
mod notebook_repository;
mod records;

use std::path::Path;
use std::sync::Arc;

use log::info;

use crate::domain::models::{Caretaker, DayRecord, NotebookMetadata};
use crate::errors::Result;
use crate::storage::traits::{CaretakerStorage, DayStorage, NotebookStorage};

use caretaker_repository::CaretakerRepository;
use connection::DocumentConnection;
use day_repository::DayRepository;
use notebook_repository::NotebookRepository;

/// The production store, composed from one repository per document kind.
pub struct DocumentStore {
    caretakers: CaretakerRepository,
    days: DayRepository,
    notebooks: NotebookRepository,
}

impl DocumentStore {
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let connection = Arc::new(DocumentConnection::new(base_directory)?);
        info!(
            "Document store ready at {:?}",
            connection.base_directory()
        );
        Ok(DocumentStore {
            caretakers: CaretakerRepository::new(connection.clone()),
            days: DayRepository::new(connection.clone()),
            notebooks: NotebookRepository::new(connection),
        })
    }
}

impl CaretakerStorage for DocumentStore {
    fn list_caretakers(&self, notebook_id: &str) -> Result<Vec<Caretaker>> {
        self.caretakers.list(notebook_id)
    }

    fn save_caretakers(&self, notebook_id: &str, roster: &[Caretaker]) -> Result<Vec<Caretaker>> {
        self.caretakers.save(notebook_id, roster)
    }
}

impl DayStorage for DocumentStore {
    fn get_day(&self, notebook_id: &str, date_key: &str) -> Result<Option<DayRecord>> {
        self.days.get(notebook_id, date_key)
    }

    fn put_day(&self, notebook_id: &str, day: &DayRecord) -> Result<()> {
        self.days.put(notebook_id, day)
    }

    fn latest_day_before(&self, notebook_id: &str, date_key: &str) -> Result<Option<DayRecord>> {
        self.days.latest_before(notebook_id, date_key)
    }

    fn list_days(&self, notebook_id: &str) -> Result<Vec<DayRecord>> {
        self.days.list(notebook_id)
    }
}

impl NotebookStorage for DocumentStore {
    fn create_notebook(&self, caree_name: &str) -> Result<NotebookMetadata> {
        self.notebooks.create(caree_name)
    }

    fn get_notebook(&self, notebook_id: &str) -> Result<Option<NotebookMetadata>> {
        self.notebooks.get(notebook_id)
    }

    fn remember_notebook(&self, notebook_id: &str) -> Result<()> {
        self.notebooks.remember(notebook_id)
    }

    fn known_notebooks(&self) -> Result<Vec<String>> {
        self.notebooks.known()
    }

    fn last_used(&self) -> Result<Option<String>> {
        self.notebooks.last_used()
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::commands::caretakers::AddCaretakerCommand;
    use crate::domain::commands::handoff::HandoffCommand;
    use crate::domain::commands::notes::CreateNoteCommand;
    use crate::Backend;
    use tempfile::TempDir;

    // End-to-end over real files: create a notebook, build a roster, hand
    // off, write a note, then reopen from the same directory and check it
    // all survived.
    #[test]
    fn full_flow_survives_reopen() {
        let dir = TempDir::new().unwrap();

        let notebook_id = {
            let backend = Backend::open(dir.path()).unwrap();
            let created = backend
                .notebook_service
                .create_notebook(crate::domain::commands::notebooks::CreateNotebookCommand {
                    caree_name: "Abuela Rosa".to_string(),
                })
                .unwrap();
            let id = created.notebook.id.clone();

            backend
                .caretaker_service
                .add_caretaker(&id, AddCaretakerCommand { name: "Lupe".to_string() })
                .unwrap();
            backend
                .caretaker_service
                .add_caretaker(&id, AddCaretakerCommand { name: "Maria".to_string() })
                .unwrap();
            backend
                .handoff_service
                .handoff(&id, HandoffCommand { to: "Maria".to_string() })
                .unwrap();
            backend
                .note_service
                .add_note(
                    &id,
                    CreateNoteCommand {
                        author: "Maria".to_string(),
                        text: "Took evening meds".to_string(),
                    },
                )
                .unwrap();
            id
        };

        let backend = Backend::open(dir.path()).unwrap();
        let today = backend.note_service.load_today(&notebook_id).unwrap().unwrap();
        assert_eq!(today.current_caregiver, "Maria");
        assert_eq!(today.last_updated_by, Some("Lupe".to_string()));

        let human: Vec<_> = today
            .care_notes
            .iter()
            .filter(|n| !n.is_system())
            .collect();
        assert_eq!(human.len(), 1);
        assert_eq!(human[0].note, "Took evening meds");

        assert_eq!(backend.notebook_service.index().unwrap().last_used, Some(notebook_id));
    }
}
