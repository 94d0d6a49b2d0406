use std::sync::Arc;

use log::info;

use crate::domain::commands::notebooks::{
    CreateNotebookCommand, CreateNotebookResult, NotebookIndexResult,
};
use crate::domain::models::NotebookMetadata;
use crate::errors::{NotebookError, Result};
use crate::storage::traits::Store;

/// Service for notebook lifecycle and the device-local index of known
/// notebooks (so revisiting without an id can resume the last one used).
#[derive(Clone)]
pub struct NotebookService {
    store: Arc<dyn Store>,
}

impl NotebookService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub fn create_notebook(&self, command: CreateNotebookCommand) -> Result<CreateNotebookResult> {
        let caree_name = command.caree_name.trim();
        if caree_name.is_empty() {
            return Err(NotebookError::validation("The care recipient needs a name."));
        }

        let notebook = self.store.create_notebook(caree_name)?;
        self.store.remember_notebook(&notebook.id)?;
        info!("Created notebook {} for {}", notebook.id, notebook.caree_name);
        Ok(CreateNotebookResult { notebook })
    }

    pub fn get_notebook(&self, notebook_id: &str) -> Result<NotebookMetadata> {
        self.store
            .get_notebook(notebook_id)?
            .ok_or_else(|| NotebookError::not_found(format!("notebook {}", notebook_id)))
    }

    /// Look up a notebook and mark it as the last one used on this device.
    pub fn open_notebook(&self, notebook_id: &str) -> Result<NotebookMetadata> {
        let notebook = self.get_notebook(notebook_id)?;
        self.store.remember_notebook(&notebook.id)?;
        Ok(notebook)
    }

    pub fn index(&self) -> Result<NotebookIndexResult> {
        Ok(NotebookIndexResult {
            known_notebooks: self.store.known_notebooks()?,
            last_used: self.store.last_used()?,
        })
    }
}
