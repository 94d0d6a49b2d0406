//! Storage traits.
//!
//! These abstract away the backing store so the domain layer can run
//! against an in-memory map in tests and the document store in production
//! without modification. All operations are synchronous; errors use the
//! closed [`crate::errors::NotebookError`] set.

use crate::domain::models::{Caretaker, DayRecord, NotebookMetadata};
use crate::errors::Result;

/// Roster persistence for one notebook.
pub trait CaretakerStorage: Send + Sync {
    /// The stored roster; empty for a notebook without caretakers.
    fn list_caretakers(&self, notebook_id: &str) -> Result<Vec<Caretaker>>;

    /// Replace the stored roster. Entries still carrying a temporary
    /// client-side id get a canonical store-issued id; the saved roster is
    /// returned so callers see the canonical ids.
    fn save_caretakers(&self, notebook_id: &str, roster: &[Caretaker]) -> Result<Vec<Caretaker>>;
}

/// Day-record persistence: one document per notebook per date key.
pub trait DayStorage: Send + Sync {
    fn get_day(&self, notebook_id: &str, date_key: &str) -> Result<Option<DayRecord>>;

    /// Whole-document replace of one day.
    fn put_day(&self, notebook_id: &str, day: &DayRecord) -> Result<()>;

    /// The most recent stored day strictly before `date_key`.
    fn latest_day_before(&self, notebook_id: &str, date_key: &str) -> Result<Option<DayRecord>>;

    /// All stored days, oldest first.
    fn list_days(&self, notebook_id: &str) -> Result<Vec<DayRecord>>;
}

/// Notebook metadata plus the device-local index of known notebooks.
pub trait NotebookStorage: Send + Sync {
    /// Create a notebook, assigning its opaque id.
    fn create_notebook(&self, caree_name: &str) -> Result<NotebookMetadata>;

    fn get_notebook(&self, notebook_id: &str) -> Result<Option<NotebookMetadata>>;

    /// Add the notebook to the known list (if absent) and mark it as the
    /// last one used.
    fn remember_notebook(&self, notebook_id: &str) -> Result<()>;

    fn known_notebooks(&self) -> Result<Vec<String>>;

    fn last_used(&self) -> Result<Option<String>>;
}

/// The full store injected into the domain services.
pub trait Store: CaretakerStorage + DayStorage + NotebookStorage {}

impl<T: CaretakerStorage + DayStorage + NotebookStorage> Store for T {}
