//! # Care Notebook Backend
//!
//! Backend for a small multi-tenant "care notebook": caregivers record
//! timestamped notes, keep a task list, and hand off responsibility for a
//! care recipient. One *notebook* is the unit of data isolation — one care
//! recipient's notes, tasks, and caretaker roster.
//!
//! The crate is layered so that the caretaker-roster and handoff rules stay
//! pure and trivially testable:
//!
//! - **`domain`**: pure roster/handoff/editability functions plus the
//!   services that drive them. The pure functions never perform I/O and
//!   never error for expected validation failures; they return a verdict.
//! - **`storage`**: narrow storage traits with an in-memory implementation
//!   (tests, local use) and a YAML document-store implementation
//!   (production). Services receive the store by injection; there is no
//!   ambient global store.
//! - **`rest`**: the axum HTTP surface mapping wire DTOs from the `shared`
//!   crate onto domain commands.

pub mod domain;
pub mod errors;
pub mod rest;
pub mod storage;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use crate::domain::{CaretakerService, HandoffService, NoteService, NotebookService, TaskService};
use crate::storage::document::DocumentStore;
use crate::storage::memory::MemoryStore;
use crate::storage::traits::Store;

/// Main backend struct that orchestrates all services over one store.
pub struct Backend {
    pub notebook_service: NotebookService,
    pub caretaker_service: CaretakerService,
    pub note_service: NoteService,
    pub task_service: TaskService,
    pub handoff_service: HandoffService,
}

impl Backend {
    /// Wire all services onto an injected store.
    pub fn new(store: Arc<dyn Store>) -> Self {
        let notebook_service = NotebookService::new(store.clone());
        let caretaker_service = CaretakerService::new(store.clone());
        let note_service = NoteService::new(store.clone());
        let task_service = TaskService::new(store.clone());
        let handoff_service = HandoffService::new(store, caretaker_service.clone());

        Backend {
            notebook_service,
            caretaker_service,
            note_service,
            task_service,
            handoff_service,
        }
    }

    /// Backend over the document store rooted at `data_dir`.
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        Ok(Self::new(Arc::new(DocumentStore::new(data_dir)?)))
    }

    /// Backend over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }
}
