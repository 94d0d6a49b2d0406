//! # Domain Module
//!
//! Business logic for the care notebook. The roster invariant engine
//! (`roster`), handoff transition (`handoff`), and note editability policy
//! (`note_policy`) are pure functions over plain values; they perform no
//! I/O and report expected validation failures as verdict values rather
//! than errors.
//!
//! The `*_service` modules form the adapter layer: each operation runs the
//! pure guard, persists the result through the injected [`Store`], appends
//! the matching System note, and converts rejected verdicts into
//! [`crate::errors::NotebookError::Validation`].
//!
//! ## Invariants
//!
//! - At most one caretaker is the primary contact; a non-empty roster
//!   converges to exactly one via the self-heal pass run on every load.
//! - The primary contact and the current caregiver cannot be archived.
//! - System notes are never edited or deleted.
//!
//! [`Store`]: crate::storage::traits::Store

pub mod commands;
pub mod dates;
pub mod day;
pub mod handoff;
pub mod models;
pub mod note_policy;
pub mod roster;

pub mod caretaker_service;
pub mod handoff_service;
pub mod note_service;
pub mod notebook_service;
pub mod task_service;

pub use caretaker_service::CaretakerService;
pub use handoff_service::HandoffService;
pub use note_service::NoteService;
pub use notebook_service::NotebookService;
pub use task_service::TaskService;
