//! Domain models for the care notebook.

pub mod caretaker;
pub mod note;
pub mod notebook;
pub mod task;

pub use caretaker::Caretaker;
pub use note::{CareNote, SYSTEM_AUTHOR};
pub use notebook::{DayRecord, NotebookMetadata};
pub use task::Task;
