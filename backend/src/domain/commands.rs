//! Domain-level command and result types.
//!
//! These structs are used by services inside the domain layer and are not
//! exposed over the public API; the REST layer maps the wire DTOs from the
//! `shared` crate onto these internal types.

pub mod caretakers {
    use crate::domain::models::Caretaker;

    #[derive(Debug, Clone)]
    pub struct AddCaretakerCommand {
        pub name: String,
    }

    #[derive(Debug, Clone)]
    pub struct ArchiveCaretakerCommand {
        pub name: String,
    }

    #[derive(Debug, Clone)]
    pub struct RestoreCaretakerCommand {
        pub name: String,
    }

    #[derive(Debug, Clone)]
    pub struct SetPrimaryCaretakerCommand {
        pub name: String,
    }

    #[derive(Debug, Clone)]
    pub struct RenameCaretakerCommand {
        pub name: String,
        pub new_name: String,
    }

    /// The authoritative roster after a load or mutation.
    #[derive(Debug, Clone)]
    pub struct RosterResult {
        pub caretakers: Vec<Caretaker>,
    }
}

pub mod notes {
    use std::collections::BTreeMap;

    use crate::domain::models::CareNote;

    #[derive(Debug, Clone)]
    pub struct CreateNoteCommand {
        pub author: String,
        pub text: String,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateNoteCommand {
        pub note_id: String,
        pub requested_by: String,
        pub text: String,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteNoteCommand {
        pub note_id: String,
        pub requested_by: String,
    }

    #[derive(Debug, Clone)]
    pub struct NoteResult {
        pub note: CareNote,
    }

    /// History view: date key to that day's notes.
    #[derive(Debug, Clone)]
    pub struct NotesByDateResult {
        pub days: BTreeMap<String, Vec<CareNote>>,
    }
}

pub mod tasks {
    use crate::domain::models::Task;

    #[derive(Debug, Clone)]
    pub struct CreateTaskCommand {
        pub text: String,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateTaskCommand {
        pub task_id: String,
        pub text: String,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteTaskCommand {
        pub task_id: String,
    }

    #[derive(Debug, Clone)]
    pub struct ToggleTaskCommand {
        pub task_id: String,
    }

    #[derive(Debug, Clone)]
    pub struct TaskResult {
        pub task: Task,
    }
}

pub mod handoff {
    use crate::domain::models::{Caretaker, DayRecord};

    #[derive(Debug, Clone)]
    pub struct HandoffCommand {
        /// Name of the active caretaker taking over
        pub to: String,
    }

    #[derive(Debug, Clone)]
    pub struct HandoffResult {
        pub today: DayRecord,
    }

    #[derive(Debug, Clone)]
    pub struct HandoffTargetsResult {
        pub targets: Vec<Caretaker>,
    }
}

pub mod notebooks {
    use crate::domain::models::NotebookMetadata;

    #[derive(Debug, Clone)]
    pub struct CreateNotebookCommand {
        pub caree_name: String,
    }

    #[derive(Debug, Clone)]
    pub struct CreateNotebookResult {
        pub notebook: NotebookMetadata,
    }

    /// The device-local index of known notebooks.
    #[derive(Debug, Clone)]
    pub struct NotebookIndexResult {
        pub known_notebooks: Vec<String>,
        pub last_used: Option<String>,
    }
}
