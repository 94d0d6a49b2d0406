use serde::{Deserialize, Serialize};

/// Wire representation of a caretaker roster entry.
///
/// Field names are camelCase on the wire to match the persisted document
/// shapes (`{id, name, isPrimary, isActive}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Caretaker {
    pub id: String,
    pub name: String,
    pub is_primary: bool,
    pub is_active: bool,
}

/// Wire representation of one journal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareNote {
    pub id: String,
    /// Display time-of-day (e.g. "8:30 AM"), derived from `created_at`
    pub time: String,
    pub note: String,
    /// Caretaker name, or "System" for auto-generated entries
    pub author: String,
    /// Machine timestamp (RFC 3339)
    pub created_at: String,
    /// Set only when a human edits an existing note (RFC 3339)
    pub edited_at: Option<String>,
}

/// Wire representation of a task-list entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub text: String,
    pub done: bool,
    /// Machine timestamp (RFC 3339)
    pub created_at: String,
}

/// The "today state" document for one notebook and one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayState {
    /// Date key in YYYY-MM-DD form
    pub date: String,
    pub care_notes: Vec<CareNote>,
    pub tasks: Vec<Task>,
    /// Free-text name of whoever is on duty; empty until a caretaker exists
    pub current_caregiver: String,
    /// Name of whoever performed the most recent handoff; None means no
    /// handoff has occurred yet
    pub last_updated_by: Option<String>,
}

/// Notebook metadata returned when creating or inspecting a notebook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotebookMetadata {
    pub id: String,
    pub caree_name: String,
    /// Machine timestamp (RFC 3339)
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotebookRequest {
    pub caree_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteRequest {
    pub author: String,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteRequest {
    /// Name of the caregiver requesting the edit
    pub requested_by: String,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCaretakerRequest {
    pub name: String,
}

/// Target of an archive / restore / set-primary action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaretakerActionRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameCaretakerRequest {
    pub name: String,
    pub new_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandoffRequest {
    /// Name of the active caretaker taking over
    pub to: String,
}

/// One day of the "earlier" history view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryDay {
    pub date: String,
    pub care_notes: Vec<CareNote>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    /// Days ordered most recent first
    pub days: Vec<HistoryDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotebookIndex {
    pub known_notebooks: Vec<String>,
    pub last_used: Option<String>,
}

/// Uniform error body returned by the REST layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
}
