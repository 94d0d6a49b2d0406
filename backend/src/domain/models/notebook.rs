use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::{CareNote, Task};

/// Metadata for one notebook (one care recipient).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotebookMetadata {
    pub id: String,
    pub caree_name: String,
    pub created_at: DateTime<Utc>,
}

/// The "today state" document: one notebook's notes, tasks, and caregiver
/// pointers for a single wall-clock day.
///
/// The caregiver pointers live in the same document as the note log so a
/// handoff persists both in one write; the two cannot diverge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    /// Date key in `YYYY-MM-DD` form
    pub date: String,
    pub care_notes: Vec<CareNote>,
    pub tasks: Vec<Task>,
    /// Free-text name of whoever is on duty; empty until a caretaker exists
    pub current_caregiver: String,
    /// `None` means no handoff has occurred yet
    pub last_updated_by: Option<String>,
}

impl DayRecord {
    /// Fresh empty record for `date`.
    pub fn empty(date: impl Into<String>) -> Self {
        DayRecord {
            date: date.into(),
            care_notes: Vec::new(),
            tasks: Vec::new(),
            current_caregiver: String::new(),
            last_updated_by: None,
        }
    }

    /// New record for `date` carrying the caregiver pointers forward from
    /// the most recent prior day. Notes and tasks start empty.
    pub fn carried_from(date: impl Into<String>, prev: &DayRecord) -> Self {
        DayRecord {
            current_caregiver: prev.current_caregiver.clone(),
            last_updated_by: prev.last_updated_by.clone(),
            ..DayRecord::empty(date)
        }
    }

    /// Human-readable "last updated by" line.
    pub fn last_updated_display(&self) -> String {
        match &self.last_updated_by {
            Some(name) => format!("Last updated by {}", name),
            None => "No handoff has occurred yet.".to_string(),
        }
    }

    pub fn find_note(&self, note_id: &str) -> Option<usize> {
        self.care_notes.iter().position(|n| n.id == note_id)
    }

    pub fn find_task(&self, task_id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == task_id)
    }
}
