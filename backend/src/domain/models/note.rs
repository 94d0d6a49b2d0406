use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::dates;

/// Author sentinel for auto-generated journal entries. Notes carrying this
/// author are never editable or deletable.
pub const SYSTEM_AUTHOR: &str = "System";

/// One journal entry. Identity is the opaque `id`; the display `time` is
/// derived from `created_at` at creation and never parsed back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareNote {
    pub id: String,
    pub note: String,
    /// Caretaker name, or [`SYSTEM_AUTHOR`]
    pub author: String,
    /// Display time-of-day, e.g. "8:30 AM"
    pub time: String,
    pub created_at: DateTime<Utc>,
    /// Set only when a human edits an existing note
    pub edited_at: Option<DateTime<Utc>>,
}

impl CareNote {
    /// Human-authored note written at `at`.
    pub fn human_at(author: impl Into<String>, text: impl Into<String>, at: DateTime<Local>) -> Self {
        CareNote {
            id: Uuid::new_v4().to_string(),
            note: text.into(),
            author: author.into(),
            time: dates::format_time_of_day(&at),
            created_at: at.with_timezone(&Utc),
            edited_at: None,
        }
    }

    /// Human-authored note written now.
    pub fn human(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self::human_at(author, text, Local::now())
    }

    /// Auto-generated note describing a roster or handoff event.
    pub fn system_at(text: impl Into<String>, at: DateTime<Local>) -> Self {
        Self::human_at(SYSTEM_AUTHOR, text, at)
    }

    /// Auto-generated note written now.
    pub fn system(text: impl Into<String>) -> Self {
        Self::system_at(text, Local::now())
    }

    pub fn is_system(&self) -> bool {
        self.author == SYSTEM_AUTHOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn display_time_is_derived_from_timestamp() {
        let at = Local.with_ymd_and_hms(2026, 3, 5, 8, 30, 0).unwrap();
        let note = CareNote::human_at("Lupe", "slept well", at);
        assert_eq!(note.time, "8:30 AM");
        assert_eq!(note.created_at, at.with_timezone(&Utc));
        assert!(note.edited_at.is_none());
    }

    #[test]
    fn system_notes_carry_the_sentinel_author() {
        let note = CareNote::system("Maria was archived as a caretaker.");
        assert!(note.is_system());
        assert_eq!(note.author, "System");
    }
}
