//! Note editability policy.
//!
//! System notes are never editable or deletable by anyone. A human note can
//! be edited only by its author, and only within 15 minutes of creation;
//! deletion is author-only with no time limit. The window is computed from
//! the note's machine timestamp, so it behaves correctly across midnight.

use chrono::{DateTime, Duration, Utc};

use crate::domain::models::CareNote;
use crate::domain::roster;

/// How long after creation a note stays editable.
pub const EDIT_WINDOW_MINUTES: i64 = 15;

/// Whether `requester` may edit `note` at `now`.
pub fn can_edit(note: &CareNote, requester: &str, now: DateTime<Utc>) -> bool {
    if note.is_system() {
        return false;
    }
    if !roster::name_eq(&note.author, requester) {
        return false;
    }
    now.signed_duration_since(note.created_at) <= Duration::minutes(EDIT_WINDOW_MINUTES)
}

/// Whether `requester` may delete `note`.
pub fn can_delete(note: &CareNote, requester: &str) -> bool {
    !note.is_system() && roster::name_eq(&note.author, requester)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::note::SYSTEM_AUTHOR;
    use chrono::{Local, TimeZone};

    fn note_by(author: &str) -> CareNote {
        CareNote::human_at(
            author,
            "slept well",
            Local.with_ymd_and_hms(2026, 3, 5, 8, 30, 0).unwrap(),
        )
    }

    fn minutes_after(note: &CareNote, minutes: i64) -> DateTime<Utc> {
        note.created_at + Duration::minutes(minutes)
    }

    #[test]
    fn system_notes_are_never_editable_or_deletable() {
        let note = CareNote::system("Maria was archived as a caretaker.");
        for requester in ["Lupe", "Maria", SYSTEM_AUTHOR] {
            assert!(!can_edit(&note, requester, Utc::now()));
            assert!(!can_delete(&note, requester));
        }
    }

    #[test]
    fn author_can_edit_within_the_window() {
        let note = note_by("Lupe");
        assert!(can_edit(&note, "Lupe", minutes_after(&note, 5)));
        assert!(can_edit(&note, "Lupe", minutes_after(&note, EDIT_WINDOW_MINUTES)));
    }

    #[test]
    fn author_cannot_edit_after_the_window() {
        let note = note_by("Lupe");
        assert!(!can_edit(&note, "Lupe", minutes_after(&note, EDIT_WINDOW_MINUTES + 1)));
    }

    #[test]
    fn non_authors_cannot_edit_or_delete() {
        let note = note_by("Lupe");
        assert!(!can_edit(&note, "Maria", minutes_after(&note, 1)));
        assert!(!can_delete(&note, "Maria"));
    }

    #[test]
    fn author_matching_is_case_insensitive() {
        // One normalization rule everywhere: author matching follows the
        // same case-insensitive comparison as caretaker lookup.
        let note = note_by("Lupe");
        assert!(can_edit(&note, "lupe", minutes_after(&note, 1)));
        assert!(can_delete(&note, "LUPE"));
    }

    #[test]
    fn the_window_spans_midnight() {
        let late = Local.with_ymd_and_hms(2026, 3, 5, 23, 55, 0).unwrap();
        let note = CareNote::human_at("Lupe", "last check", late);
        // Eight minutes later it is past midnight; still inside the window.
        assert!(can_edit(&note, "Lupe", minutes_after(&note, 8)));
    }

    #[test]
    fn deletion_has_no_time_window() {
        let note = note_by("Lupe");
        assert!(can_delete(&note, "Lupe"));
    }
}
