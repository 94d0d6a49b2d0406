use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use log::{debug, info};

use crate::domain::commands::notes::{
    CreateNoteCommand, DeleteNoteCommand, NoteResult, NotesByDateResult, UpdateNoteCommand,
};
use crate::domain::day;
use crate::domain::models::{CareNote, DayRecord, SYSTEM_AUTHOR};
use crate::domain::note_policy;
use crate::errors::{NotebookError, Result};
use crate::storage::traits::Store;

/// Service for the care-note journal of a notebook.
///
/// Edits and deletions are guarded by [`note_policy`]; only today's notes
/// are mutable, notes from earlier days are part of the read-only history.
#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn Store>,
}

impl NoteService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    fn require_notebook(&self, notebook_id: &str) -> Result<()> {
        self.store
            .get_notebook(notebook_id)?
            .map(|_| ())
            .ok_or_else(|| NotebookError::not_found(format!("notebook {}", notebook_id)))
    }

    /// Today's state. A cancelled read is a benign no-op: the caller gets
    /// `None` and keeps whatever it already has.
    pub fn load_today(&self, notebook_id: &str) -> Result<Option<DayRecord>> {
        match self.load_today_inner(notebook_id) {
            Err(NotebookError::Cancelled) => {
                debug!("Read of today's state cancelled for notebook {}", notebook_id);
                Ok(None)
            }
            other => other.map(Some),
        }
    }

    fn load_today_inner(&self, notebook_id: &str) -> Result<DayRecord> {
        self.require_notebook(notebook_id)?;
        day::load_or_seed_today(self.store.as_ref(), notebook_id)
    }

    pub fn add_note(&self, notebook_id: &str, command: CreateNoteCommand) -> Result<NoteResult> {
        self.require_notebook(notebook_id)?;
        let author = command.author.trim();
        let text = command.text.trim();
        if author.is_empty() {
            return Err(NotebookError::validation("Notes need an author."));
        }
        if author == SYSTEM_AUTHOR {
            return Err(NotebookError::validation(
                "\"System\" is reserved for automatic entries.",
            ));
        }
        if text.is_empty() {
            return Err(NotebookError::validation("Notes cannot be empty."));
        }

        info!("Adding note by {} to notebook {}", author, notebook_id);
        let mut today = day::load_or_seed_today(self.store.as_ref(), notebook_id)?;
        let note = CareNote::human(author, text);
        today.care_notes.push(note.clone());
        self.store.put_day(notebook_id, &today)?;
        Ok(NoteResult { note })
    }

    pub fn update_note(&self, notebook_id: &str, command: UpdateNoteCommand) -> Result<NoteResult> {
        self.require_notebook(notebook_id)?;
        let text = command.text.trim();
        if text.is_empty() {
            return Err(NotebookError::validation("Notes cannot be empty."));
        }

        let mut today = day::load_or_seed_today(self.store.as_ref(), notebook_id)?;
        let idx = today
            .find_note(&command.note_id)
            .ok_or_else(|| NotebookError::not_found(format!("note {}", command.note_id)))?;

        if !note_policy::can_edit(&today.care_notes[idx], &command.requested_by, Utc::now()) {
            let reason = if today.care_notes[idx].is_system() {
                "System notes cannot be edited."
            } else {
                "Notes can only be edited by their author, within 15 minutes of writing."
            };
            return Err(NotebookError::validation(reason));
        }

        info!("Updating note {} in notebook {}", command.note_id, notebook_id);
        today.care_notes[idx].note = text.to_string();
        today.care_notes[idx].edited_at = Some(Utc::now());
        let note = today.care_notes[idx].clone();
        self.store.put_day(notebook_id, &today)?;
        Ok(NoteResult { note })
    }

    pub fn delete_note(&self, notebook_id: &str, command: DeleteNoteCommand) -> Result<()> {
        self.require_notebook(notebook_id)?;
        let mut today = day::load_or_seed_today(self.store.as_ref(), notebook_id)?;
        let idx = today
            .find_note(&command.note_id)
            .ok_or_else(|| NotebookError::not_found(format!("note {}", command.note_id)))?;

        if !note_policy::can_delete(&today.care_notes[idx], &command.requested_by) {
            let reason = if today.care_notes[idx].is_system() {
                "System notes cannot be deleted."
            } else {
                "Notes can only be deleted by their author."
            };
            return Err(NotebookError::validation(reason));
        }

        info!("Deleting note {} from notebook {}", command.note_id, notebook_id);
        today.care_notes.remove(idx);
        self.store.put_day(notebook_id, &today)
    }

    /// Full history for the "earlier" view: date key to that day's notes,
    /// oldest day first.
    pub fn get_notes_by_date(&self, notebook_id: &str) -> Result<NotesByDateResult> {
        self.require_notebook(notebook_id)?;
        let mut days = BTreeMap::new();
        for record in self.store.list_days(notebook_id)? {
            days.insert(record.date.clone(), record.care_notes);
        }
        Ok(NotesByDateResult { days })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStore;
    use crate::storage::traits::{DayStorage, NotebookStorage};

    fn setup() -> (NoteService, Arc<MemoryStore>, String) {
        let store = Arc::new(MemoryStore::new());
        let notebook = store.create_notebook("Abuela").unwrap();
        (NoteService::new(store.clone()), store, notebook.id)
    }

    fn add(service: &NoteService, id: &str, author: &str, text: &str) -> CareNote {
        service
            .add_note(
                id,
                CreateNoteCommand {
                    author: author.to_string(),
                    text: text.to_string(),
                },
            )
            .unwrap()
            .note
    }

    #[test]
    fn added_notes_land_in_todays_record() {
        let (service, _, id) = setup();
        let note = add(&service, &id, "Lupe", "slept well");

        let today = service.load_today(&id).unwrap().unwrap();
        assert_eq!(today.care_notes.len(), 1);
        assert_eq!(today.care_notes[0].id, note.id);
        assert_eq!(today.care_notes[0].author, "Lupe");
        assert!(!today.care_notes[0].time.is_empty());
    }

    #[test]
    fn blank_notes_and_authors_are_rejected() {
        let (service, _, id) = setup();
        let blank_text = service.add_note(
            &id,
            CreateNoteCommand { author: "Lupe".to_string(), text: "  ".to_string() },
        );
        assert!(matches!(blank_text, Err(NotebookError::Validation(_))));

        let blank_author = service.add_note(
            &id,
            CreateNoteCommand { author: " ".to_string(), text: "hi".to_string() },
        );
        assert!(matches!(blank_author, Err(NotebookError::Validation(_))));
    }

    #[test]
    fn the_system_author_is_reserved() {
        let (service, _, id) = setup();
        let err = service
            .add_note(
                &id,
                CreateNoteCommand { author: "System".to_string(), text: "hi".to_string() },
            )
            .unwrap_err();
        assert!(matches!(err, NotebookError::Validation(_)));
    }

    #[test]
    fn author_can_edit_a_fresh_note() {
        let (service, _, id) = setup();
        let note = add(&service, &id, "Lupe", "slept well");

        let updated = service
            .update_note(
                &id,
                UpdateNoteCommand {
                    note_id: note.id.clone(),
                    requested_by: "lupe".to_string(),
                    text: "slept badly".to_string(),
                },
            )
            .unwrap();
        assert_eq!(updated.note.note, "slept badly");
        assert!(updated.note.edited_at.is_some());
    }

    #[test]
    fn non_author_cannot_edit_or_delete() {
        let (service, _, id) = setup();
        let note = add(&service, &id, "Lupe", "slept well");

        let edit = service.update_note(
            &id,
            UpdateNoteCommand {
                note_id: note.id.clone(),
                requested_by: "Maria".to_string(),
                text: "changed".to_string(),
            },
        );
        assert!(matches!(edit, Err(NotebookError::Validation(_))));

        let delete = service.delete_note(
            &id,
            DeleteNoteCommand { note_id: note.id, requested_by: "Maria".to_string() },
        );
        assert!(matches!(delete, Err(NotebookError::Validation(_))));
    }

    #[test]
    fn system_notes_cannot_be_edited_or_deleted() {
        let (service, store, id) = setup();
        let mut today = day::load_or_seed_today(store.as_ref(), &id).unwrap();
        today.care_notes.push(CareNote::system("Maria was archived as a caretaker."));
        store.put_day(&id, &today).unwrap();
        let note_id = today.care_notes[0].id.clone();

        let edit = service.update_note(
            &id,
            UpdateNoteCommand {
                note_id: note_id.clone(),
                requested_by: "System".to_string(),
                text: "changed".to_string(),
            },
        );
        assert!(matches!(edit, Err(NotebookError::Validation(_))));

        let delete = service.delete_note(
            &id,
            DeleteNoteCommand { note_id, requested_by: "System".to_string() },
        );
        assert!(matches!(delete, Err(NotebookError::Validation(_))));
    }

    #[test]
    fn author_can_delete_their_note() {
        let (service, _, id) = setup();
        let note = add(&service, &id, "Lupe", "slept well");
        service
            .delete_note(&id, DeleteNoteCommand { note_id: note.id, requested_by: "Lupe".to_string() })
            .unwrap();
        assert!(service.load_today(&id).unwrap().unwrap().care_notes.is_empty());
    }

    #[test]
    fn editing_an_unknown_note_is_not_found() {
        let (service, _, id) = setup();
        let err = service
            .update_note(
                &id,
                UpdateNoteCommand {
                    note_id: "missing".to_string(),
                    requested_by: "Lupe".to_string(),
                    text: "x".to_string(),
                },
            )
            .unwrap_err();
        assert!(matches!(err, NotebookError::NotFound(_)));
    }

    #[test]
    fn history_groups_notes_by_date_key() {
        let (service, store, id) = setup();
        // A prior day written directly to the store.
        let mut earlier = DayRecord::empty("2020-01-01");
        earlier.care_notes.push(CareNote::human("Lupe", "old entry"));
        store.put_day(&id, &earlier).unwrap();

        add(&service, &id, "Maria", "new entry");

        let history = service.get_notes_by_date(&id).unwrap();
        assert_eq!(history.days.len(), 2);
        assert_eq!(history.days["2020-01-01"][0].note, "old entry");
        // BTreeMap iterates oldest first.
        assert_eq!(history.days.keys().next().unwrap(), "2020-01-01");
    }

    #[test]
    fn a_cancelled_read_is_a_benign_no_op() {
        let (service, store, id) = setup();
        store.fail_next_with(NotebookError::Cancelled);
        let today = service.load_today(&id).unwrap();
        assert!(today.is_none());
    }

    #[test]
    fn a_quota_failure_on_write_is_surfaced() {
        let (service, store, id) = setup();
        store.fail_next_with(NotebookError::QuotaExceeded);
        let err = service
            .add_note(
                &id,
                CreateNoteCommand { author: "Lupe".to_string(), text: "hi".to_string() },
            )
            .unwrap_err();
        assert!(matches!(err, NotebookError::QuotaExceeded));
    }

    #[test]
    fn day_rollover_carries_caregiver_pointers_forward() {
        let (service, store, id) = setup();
        let mut earlier = DayRecord::empty("2020-01-01");
        earlier.current_caregiver = "Lupe".to_string();
        earlier.last_updated_by = Some("Maria".to_string());
        store.put_day(&id, &earlier).unwrap();

        let today = service.load_today(&id).unwrap().unwrap();
        assert_eq!(today.current_caregiver, "Lupe");
        assert_eq!(today.last_updated_by.as_deref(), Some("Maria"));
        assert!(today.care_notes.is_empty());
    }
}
