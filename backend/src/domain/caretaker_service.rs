use std::sync::Arc;

use log::{debug, info};

use crate::domain::commands::caretakers::{
    AddCaretakerCommand, ArchiveCaretakerCommand, RenameCaretakerCommand, RestoreCaretakerCommand,
    RosterResult, SetPrimaryCaretakerCommand,
};
use crate::domain::day;
use crate::domain::models::Caretaker;
use crate::domain::roster;
use crate::errors::{NotebookError, Result};
use crate::storage::traits::Store;

/// Service for managing a notebook's caretaker roster.
///
/// Every mutator runs the pure guard from [`roster`], persists the accepted
/// roster, and appends the matching System note to today's journal. A
/// rejected guard becomes [`NotebookError::Validation`] with the guard's
/// reason; the stored roster is left untouched.
#[derive(Clone)]
pub struct CaretakerService {
    store: Arc<dyn Store>,
}

impl CaretakerService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    fn require_notebook(&self, notebook_id: &str) -> Result<()> {
        self.store
            .get_notebook(notebook_id)?
            .map(|_| ())
            .ok_or_else(|| NotebookError::not_found(format!("notebook {}", notebook_id)))
    }

    fn current_caregiver(&self, notebook_id: &str) -> Result<String> {
        Ok(day::load_or_seed_today(self.store.as_ref(), notebook_id)?.current_caregiver)
    }

    /// The authoritative roster: always the stored copy, with the repair
    /// pass applied (and persisted) on every load. There is deliberately no
    /// cached fallback.
    pub fn get_caretakers(&self, notebook_id: &str) -> Result<RosterResult> {
        self.require_notebook(notebook_id)?;
        let stored = self.store.list_caretakers(notebook_id)?;
        let current = self.current_caregiver(notebook_id)?;
        let (roster, repaired) = roster::self_heal(&stored, &current);
        let caretakers = if repaired {
            info!("Repaired roster invariants on load for notebook {}", notebook_id);
            self.store.save_caretakers(notebook_id, &roster)?
        } else {
            roster
        };
        Ok(RosterResult { caretakers })
    }

    pub fn add_caretaker(&self, notebook_id: &str, command: AddCaretakerCommand) -> Result<RosterResult> {
        info!("Adding caretaker {:?} to notebook {}", command.name, notebook_id);
        let roster = self.get_caretakers(notebook_id)?.caretakers;
        let was_empty = roster.is_empty();
        let name = command.name.trim().to_string();

        let update = roster::add(&roster, &command.name);
        let saved = self.commit(
            notebook_id,
            &roster,
            update,
            format!("{} was added as a caretaker.", name),
        )?;

        // The first caretaker registered also goes on duty.
        if was_empty {
            let mut today = day::load_or_seed_today(self.store.as_ref(), notebook_id)?;
            today.current_caregiver = name;
            self.store.put_day(notebook_id, &today)?;
        }

        Ok(RosterResult { caretakers: saved })
    }

    pub fn archive_caretaker(
        &self,
        notebook_id: &str,
        command: ArchiveCaretakerCommand,
    ) -> Result<RosterResult> {
        info!("Archiving caretaker {:?} in notebook {}", command.name, notebook_id);
        let roster = self.get_caretakers(notebook_id)?.caretakers;
        let current = self.current_caregiver(notebook_id)?;
        let name = display_name(&roster, &command.name);

        let update = roster::archive(&roster, &command.name, &current);
        let saved = self.commit(
            notebook_id,
            &roster,
            update,
            format!("{} was archived as a caretaker.", name),
        )?;
        Ok(RosterResult { caretakers: saved })
    }

    pub fn restore_caretaker(
        &self,
        notebook_id: &str,
        command: RestoreCaretakerCommand,
    ) -> Result<RosterResult> {
        info!("Restoring caretaker {:?} in notebook {}", command.name, notebook_id);
        let roster = self.get_caretakers(notebook_id)?.caretakers;
        let name = display_name(&roster, &command.name);

        let update = roster::restore(&roster, &command.name);
        let saved = self.commit(
            notebook_id,
            &roster,
            update,
            format!("{} was restored as a caretaker.", name),
        )?;
        Ok(RosterResult { caretakers: saved })
    }

    pub fn set_primary_caretaker(
        &self,
        notebook_id: &str,
        command: SetPrimaryCaretakerCommand,
    ) -> Result<RosterResult> {
        info!("Setting primary contact {:?} in notebook {}", command.name, notebook_id);
        let roster = self.get_caretakers(notebook_id)?.caretakers;
        let name = display_name(&roster, &command.name);

        let update = roster::set_primary(&roster, &command.name);
        let saved = self.commit(
            notebook_id,
            &roster,
            update,
            format!("{} is now the primary contact.", name),
        )?;
        Ok(RosterResult { caretakers: saved })
    }

    pub fn update_caretaker_name(
        &self,
        notebook_id: &str,
        command: RenameCaretakerCommand,
    ) -> Result<RosterResult> {
        info!(
            "Renaming caretaker {:?} to {:?} in notebook {}",
            command.name, command.new_name, notebook_id
        );
        let roster = self.get_caretakers(notebook_id)?.caretakers;
        let old_name = display_name(&roster, &command.name);
        let new_name = command.new_name.trim().to_string();

        let update = roster::rename(&roster, &command.name, &command.new_name);
        let saved = self.commit(
            notebook_id,
            &roster,
            update,
            format!("{} is now known as {}.", old_name, new_name),
        )?;

        // Keep the on-duty pointer in step with the rename.
        let mut today = day::load_or_seed_today(self.store.as_ref(), notebook_id)?;
        if roster::name_eq(&today.current_caregiver, &old_name) {
            today.current_caregiver = new_name;
            self.store.put_day(notebook_id, &today)?;
        }

        Ok(RosterResult { caretakers: saved })
    }

    /// Apply an accepted roster update: persist it and journal the event.
    /// A rejected verdict becomes a validation error; a no-op success skips
    /// both the save and the System note.
    fn commit(
        &self,
        notebook_id: &str,
        before: &[Caretaker],
        update: roster::RosterUpdate,
        note_text: String,
    ) -> Result<Vec<Caretaker>> {
        if !update.ok {
            let reason = update
                .reason
                .unwrap_or_else(|| "Invalid caretaker operation.".to_string());
            return Err(NotebookError::validation(reason));
        }
        if update.roster == before {
            debug!("Caretaker operation was a no-op for notebook {}", notebook_id);
            return Ok(update.roster);
        }
        let saved = self.store.save_caretakers(notebook_id, &update.roster)?;
        day::append_system_note(self.store.as_ref(), notebook_id, &note_text)?;
        Ok(saved)
    }
}

/// Canonical display name for `name`, falling back to the trimmed input
/// when the roster has no match (the guard will reject in that case).
fn display_name(roster: &[Caretaker], name: &str) -> String {
    roster::find(roster, name)
        .map(|idx| roster[idx].name.clone())
        .unwrap_or_else(|| name.trim().to_string())
}
