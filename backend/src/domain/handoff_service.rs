use std::sync::Arc;

use log::info;

use crate::domain::caretaker_service::CaretakerService;
use crate::domain::commands::handoff::{HandoffCommand, HandoffResult, HandoffTargetsResult};
use crate::domain::day;
use crate::domain::handoff;
use crate::domain::models::CareNote;
use crate::errors::{NotebookError, Result};
use crate::storage::traits::Store;

/// Service for transferring "current caregiver" status.
///
/// The caregiver pointers and the handoff System note live in the same day
/// record, so an accepted handoff is persisted in a single write and the
/// two cannot diverge.
#[derive(Clone)]
pub struct HandoffService {
    store: Arc<dyn Store>,
    caretakers: CaretakerService,
}

impl HandoffService {
    pub fn new(store: Arc<dyn Store>, caretakers: CaretakerService) -> Self {
        Self { store, caretakers }
    }

    /// Who a handoff could go to right now: active caretakers other than
    /// the one on duty. An empty list means handoff is unavailable.
    pub fn eligible_targets(&self, notebook_id: &str) -> Result<HandoffTargetsResult> {
        let roster = self.caretakers.get_caretakers(notebook_id)?.caretakers;
        let today = day::load_or_seed_today(self.store.as_ref(), notebook_id)?;
        Ok(HandoffTargetsResult {
            targets: handoff::eligible_targets(&roster, &today.current_caregiver),
        })
    }

    pub fn handoff(&self, notebook_id: &str, command: HandoffCommand) -> Result<HandoffResult> {
        let roster = self.caretakers.get_caretakers(notebook_id)?.caretakers;
        let mut today = day::load_or_seed_today(self.store.as_ref(), notebook_id)?;

        let update = handoff::handoff(&roster, &today.current_caregiver, &command.to);
        if !update.ok {
            let reason = update
                .reason
                .unwrap_or_else(|| "Invalid handoff.".to_string());
            return Err(NotebookError::validation(reason));
        }

        info!(
            "Handoff in notebook {}: {} -> {}",
            notebook_id, today.current_caregiver, update.current_caregiver
        );
        today.current_caregiver = update.current_caregiver;
        today.last_updated_by = update.last_updated_by;
        if let Some(text) = update.note_text {
            today.care_notes.push(CareNote::system(text));
        }
        self.store.put_day(notebook_id, &today)?;
        Ok(HandoffResult { today })
    }
}
