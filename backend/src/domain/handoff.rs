//! Handoff transition.
//!
//! Transfers "current caregiver" status from whoever is on duty to another
//! active caretaker, recording who performed the handoff and the System
//! note text describing it. Pure; the service layer persists the result in
//! a single day-record write so the caregiver pointers and the note cannot
//! diverge.

use crate::domain::models::Caretaker;
use crate::domain::roster;

/// Result of a handoff attempt. The pointer fields are meaningful only when
/// `ok` is true.
#[derive(Debug, Clone, PartialEq)]
pub struct HandoffUpdate {
    pub ok: bool,
    pub reason: Option<String>,
    /// New on-duty name (the roster's canonical casing of the target)
    pub current_caregiver: String,
    /// Who performed the handoff
    pub last_updated_by: Option<String>,
    /// System note text, e.g. "Lupe handed off care to Maria."
    pub note_text: Option<String>,
}

impl HandoffUpdate {
    fn rejected(current: &str, reason: impl Into<String>) -> Self {
        HandoffUpdate {
            ok: false,
            reason: Some(reason.into()),
            current_caregiver: current.to_string(),
            last_updated_by: None,
            note_text: None,
        }
    }
}

/// Validate and compute a handoff from `current` to `target`. Valid only
/// when `target` names an active caretaker other than `current`.
pub fn handoff(roster: &[Caretaker], current: &str, target: &str) -> HandoffUpdate {
    let current = current.trim();
    let target = target.trim();
    if current.is_empty() {
        return HandoffUpdate::rejected(current, "No caregiver is currently on duty.");
    }
    if target.is_empty() {
        return HandoffUpdate::rejected(current, "Choose a caretaker to hand off to.");
    }

    let idx = match roster::find(roster, target) {
        Some(idx) => idx,
        None => {
            return HandoffUpdate::rejected(
                current,
                format!("No caretaker named {} was found.", target),
            )
        }
    };
    if !roster[idx].is_active {
        return HandoffUpdate::rejected(
            current,
            format!("{} is archived and cannot take over care.", roster[idx].name),
        );
    }
    if roster::name_eq(&roster[idx].name, current) {
        return HandoffUpdate::rejected(
            current,
            format!("{} is already the current caregiver.", roster[idx].name),
        );
    }

    let target_name = roster[idx].name.clone();
    HandoffUpdate {
        ok: true,
        reason: None,
        note_text: Some(format!("{} handed off care to {}.", current, target_name)),
        current_caregiver: target_name,
        last_updated_by: Some(current.to_string()),
    }
}

/// Caretakers a handoff could go to: active and not currently on duty.
/// When this is empty, handoff is unavailable rather than an error.
pub fn eligible_targets(roster: &[Caretaker], current: &str) -> Vec<Caretaker> {
    roster
        .iter()
        .filter(|c| c.is_active && !roster::name_eq(&c.name, current))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caretaker(name: &str, is_primary: bool, is_active: bool) -> Caretaker {
        Caretaker {
            id: format!("caretaker::test::{}", name.to_lowercase()),
            name: name.to_string(),
            is_primary,
            is_active,
        }
    }

    fn lupe_and_maria() -> Vec<Caretaker> {
        vec![caretaker("Lupe", true, true), caretaker("Maria", false, true)]
    }

    #[test]
    fn successful_handoff_moves_both_pointers_and_writes_the_note() {
        let update = handoff(&lupe_and_maria(), "Lupe", "Maria");
        assert!(update.ok);
        assert_eq!(update.current_caregiver, "Maria");
        assert_eq!(update.last_updated_by.as_deref(), Some("Lupe"));
        assert_eq!(update.note_text.as_deref(), Some("Lupe handed off care to Maria."));
    }

    #[test]
    fn handoff_target_is_matched_case_insensitively() {
        let update = handoff(&lupe_and_maria(), "Lupe", "  maria ");
        assert!(update.ok);
        // Canonical roster casing wins in the pointers and the note.
        assert_eq!(update.current_caregiver, "Maria");
        assert_eq!(update.note_text.as_deref(), Some("Lupe handed off care to Maria."));
    }

    #[test]
    fn handoff_to_the_current_caregiver_is_rejected() {
        let update = handoff(&lupe_and_maria(), "Maria", "maria");
        assert!(!update.ok);
        assert!(update.reason.unwrap().contains("already the current caregiver"));
    }

    #[test]
    fn handoff_to_an_archived_caretaker_is_rejected() {
        let roster = vec![caretaker("Lupe", true, true), caretaker("Maria", false, false)];
        let update = handoff(&roster, "Lupe", "Maria");
        assert!(!update.ok);
        assert!(update.reason.unwrap().contains("archived"));
    }

    #[test]
    fn handoff_to_an_unknown_name_is_rejected() {
        let update = handoff(&lupe_and_maria(), "Lupe", "Nadia");
        assert!(!update.ok);
        assert!(update.reason.unwrap().contains("found"));
    }

    #[test]
    fn handoff_without_anyone_on_duty_is_rejected() {
        let update = handoff(&lupe_and_maria(), "", "Maria");
        assert!(!update.ok);
        assert!(update.reason.unwrap().contains("on duty"));
    }

    #[test]
    fn eligible_targets_excludes_archived_and_current() {
        let roster = vec![
            caretaker("Lupe", true, true),
            caretaker("Maria", false, true),
            caretaker("Ana", false, false),
        ];
        let targets = eligible_targets(&roster, "Lupe");
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].name, "Maria");
    }

    #[test]
    fn no_eligible_targets_when_alone() {
        let roster = vec![caretaker("Lupe", true, true)];
        assert!(eligible_targets(&roster, "Lupe").is_empty());
    }
}
