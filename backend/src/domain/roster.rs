//! Roster invariant engine.
//!
//! Pure validation-and-mutation functions over a caretaker roster. Every
//! mutator returns a full replacement roster plus a verdict; a rejection
//! carries a human-readable reason and leaves the roster unchanged, so
//! callers can apply the result optimistically and roll back wholesale on
//! persistence failure. These functions are the single authoritative
//! implementation of each guard; the service layer calls them rather than
//! re-deriving the checks.
//!
//! Name matching is case-insensitive throughout (add, lookup, archive,
//! restore, rename, handoff) and names are compared after trimming.

use crate::domain::models::Caretaker;

/// Result of a roster mutation: the proposed replacement roster and a
/// verdict. `ok = true` with an unchanged roster is a successful no-op.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterUpdate {
    pub roster: Vec<Caretaker>,
    pub ok: bool,
    pub reason: Option<String>,
}

impl RosterUpdate {
    fn accepted(roster: Vec<Caretaker>) -> Self {
        RosterUpdate { roster, ok: true, reason: None }
    }

    fn rejected(roster: Vec<Caretaker>, reason: impl Into<String>) -> Self {
        RosterUpdate {
            roster,
            ok: false,
            reason: Some(reason.into()),
        }
    }
}

/// Case-insensitive, whitespace-trimmed name comparison.
pub fn name_eq(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Index of the caretaker matching `name`, if any.
pub fn find(roster: &[Caretaker], name: &str) -> Option<usize> {
    roster.iter().position(|c| name_eq(&c.name, name))
}

/// Add a new active caretaker. The first entry into an empty roster becomes
/// the primary contact. Rejects a blank name or a case-insensitive
/// duplicate.
pub fn add(roster: &[Caretaker], name: &str) -> RosterUpdate {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return RosterUpdate::rejected(roster.to_vec(), "Caretaker name cannot be empty.");
    }
    if find(roster, trimmed).is_some() {
        return RosterUpdate::rejected(
            roster.to_vec(),
            format!("A caretaker named {} already exists.", trimmed),
        );
    }

    let is_primary = roster.is_empty();
    let mut next = roster.to_vec();
    next.push(Caretaker::new(trimmed, is_primary));
    RosterUpdate::accepted(next)
}

/// Make `name` the primary contact. Clears `is_primary` on every entry and
/// sets it only on the match, so the at-most-one invariant holds regardless
/// of the input roster. An archived caretaker cannot become primary.
pub fn set_primary(roster: &[Caretaker], name: &str) -> RosterUpdate {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return RosterUpdate::rejected(roster.to_vec(), "Caretaker name cannot be empty.");
    }
    let idx = match find(roster, trimmed) {
        Some(idx) => idx,
        None => {
            return RosterUpdate::rejected(
                roster.to_vec(),
                format!("No caretaker named {} was found.", trimmed),
            )
        }
    };
    if !roster[idx].is_active {
        return RosterUpdate::rejected(
            roster.to_vec(),
            format!("{} is archived and cannot be the primary contact.", roster[idx].name),
        );
    }
    if roster[idx].is_primary {
        return RosterUpdate::accepted(roster.to_vec());
    }

    let mut next = roster.to_vec();
    for (i, c) in next.iter_mut().enumerate() {
        c.is_primary = i == idx;
    }
    RosterUpdate::accepted(next)
}

/// Archive `name`. The primary contact must be demoted first, and the
/// person currently on duty cannot be archived. `is_primary` is left
/// untouched; the guard ordering means an archived-primary state is not
/// reachable through this call.
pub fn archive(roster: &[Caretaker], name: &str, current_caregiver: &str) -> RosterUpdate {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return RosterUpdate::rejected(roster.to_vec(), "Caretaker name cannot be empty.");
    }
    let idx = match find(roster, trimmed) {
        Some(idx) => idx,
        None => {
            return RosterUpdate::rejected(
                roster.to_vec(),
                format!("No caretaker named {} was found.", trimmed),
            )
        }
    };
    if name_eq(&roster[idx].name, current_caregiver) {
        return RosterUpdate::rejected(
            roster.to_vec(),
            format!("{} is the current caregiver and cannot be archived.", roster[idx].name),
        );
    }
    if roster[idx].is_primary {
        return RosterUpdate::rejected(
            roster.to_vec(),
            format!(
                "{} is the primary contact. Choose a new primary contact before archiving.",
                roster[idx].name
            ),
        );
    }
    if !roster[idx].is_active {
        return RosterUpdate::accepted(roster.to_vec());
    }

    let mut next = roster.to_vec();
    next[idx].is_active = false;
    RosterUpdate::accepted(next)
}

/// Restore an archived caretaker. Does not touch `is_primary`.
pub fn restore(roster: &[Caretaker], name: &str) -> RosterUpdate {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return RosterUpdate::rejected(roster.to_vec(), "Caretaker name cannot be empty.");
    }
    let idx = match find(roster, trimmed) {
        Some(idx) => idx,
        None => {
            return RosterUpdate::rejected(
                roster.to_vec(),
                format!("No caretaker named {} was found.", trimmed),
            )
        }
    };
    if roster[idx].is_active {
        return RosterUpdate::accepted(roster.to_vec());
    }

    let mut next = roster.to_vec();
    next[idx].is_active = true;
    RosterUpdate::accepted(next)
}

/// Rename `name` to `new_name`, keeping flags and id. Rejects a blank new
/// name and a case-insensitive collision with any other entry.
pub fn rename(roster: &[Caretaker], name: &str, new_name: &str) -> RosterUpdate {
    let trimmed = name.trim();
    let new_trimmed = new_name.trim();
    if trimmed.is_empty() || new_trimmed.is_empty() {
        return RosterUpdate::rejected(roster.to_vec(), "Caretaker name cannot be empty.");
    }
    let idx = match find(roster, trimmed) {
        Some(idx) => idx,
        None => {
            return RosterUpdate::rejected(
                roster.to_vec(),
                format!("No caretaker named {} was found.", trimmed),
            )
        }
    };
    let collision = roster
        .iter()
        .enumerate()
        .any(|(i, c)| i != idx && name_eq(&c.name, new_trimmed));
    if collision {
        return RosterUpdate::rejected(
            roster.to_vec(),
            format!("A caretaker named {} already exists.", new_trimmed),
        );
    }
    if roster[idx].name == new_trimmed {
        return RosterUpdate::accepted(roster.to_vec());
    }

    let mut next = roster.to_vec();
    next[idx].name = new_trimmed.to_string();
    RosterUpdate::accepted(next)
}

/// Repair pass run on every roster load. The roster can be mutated outside
/// the guarded API (direct store edits, migrations), so the invariants must
/// be restorable on read, not just enforced on write.
///
/// - zero active entries: force-activate the current caregiver, if present
/// - zero primaries: promote the current caregiver when active, else the
///   first active entry
/// - multiple primaries: keep the first, demote the rest
///
/// Returns the repaired roster and whether anything changed.
pub fn self_heal(roster: &[Caretaker], current_caregiver: &str) -> (Vec<Caretaker>, bool) {
    let mut next = roster.to_vec();
    let mut changed = false;
    if next.is_empty() {
        return (next, changed);
    }

    if !next.iter().any(|c| c.is_active) {
        if let Some(idx) = find(&next, current_caregiver) {
            next[idx].is_active = true;
            changed = true;
        }
    }

    let primaries = next.iter().filter(|c| c.is_primary).count();
    if primaries == 0 {
        let promote = find(&next, current_caregiver)
            .filter(|&idx| next[idx].is_active)
            .or_else(|| next.iter().position(|c| c.is_active));
        if let Some(idx) = promote {
            next[idx].is_primary = true;
            changed = true;
        }
    } else if primaries > 1 {
        let mut kept = false;
        for c in next.iter_mut() {
            if c.is_primary {
                if kept {
                    c.is_primary = false;
                    changed = true;
                } else {
                    kept = true;
                }
            }
        }
    }

    (next, changed)
}
