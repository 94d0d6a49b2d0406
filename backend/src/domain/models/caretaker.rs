use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix of the client-side placeholder id assigned by the pure layer.
/// Replaced with a store-issued canonical id on first save.
pub const TEMP_ID_PREFIX: &str = "tmp-";

/// One person registered in a notebook's roster. Caretakers are archived
/// (`is_active = false`), never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caretaker {
    pub id: String,
    /// Display name; matched case-insensitively for uniqueness and lookup
    pub name: String,
    /// At most one entry per roster holds this
    pub is_primary: bool,
    pub is_active: bool,
}

impl Caretaker {
    /// New active roster entry with a temporary id.
    pub fn new(name: impl Into<String>, is_primary: bool) -> Self {
        Caretaker {
            id: format!("{}{}", TEMP_ID_PREFIX, Uuid::new_v4()),
            name: name.into(),
            is_primary,
            is_active: true,
        }
    }

    /// Whether the id is still the client-side placeholder.
    pub fn has_temp_id(&self) -> bool {
        self.id.starts_with(TEMP_ID_PREFIX)
    }

    /// Canonical id in the form `caretaker::<epoch_millis>::<seq>`.
    pub fn generate_id(timestamp_millis: i64, seq: usize) -> String {
        format!("caretaker::{}::{}", timestamp_millis, seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_caretaker_is_active_with_temp_id() {
        let c = Caretaker::new("Lupe", true);
        assert!(c.is_active);
        assert!(c.is_primary);
        assert!(c.has_temp_id());
    }

    #[test]
    fn canonical_ids_are_not_temporary() {
        let c = Caretaker {
            id: Caretaker::generate_id(1_700_000_000_000, 0),
            name: "Lupe".to_string(),
            is_primary: false,
            is_active: true,
        };
        assert!(!c.has_temp_id());
        assert_eq!(c.id, "caretaker::1700000000000::0");
    }
}
