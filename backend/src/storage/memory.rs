//! In-memory store.
//!
//! Backs the domain services in tests and local single-process use. Data
//! lives behind one mutex; nothing survives the process. Tests can inject
//! a failure for the next storage call to exercise the error policies.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::models::{Caretaker, DayRecord, NotebookMetadata};
use crate::errors::Result;
use crate::storage::traits::{CaretakerStorage, DayStorage, NotebookStorage};

#[derive(Default)]
struct MemoryInner {
    notebooks: HashMap<String, NotebookMetadata>,
    rosters: HashMap<String, Vec<Caretaker>>,
    /// notebook id -> date key -> day record
    days: HashMap<String, BTreeMap<String, DayRecord>>,
    known: Vec<String>,
    last_used: Option<String>,
}

pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
    #[cfg(test)]
    fail_next: Mutex<Option<crate::errors::NotebookError>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            inner: Mutex::new(MemoryInner::default()),
            #[cfg(test)]
            fail_next: Mutex::new(None),
        }
    }

    /// Make the next storage call fail with `err`.
    #[cfg(test)]
    pub fn fail_next_with(&self, err: crate::errors::NotebookError) {
        *self.fail_next.lock().unwrap() = Some(err);
    }

    fn take_injected_failure(&self) -> Result<()> {
        #[cfg(test)]
        if let Some(err) = self.fail_next.lock().unwrap().take() {
            return Err(err);
        }
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CaretakerStorage for MemoryStore {
    fn list_caretakers(&self, notebook_id: &str) -> Result<Vec<Caretaker>> {
        self.take_injected_failure()?;
        let inner = self.inner.lock().unwrap();
        Ok(inner.rosters.get(notebook_id).cloned().unwrap_or_default())
    }

    fn save_caretakers(&self, notebook_id: &str, roster: &[Caretaker]) -> Result<Vec<Caretaker>> {
        self.take_injected_failure()?;
        let saved = assign_canonical_ids(roster);
        let mut inner = self.inner.lock().unwrap();
        inner.rosters.insert(notebook_id.to_string(), saved.clone());
        Ok(saved)
    }
}

impl DayStorage for MemoryStore {
    fn get_day(&self, notebook_id: &str, date_key: &str) -> Result<Option<DayRecord>> {
        self.take_injected_failure()?;
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .days
            .get(notebook_id)
            .and_then(|days| days.get(date_key))
            .cloned())
    }

    fn put_day(&self, notebook_id: &str, day: &DayRecord) -> Result<()> {
        self.take_injected_failure()?;
        let mut inner = self.inner.lock().unwrap();
        inner
            .days
            .entry(notebook_id.to_string())
            .or_default()
            .insert(day.date.clone(), day.clone());
        Ok(())
    }

    fn latest_day_before(&self, notebook_id: &str, date_key: &str) -> Result<Option<DayRecord>> {
        self.take_injected_failure()?;
        let inner = self.inner.lock().unwrap();
        Ok(inner.days.get(notebook_id).and_then(|days| {
            days.range(..date_key.to_string())
                .next_back()
                .map(|(_, day)| day.clone())
        }))
    }

    fn list_days(&self, notebook_id: &str) -> Result<Vec<DayRecord>> {
        self.take_injected_failure()?;
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .days
            .get(notebook_id)
            .map(|days| days.values().cloned().collect())
            .unwrap_or_default())
    }
}

impl NotebookStorage for MemoryStore {
    fn create_notebook(&self, caree_name: &str) -> Result<NotebookMetadata> {
        self.take_injected_failure()?;
        let notebook = NotebookMetadata {
            id: Uuid::new_v4().to_string(),
            caree_name: caree_name.to_string(),
            created_at: Utc::now(),
        };
        let mut inner = self.inner.lock().unwrap();
        inner.notebooks.insert(notebook.id.clone(), notebook.clone());
        Ok(notebook)
    }

    fn get_notebook(&self, notebook_id: &str) -> Result<Option<NotebookMetadata>> {
        self.take_injected_failure()?;
        let inner = self.inner.lock().unwrap();
        Ok(inner.notebooks.get(notebook_id).cloned())
    }

    fn remember_notebook(&self, notebook_id: &str) -> Result<()> {
        self.take_injected_failure()?;
        let mut inner = self.inner.lock().unwrap();
        if !inner.known.iter().any(|id| id == notebook_id) {
            inner.known.push(notebook_id.to_string());
        }
        inner.last_used = Some(notebook_id.to_string());
        Ok(())
    }

    fn known_notebooks(&self) -> Result<Vec<String>> {
        self.take_injected_failure()?;
        Ok(self.inner.lock().unwrap().known.clone())
    }

    fn last_used(&self) -> Result<Option<String>> {
        self.take_injected_failure()?;
        Ok(self.inner.lock().unwrap().last_used.clone())
    }
}

/// Replace temporary client-side ids with canonical store-issued ones.
pub(crate) fn assign_canonical_ids(roster: &[Caretaker]) -> Vec<Caretaker> {
    let now = Utc::now().timestamp_millis();
    let mut saved = roster.to_vec();
    for (seq, caretaker) in saved.iter_mut().enumerate() {
        if caretaker.has_temp_id() {
            caretaker.id = Caretaker::generate_id(now, seq);
        }
    }
    saved
}
