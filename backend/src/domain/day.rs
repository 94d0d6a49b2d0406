//! Day-record access shared by the services.

use log::debug;

use crate::domain::dates;
use crate::domain::models::{CareNote, DayRecord};
use crate::errors::Result;
use crate::storage::traits::Store;

/// Load today's record, seeding a fresh one when the date has rolled over.
/// A seeded record carries the caregiver pointers forward from the most
/// recent prior day and is not persisted until something writes to it.
pub fn load_or_seed_today(store: &dyn Store, notebook_id: &str) -> Result<DayRecord> {
    let key = dates::today_key();
    if let Some(day) = store.get_day(notebook_id, &key)? {
        return Ok(day);
    }
    let seeded = match store.latest_day_before(notebook_id, &key)? {
        Some(prev) => {
            debug!("Seeding {} from {} for notebook {}", key, prev.date, notebook_id);
            DayRecord::carried_from(key, &prev)
        }
        None => DayRecord::empty(key),
    };
    Ok(seeded)
}

/// Append a System note describing a roster event to today's record.
pub fn append_system_note(store: &dyn Store, notebook_id: &str, text: &str) -> Result<()> {
    let mut today = load_or_seed_today(store, notebook_id)?;
    today.care_notes.push(CareNote::system(text));
    store.put_day(notebook_id, &today)
}
