use std::fs;
use std::sync::Arc;

use log::warn;

use super::connection::DocumentConnection;
use super::records::YamlDay;
use crate::domain::models::DayRecord;
use crate::errors::Result;

/// File-backed day records: one `days/{YYYY-MM-DD}.yaml` per notebook per
/// date. Date keys sort lexicographically in chronological order, so the
/// file stems double as the ordering.
#[derive(Clone)]
pub struct DayRepository {
    connection: Arc<DocumentConnection>,
}

impl DayRepository {
    pub fn new(connection: Arc<DocumentConnection>) -> Self {
        Self { connection }
    }

    pub fn get(&self, notebook_id: &str, date_key: &str) -> Result<Option<DayRecord>> {
        let path = self.connection.day_path(notebook_id, date_key);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)?;
        let record: YamlDay = serde_yaml::from_str(&contents)?;
        Ok(Some(record.into_domain()?))
    }

    pub fn put(&self, notebook_id: &str, day: &DayRecord) -> Result<()> {
        let contents = serde_yaml::to_string(&YamlDay::from(day))?;
        self.connection
            .write_document(&self.connection.day_path(notebook_id, &day.date), &contents)
    }

    pub fn latest_before(&self, notebook_id: &str, date_key: &str) -> Result<Option<DayRecord>> {
        let latest = self
            .date_keys(notebook_id)?
            .into_iter()
            .filter(|key| key.as_str() < date_key)
            .next_back();
        match latest {
            Some(key) => self.get(notebook_id, &key),
            None => Ok(None),
        }
    }

    pub fn list(&self, notebook_id: &str) -> Result<Vec<DayRecord>> {
        let mut days = Vec::new();
        for key in self.date_keys(notebook_id)? {
            if let Some(day) = self.get(notebook_id, &key)? {
                days.push(day);
            }
        }
        Ok(days)
    }

    /// Stored date keys, oldest first, discovered from the filesystem.
    fn date_keys(&self, notebook_id: &str) -> Result<Vec<String>> {
        let dir = self.connection.days_directory(notebook_id);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut keys = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
                continue;
            }
            match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => keys.push(stem.to_string()),
                None => warn!("Skipping day file with unreadable name: {:?}", path),
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{CareNote, Task};
    use tempfile::TempDir;

    fn setup() -> (DayRepository, TempDir) {
        let dir = TempDir::new().unwrap();
        let conn = Arc::new(DocumentConnection::new(dir.path()).unwrap());
        (DayRepository::new(conn), dir)
    }

    fn day_with_content(date: &str) -> DayRecord {
        let mut day = DayRecord::empty(date);
        day.current_caregiver = "Lupe".to_string();
        day.last_updated_by = Some("Maria".to_string());
        day.care_notes.push(CareNote::human("Lupe", "slept well"));
        day.tasks.push(Task::new("refill prescription"));
        day
    }

    #[test]
    fn day_records_round_trip() {
        let (repo, _dir) = setup();
        let day = day_with_content("2026-03-05");
        repo.put("nb1", &day).unwrap();

        let loaded = repo.get("nb1", "2026-03-05").unwrap().unwrap();
        assert_eq!(loaded, day);
    }

    #[test]
    fn missing_days_read_as_none() {
        let (repo, _dir) = setup();
        assert!(repo.get("nb1", "2026-03-05").unwrap().is_none());
    }

    #[test]
    fn latest_before_and_list_use_date_order() {
        let (repo, _dir) = setup();
        repo.put("nb1", &day_with_content("2026-02-28")).unwrap();
        repo.put("nb1", &day_with_content("2026-03-04")).unwrap();
        repo.put("nb1", &day_with_content("2026-03-05")).unwrap();

        let prev = repo.latest_before("nb1", "2026-03-05").unwrap().unwrap();
        assert_eq!(prev.date, "2026-03-04");

        let dates: Vec<String> = repo.list("nb1").unwrap().into_iter().map(|d| d.date).collect();
        assert_eq!(dates, vec!["2026-02-28", "2026-03-04", "2026-03-05"]);
    }
}
