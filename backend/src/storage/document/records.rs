//! Intermediate serde structs for the YAML documents.
//!
//! Timestamps are stored as RFC 3339 strings; field names are camelCase to
//! match the persisted document shapes. Conversion back to domain models
//! re-parses the timestamps and surfaces bad data as a store error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::{CareNote, Caretaker, DayRecord, NotebookMetadata, Task};
use crate::errors::{NotebookError, Result};

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| NotebookError::Store(format!("bad timestamp {:?}: {}", value, err)))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YamlCaretaker {
    pub id: String,
    pub name: String,
    pub is_primary: bool,
    pub is_active: bool,
}

impl From<&Caretaker> for YamlCaretaker {
    fn from(c: &Caretaker) -> Self {
        YamlCaretaker {
            id: c.id.clone(),
            name: c.name.clone(),
            is_primary: c.is_primary,
            is_active: c.is_active,
        }
    }
}

impl From<YamlCaretaker> for Caretaker {
    fn from(c: YamlCaretaker) -> Self {
        Caretaker {
            id: c.id,
            name: c.name,
            is_primary: c.is_primary,
            is_active: c.is_active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YamlNote {
    pub id: String,
    pub time: String,
    pub note: String,
    pub author: String,
    pub created_at: String,
    pub edited_at: Option<String>,
}

impl From<&CareNote> for YamlNote {
    fn from(n: &CareNote) -> Self {
        YamlNote {
            id: n.id.clone(),
            time: n.time.clone(),
            note: n.note.clone(),
            author: n.author.clone(),
            created_at: n.created_at.to_rfc3339(),
            edited_at: n.edited_at.map(|at| at.to_rfc3339()),
        }
    }
}

impl YamlNote {
    pub fn into_domain(self) -> Result<CareNote> {
        let edited_at = match self.edited_at {
            Some(value) => Some(parse_timestamp(&value)?),
            None => None,
        };
        Ok(CareNote {
            created_at: parse_timestamp(&self.created_at)?,
            id: self.id,
            time: self.time,
            note: self.note,
            author: self.author,
            edited_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YamlTask {
    pub id: String,
    pub text: String,
    pub done: bool,
    pub created_at: String,
}

impl From<&Task> for YamlTask {
    fn from(t: &Task) -> Self {
        YamlTask {
            id: t.id.clone(),
            text: t.text.clone(),
            done: t.done,
            created_at: t.created_at.to_rfc3339(),
        }
    }
}

impl YamlTask {
    pub fn into_domain(self) -> Result<Task> {
        Ok(Task {
            created_at: parse_timestamp(&self.created_at)?,
            id: self.id,
            text: self.text,
            done: self.done,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YamlDay {
    pub date: String,
    pub care_notes: Vec<YamlNote>,
    pub tasks: Vec<YamlTask>,
    pub current_caregiver: String,
    pub last_updated_by: Option<String>,
}

impl From<&DayRecord> for YamlDay {
    fn from(d: &DayRecord) -> Self {
        YamlDay {
            date: d.date.clone(),
            care_notes: d.care_notes.iter().map(YamlNote::from).collect(),
            tasks: d.tasks.iter().map(YamlTask::from).collect(),
            current_caregiver: d.current_caregiver.clone(),
            last_updated_by: d.last_updated_by.clone(),
        }
    }
}

impl YamlDay {
    pub fn into_domain(self) -> Result<DayRecord> {
        let care_notes = self
            .care_notes
            .into_iter()
            .map(YamlNote::into_domain)
            .collect::<Result<Vec<_>>>()?;
        let tasks = self
            .tasks
            .into_iter()
            .map(YamlTask::into_domain)
            .collect::<Result<Vec<_>>>()?;
        Ok(DayRecord {
            date: self.date,
            care_notes,
            tasks,
            current_caregiver: self.current_caregiver,
            last_updated_by: self.last_updated_by,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YamlNotebook {
    pub id: String,
    pub caree_name: String,
    pub created_at: String,
}

impl From<&NotebookMetadata> for YamlNotebook {
    fn from(n: &NotebookMetadata) -> Self {
        YamlNotebook {
            id: n.id.clone(),
            caree_name: n.caree_name.clone(),
            created_at: n.created_at.to_rfc3339(),
        }
    }
}

impl YamlNotebook {
    pub fn into_domain(self) -> Result<NotebookMetadata> {
        Ok(NotebookMetadata {
            created_at: parse_timestamp(&self.created_at)?,
            id: self.id,
            caree_name: self.caree_name,
        })
    }
}

/// Device-local index of known notebooks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YamlIndex {
    #[serde(default)]
    pub known_notebooks: Vec<String>,
    #[serde(default)]
    pub last_used: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_round_trips_through_yaml() {
        let note = CareNote::human("Lupe", "slept well");
        let yaml = serde_yaml::to_string(&YamlNote::from(&note)).unwrap();
        let parsed: YamlNote = serde_yaml::from_str(&yaml).unwrap();
        let back = parsed.into_domain().unwrap();
        assert_eq!(back, note);
    }

    #[test]
    fn bad_timestamps_surface_as_store_errors() {
        let yaml = YamlNote {
            id: "n1".to_string(),
            time: "8:30 AM".to_string(),
            note: "x".to_string(),
            author: "Lupe".to_string(),
            created_at: "yesterday".to_string(),
            edited_at: None,
        };
        assert!(matches!(yaml.into_domain(), Err(NotebookError::Store(_))));
    }

    #[test]
    fn caretaker_documents_use_camel_case_fields() {
        let c = Caretaker {
            id: "caretaker::1::0".to_string(),
            name: "Lupe".to_string(),
            is_primary: true,
            is_active: true,
        };
        let yaml = serde_yaml::to_string(&YamlCaretaker::from(&c)).unwrap();
        assert!(yaml.contains("isPrimary"));
        assert!(yaml.contains("isActive"));
    }
}
