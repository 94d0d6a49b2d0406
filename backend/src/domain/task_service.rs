use std::sync::Arc;

use log::info;

use crate::domain::commands::tasks::{
    CreateTaskCommand, DeleteTaskCommand, TaskResult, ToggleTaskCommand, UpdateTaskCommand,
};
use crate::domain::day;
use crate::domain::models::Task;
use crate::errors::{NotebookError, Result};
use crate::storage::traits::Store;

/// Service for the task list on today's record. Plain CRUD; the only guard
/// is a non-empty description.
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn Store>,
}

impl TaskService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    fn require_notebook(&self, notebook_id: &str) -> Result<()> {
        self.store
            .get_notebook(notebook_id)?
            .map(|_| ())
            .ok_or_else(|| NotebookError::not_found(format!("notebook {}", notebook_id)))
    }

    pub fn add_task(&self, notebook_id: &str, command: CreateTaskCommand) -> Result<TaskResult> {
        self.require_notebook(notebook_id)?;
        let text = command.text.trim();
        if text.is_empty() {
            return Err(NotebookError::validation("Tasks cannot be empty."));
        }

        info!("Adding task to notebook {}", notebook_id);
        let mut today = day::load_or_seed_today(self.store.as_ref(), notebook_id)?;
        let task = Task::new(text);
        today.tasks.push(task.clone());
        self.store.put_day(notebook_id, &today)?;
        Ok(TaskResult { task })
    }

    pub fn update_task(&self, notebook_id: &str, command: UpdateTaskCommand) -> Result<TaskResult> {
        self.require_notebook(notebook_id)?;
        let text = command.text.trim();
        if text.is_empty() {
            return Err(NotebookError::validation("Tasks cannot be empty."));
        }

        let mut today = day::load_or_seed_today(self.store.as_ref(), notebook_id)?;
        let idx = today
            .find_task(&command.task_id)
            .ok_or_else(|| NotebookError::not_found(format!("task {}", command.task_id)))?;
        today.tasks[idx].text = text.to_string();
        let task = today.tasks[idx].clone();
        self.store.put_day(notebook_id, &today)?;
        Ok(TaskResult { task })
    }

    pub fn delete_task(&self, notebook_id: &str, command: DeleteTaskCommand) -> Result<()> {
        self.require_notebook(notebook_id)?;
        let mut today = day::load_or_seed_today(self.store.as_ref(), notebook_id)?;
        let idx = today
            .find_task(&command.task_id)
            .ok_or_else(|| NotebookError::not_found(format!("task {}", command.task_id)))?;
        info!("Deleting task {} from notebook {}", command.task_id, notebook_id);
        today.tasks.remove(idx);
        self.store.put_day(notebook_id, &today)
    }

    pub fn toggle_task(&self, notebook_id: &str, command: ToggleTaskCommand) -> Result<TaskResult> {
        self.require_notebook(notebook_id)?;
        let mut today = day::load_or_seed_today(self.store.as_ref(), notebook_id)?;
        let idx = today
            .find_task(&command.task_id)
            .ok_or_else(|| NotebookError::not_found(format!("task {}", command.task_id)))?;
        today.tasks[idx].done = !today.tasks[idx].done;
        let task = today.tasks[idx].clone();
        self.store.put_day(notebook_id, &today)?;
        Ok(TaskResult { task })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStore;
    use crate::storage::traits::NotebookStorage;

    fn setup() -> (TaskService, String) {
        let store = Arc::new(MemoryStore::new());
        let notebook = store.create_notebook("Abuela").unwrap();
        (TaskService::new(store), notebook.id)
    }

    #[test]
    fn tasks_start_not_done_and_toggle_round_trips() {
        let (service, id) = setup();
        let task = service
            .add_task(&id, CreateTaskCommand { text: "refill prescription".to_string() })
            .unwrap()
            .task;
        assert!(!task.done);

        let toggled = service
            .toggle_task(&id, ToggleTaskCommand { task_id: task.id.clone() })
            .unwrap()
            .task;
        assert!(toggled.done);

        let toggled_back = service
            .toggle_task(&id, ToggleTaskCommand { task_id: task.id })
            .unwrap()
            .task;
        assert!(!toggled_back.done);
    }

    #[test]
    fn update_changes_the_text() {
        let (service, id) = setup();
        let task = service
            .add_task(&id, CreateTaskCommand { text: "walk".to_string() })
            .unwrap()
            .task;
        let updated = service
            .update_task(
                &id,
                UpdateTaskCommand { task_id: task.id, text: "walk in the morning".to_string() },
            )
            .unwrap()
            .task;
        assert_eq!(updated.text, "walk in the morning");
    }

    #[test]
    fn blank_tasks_are_rejected() {
        let (service, id) = setup();
        let err = service
            .add_task(&id, CreateTaskCommand { text: "  ".to_string() })
            .unwrap_err();
        assert!(matches!(err, NotebookError::Validation(_)));
    }

    #[test]
    fn missing_tasks_are_not_found() {
        let (service, id) = setup();
        let err = service
            .delete_task(&id, DeleteTaskCommand { task_id: "missing".to_string() })
            .unwrap_err();
        assert!(matches!(err, NotebookError::NotFound(_)));
    }
}
