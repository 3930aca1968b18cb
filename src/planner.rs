//! Load-modify-save operations over the stored planner state.
//!
//! Every operation reloads the document, applies one logical change and
//! saves the whole document back; the store serializes those sequences.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::domain::{sort_by_start, CategoryKey, CategoryState, NewTask, Task, TaskPatch};
use crate::persistence::{StateStore, StoreError};

/// Failures surfaced by planner operations.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Caller input failed a precondition.
    #[error("{0}")]
    Validation(String),

    /// No task with the given id exists for the date.
    #[error("task {id} not found for {date}")]
    NotFound { date: String, id: String },

    /// The durable state could not be read or written.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

fn not_found(date: &str, id: &str) -> PlannerError {
    PlannerError::NotFound {
        date: date.to_string(),
        id: id.to_string(),
    }
}

/// Result of a category toggle: the date plus the full four-flag record,
/// so a caller always has the complete current state.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryUpdate {
    #[serde(rename = "dateISO")]
    pub date_iso: String,
    pub categories: CategoryState,
}

/// The planner engine: stateless operations over state loaded from the
/// store.
pub struct Planner {
    store: StateStore,
}

impl Planner {
    pub fn new(store: StateStore) -> Self {
        Self { store }
    }

    /// Tasks for one date in start-time order; empty when absent.
    pub fn tasks_for(&self, date: &str) -> Result<Vec<Task>, PlannerError> {
        let state = self.store.load()?;
        Ok(state.tasks_by_date.get(date).cloned().unwrap_or_default())
    }

    /// The full date-to-tasks mapping.
    pub fn all_tasks(&self) -> Result<BTreeMap<String, Vec<Task>>, PlannerError> {
        Ok(self.store.load()?.tasks_by_date)
    }

    /// Create a task on a date, keeping the date's list sorted by start
    /// time. The description is trimmed and must be non-empty.
    pub fn create_task(&self, date: &str, new_task: NewTask) -> Result<Task, PlannerError> {
        let description = new_task.description.trim().to_string();
        if description.is_empty() {
            return Err(PlannerError::Validation("description required".into()));
        }
        let task = Task::new(new_task.start_time, new_task.approx_end_time, description);
        self.store.update(|state| {
            let list = state.tasks_by_date.entry(date.to_string()).or_default();
            list.push(task.clone());
            sort_by_start(list);
            Ok(task)
        })
    }

    /// Apply a partial update to one task and re-sort its date's list.
    pub fn update_task(&self, date: &str, id: &str, patch: TaskPatch) -> Result<Task, PlannerError> {
        self.store.update(|state| {
            let list = state
                .tasks_by_date
                .get_mut(date)
                .ok_or_else(|| not_found(date, id))?;
            let idx = list
                .iter()
                .position(|t| t.id == id)
                .ok_or_else(|| not_found(date, id))?;
            list[idx].apply_patch(&patch);
            let updated = list[idx].clone();
            sort_by_start(list);
            Ok(updated)
        })
    }

    /// Remove one task. `NotFound` when the id is absent, in which case
    /// the stored document is left untouched.
    pub fn delete_task(&self, date: &str, id: &str) -> Result<(), PlannerError> {
        self.store.update(|state| {
            let list = state
                .tasks_by_date
                .get_mut(date)
                .ok_or_else(|| not_found(date, id))?;
            let before = list.len();
            list.retain(|t| t.id != id);
            if list.len() == before {
                return Err(not_found(date, id));
            }
            Ok(())
        })
    }

    /// Habit flags for a date; all-false when absent.
    pub fn categories_for(&self, date: &str) -> Result<CategoryState, PlannerError> {
        let state = self.store.load()?;
        Ok(state.categories_for(date))
    }

    /// Set one habit flag for a date, returning the full updated record.
    pub fn update_category(
        &self,
        date: &str,
        key: CategoryKey,
        value: bool,
    ) -> Result<CategoryUpdate, PlannerError> {
        self.store.update(|state| {
            let record = state.categories_by_date.entry(date.to_string()).or_default();
            record.set(key, value);
            Ok(CategoryUpdate {
                date_iso: date.to_string(),
                categories: *record,
            })
        })
    }
}
