use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::category::CategoryState;
use super::task::Task;

/// Root aggregate persisted as a single JSON document.
///
/// Dates with no data are absent keys, never empty placeholders. The maps
/// are ordered so that loading and immediately saving reproduces the
/// document byte for byte.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default)]
    pub tasks_by_date: BTreeMap<String, Vec<Task>>,
    #[serde(default)]
    pub categories_by_date: BTreeMap<String, CategoryState>,
}

impl AppState {
    /// Tasks for one date; an unknown date reads as an empty list.
    pub fn tasks_for(&self, date: &str) -> &[Task] {
        self.tasks_by_date.get(date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Habit flags for one date; an unknown date reads as all-false.
    pub fn categories_for(&self, date: &str) -> CategoryState {
        self.categories_by_date.get(date).copied().unwrap_or_default()
    }
}
