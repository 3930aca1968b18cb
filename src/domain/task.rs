use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock;

/// One scheduled activity on one calendar date.
///
/// `actualEndTime` and `durationSeconds` travel together: the duration is
/// derived from the start and actual end and exists exactly when the
/// actual end does. Callers never set the duration directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub start_time: String,
    pub approx_end_time: String,
    pub description: String,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,
}

/// Fields accepted when creating a task.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub start_time: String,
    pub approx_end_time: String,
    pub description: String,
}

/// A partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    pub start_time: Option<String>,
    pub approx_end_time: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub actual_end_time: Option<String>,
}

impl Task {
    /// Create an incomplete task with a fresh id.
    pub fn new(start_time: String, approx_end_time: String, description: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            start_time,
            approx_end_time,
            description,
            completed: false,
            actual_end_time: None,
            duration_seconds: None,
        }
    }

    /// Mark completed, recording an end time.
    ///
    /// Uses the explicit end time when one is given, then any end time
    /// already on the task, then the current wall clock.
    pub fn complete(&mut self, explicit_end: Option<String>) {
        let end = explicit_end
            .filter(|e| !e.is_empty())
            .or_else(|| self.actual_end_time.clone())
            .unwrap_or_else(clock::now_hms);
        self.completed = true;
        self.actual_end_time = Some(end);
        self.refresh_duration();
    }

    /// Revert to incomplete. The recorded end time and duration do not
    /// survive un-completion.
    pub fn uncomplete(&mut self) {
        self.completed = false;
        self.actual_end_time = None;
        self.duration_seconds = None;
    }

    /// Set or clear the recorded end time without touching `completed`.
    ///
    /// An empty value clears both the end time and the derived duration.
    pub fn set_actual_end_time(&mut self, end: &str) {
        if end.is_empty() {
            self.actual_end_time = None;
        } else {
            self.actual_end_time = Some(end.to_string());
        }
        self.refresh_duration();
    }

    /// Apply a partial update, maintaining the derived pair.
    ///
    /// The `completed` branch runs before the `actualEndTime` branch, so
    /// an explicit end time in the same patch wins as the stored value.
    pub fn apply_patch(&mut self, patch: &TaskPatch) {
        if let Some(start) = &patch.start_time {
            self.start_time = start.clone();
        }
        if let Some(approx) = &patch.approx_end_time {
            self.approx_end_time = approx.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(completed) = patch.completed {
            if completed {
                self.complete(patch.actual_end_time.clone());
            } else {
                self.uncomplete();
            }
        }
        if let Some(end) = &patch.actual_end_time {
            self.set_actual_end_time(end);
        }
        self.refresh_duration();
    }

    /// Recompute `durationSeconds` from the stored start and actual end,
    /// or clear it when no end is recorded. Every mutation path funnels
    /// through here so the pair cannot drift apart.
    fn refresh_duration(&mut self) {
        self.duration_seconds = self
            .actual_end_time
            .as_ref()
            .map(|end| clock::compute_duration_seconds(&self.start_time, end));
    }
}

/// Sort a date's task list ascending by start time.
///
/// The zero-padded "HH:MM[:SS]" format makes the lexicographic order
/// chronological; the sort is stable so equal starts keep insertion order.
pub fn sort_by_start(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| a.start_time.cmp(&b.start_time));
}
