use crate::clock;
use crate::domain::Task;

/// Punctuality of a recorded end relative to the approximate end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Punctuality {
    Early,
    OnTime,
    Late,
}

impl Punctuality {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Early => "▼",
            Self::OnTime => "●",
            Self::Late => "▲",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Early => "early",
            Self::OnTime => "on time",
            Self::Late => "late",
        }
    }
}

/// Classify a task's recorded end against its approximate end.
///
/// Returns the class and the signed delta in seconds, or `None` while no
/// actual end time is recorded.
pub fn punctuality(task: &Task) -> Option<(Punctuality, i64)> {
    let actual = task.actual_end_time.as_deref()?;
    let delta = clock::compute_delta_from_approx(&task.approx_end_time, actual);
    let class = if delta > 0 {
        Punctuality::Late
    } else if delta < 0 {
        Punctuality::Early
    } else {
        Punctuality::OnTime
    };
    Some((class, delta))
}

/// Aggregate statistics for one day's task list.
#[derive(Debug, Default, PartialEq)]
pub struct DayStats {
    pub total: usize,
    pub completed: usize,
    /// Tasks with a recorded end time, completed or not.
    pub measured: usize,
    pub early: usize,
    pub on_time: usize,
    pub late: usize,
    pub tracked_seconds: u64,
    pub delta_sum: i64,
}

impl DayStats {
    pub fn completion_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64 * 100.0
    }

    /// Mean signed delta over tasks with a recorded end.
    pub fn mean_delta(&self) -> Option<i64> {
        if self.measured == 0 {
            return None;
        }
        Some(self.delta_sum / self.measured as i64)
    }
}

/// Compute day statistics from a task list.
pub fn day_stats(tasks: &[Task]) -> DayStats {
    let mut stats = DayStats {
        total: tasks.len(),
        ..Default::default()
    };

    for task in tasks {
        if task.completed {
            stats.completed += 1;
        }
        if let Some(duration) = task.duration_seconds {
            stats.tracked_seconds += u64::from(duration);
        }
        if let Some((class, delta)) = punctuality(task) {
            stats.measured += 1;
            stats.delta_sum += delta;
            match class {
                Punctuality::Early => stats.early += 1,
                Punctuality::OnTime => stats.on_time += 1,
                Punctuality::Late => stats.late += 1,
            }
        }
    }

    stats
}
