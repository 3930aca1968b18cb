use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::PathBuf;

use crate::clock;
use crate::domain::{CategoryState, Task};
use crate::persistence::{self, StateStore};
use crate::report::stats::{day_stats, punctuality};

fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Generate a daily report for the given date and return the output path.
pub fn generate_report(
    store: &StateStore,
    date: NaiveDate,
    output_path: Option<PathBuf>,
) -> Result<PathBuf> {
    let date_iso = date.format("%Y-%m-%d").to_string();
    let state = store.load().context("Failed to load planner state")?;
    let report = render_report(&date_iso, state.tasks_for(&date_iso), &state.categories_for(&date_iso));

    let path = match output_path {
        Some(path) => path,
        None => persistence::report_file(date)?,
    };
    persistence::atomic_write(&path, &report)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;

    Ok(path)
}

/// Render the markdown report for one day.
pub fn render_report(date_iso: &str, tasks: &[Task], categories: &CategoryState) -> String {
    let stats = day_stats(tasks);
    let mut report = String::new();

    report.push_str(&format!("# Daily Report - {}\n\n", date_iso));

    report.push_str("## Summary\n\n");
    report.push_str(&format!(
        "- **Tasks:** {} ({} completed)\n",
        stats.total, stats.completed
    ));
    report.push_str(&format!(
        "- **Completion Rate:** {}\n",
        format_percent(stats.completion_percent())
    ));
    report.push_str(&format!(
        "- **Tracked Time:** {}\n",
        clock::format_duration_human(stats.tracked_seconds as i64)
    ));
    report.push_str(&format!(
        "- **Punctuality:** {} early, {} on time, {} late\n",
        stats.early, stats.on_time, stats.late
    ));
    if let Some(mean) = stats.mean_delta() {
        let direction = if mean > 0 {
            " late"
        } else if mean < 0 {
            " early"
        } else {
            ""
        };
        report.push_str(&format!(
            "- **Mean Delta:** {}{}\n",
            clock::format_duration_human(mean.abs()),
            direction
        ));
    }
    report.push('\n');

    report.push_str("## Tasks\n\n");
    if tasks.is_empty() {
        report.push_str("No tasks recorded.\n");
    } else {
        for task in tasks {
            let mut line = format!(
                "- {} {} - {}",
                checkbox(task.completed),
                clock::format_time_12h(&task.start_time),
                task.description
            );
            if let Some(duration) = task.duration_seconds {
                line.push_str(&format!(" ({}", clock::format_duration_human(i64::from(duration))));
                if let Some((class, delta)) = punctuality(task) {
                    if delta == 0 {
                        line.push_str(&format!(", {} {}", class.symbol(), class.label()));
                    } else {
                        line.push_str(&format!(
                            ", {} {} {}",
                            class.symbol(),
                            clock::format_duration_human(delta.abs()),
                            class.label()
                        ));
                    }
                }
                line.push(')');
            }
            line.push('\n');
            report.push_str(&line);
        }
    }
    report.push('\n');

    report.push_str("## Habits\n\n");
    report.push_str(&format!("- {} Water\n", checkbox(categories.water)));
    report.push_str(&format!("- {} Meat\n", checkbox(categories.meat)));
    report.push_str(&format!("- {} Sleep\n", checkbox(categories.sleep)));
    report.push_str(&format!("- {} Gym\n", checkbox(categories.gym)));

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CategoryState;

    fn completed_task(start: &str, approx: &str, actual: &str, description: &str) -> Task {
        let mut task = Task::new(start.into(), approx.into(), description.into());
        task.complete(Some(actual.into()));
        task
    }

    #[test]
    fn test_render_report_lists_tasks_and_habits() {
        let tasks = vec![
            completed_task("09:00", "10:00", "09:47:00", "Write report"),
            Task::new("13:00".into(), "14:00".into(), "Review notes".into()),
        ];
        let categories = CategoryState {
            water: true,
            gym: true,
            ..Default::default()
        };

        let report = render_report("2025-01-15", &tasks, &categories);

        assert!(report.starts_with("# Daily Report - 2025-01-15\n"));
        assert!(report.contains("- **Tasks:** 2 (1 completed)\n"));
        assert!(report.contains("- **Completion Rate:** 50.0%\n"));
        assert!(report.contains("- [x] 9:00 AM - Write report (47m, ▼ 13m early)\n"));
        assert!(report.contains("- [ ] 1:00 PM - Review notes\n"));
        assert!(report.contains("- [x] Water\n"));
        assert!(report.contains("- [ ] Meat\n"));
        assert!(report.contains("- [x] Gym\n"));
    }

    #[test]
    fn test_render_report_empty_day() {
        let report = render_report("2025-01-15", &[], &CategoryState::default());
        assert!(report.contains("No tasks recorded.\n"));
        assert!(report.contains("- **Completion Rate:** 0.0%\n"));
    }

    #[test]
    fn test_generate_report_writes_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = StateStore::in_memory();
        store
            .update(|state| {
                state.tasks_by_date.insert(
                    "2025-01-15".into(),
                    vec![completed_task("09:00", "10:00", "10:00", "Walk")],
                );
                Ok::<(), crate::persistence::StoreError>(())
            })
            .unwrap();

        let output = temp_dir.path().join("report.md");
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let path = generate_report(&store, date, Some(output.clone())).unwrap();

        assert_eq!(path, output);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("- [x] 9:00 AM - Walk (1h, ● on time)\n"));
    }
}
