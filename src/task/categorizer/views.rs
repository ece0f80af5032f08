//! Secondary read models over a task snapshot.
//!
//! These back the dashboard and calendar screens: a completion summary, a
//! due-window filter, weekday grouping, calendar-day lookup and due labels.
//! Like the categorizer they are pure functions of their inputs.

use super::CategorizerConfig;
use crate::task::domain::Task;
use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Fallback label when a task has no due day.
pub const UNKNOWN_DAY: &str = "Unknown Day";
/// Fallback label when a task has no due time.
pub const UNKNOWN_TIME: &str = "Unknown Time";

const PER_MILLE: usize = 1000;

/// Completion counts for a task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    /// Number of tasks.
    pub total: usize,
    /// Number of completed tasks.
    pub completed: usize,
    /// Number of tasks not yet completed.
    pub pending: usize,
}

impl TaskSummary {
    /// Counts tasks by completion.
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|task| task.is_completed()).count();
        Self {
            total: tasks.len(),
            completed,
            pending: tasks.len().saturating_sub(completed),
        }
    }

    /// Completed share in per-mille; zero for an empty list.
    #[must_use]
    pub fn completed_per_mille(&self) -> u16 {
        share_per_mille(self.completed, self.total)
    }

    /// Pending share in per-mille; zero for an empty list.
    #[must_use]
    pub fn pending_per_mille(&self) -> u16 {
        share_per_mille(self.pending, self.total)
    }
}

fn share_per_mille(part: usize, total: usize) -> u16 {
    let scaled = part
        .saturating_mul(PER_MILLE)
        .checked_div(total)
        .unwrap_or(0);
    u16::try_from(scaled).unwrap_or(u16::MAX)
}

/// Restriction on how far ahead a task may be due.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DueWindow {
    /// Every task, scheduled or not.
    #[default]
    Any,
    /// Tasks due between now and now plus the span, inclusive.
    Within(TimeDelta),
}

impl DueWindow {
    /// Window covering the next `days` days.
    #[must_use]
    pub fn next_days(days: u16) -> Self {
        Self::Within(TimeDelta::days(i64::from(days)))
    }

    /// Returns whether the task falls inside the window.
    ///
    /// Tasks without a due time only pass [`DueWindow::Any`].
    #[must_use]
    pub fn contains(&self, task: &Task, now: DateTime<Utc>) -> bool {
        match self {
            Self::Any => true,
            Self::Within(span) => task.due_at().is_some_and(|due| {
                let before_end = now
                    .checked_add_signed(*span)
                    .is_none_or(|end| due <= end);
                due >= now && before_end
            }),
        }
    }

    /// Returns the tasks inside the window, in input order.
    #[must_use]
    pub fn apply(&self, tasks: &[Task], now: DateTime<Utc>) -> Vec<Task> {
        tasks
            .iter()
            .filter(|task| self.contains(task, now))
            .cloned()
            .collect()
    }
}

/// Tasks created on one weekday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekdayGroup {
    /// Weekday of the tasks' creation time.
    pub weekday: Weekday,
    /// Tasks in input order.
    pub tasks: Vec<Task>,
}

/// Groups tasks by the weekday they were created on.
///
/// Groups appear in the order their first task appears in the input.
#[must_use]
pub fn group_by_weekday(tasks: &[Task], config: &CategorizerConfig) -> Vec<WeekdayGroup> {
    let offset = config.offset();
    let mut groups: Vec<WeekdayGroup> = Vec::new();
    for task in tasks {
        let weekday = task.created_at().with_timezone(&offset).weekday();
        if let Some(group) = groups.iter_mut().find(|group| group.weekday == weekday) {
            group.tasks.push(task.clone());
        } else {
            groups.push(WeekdayGroup {
                weekday,
                tasks: vec![task.clone()],
            });
        }
    }
    groups
}

/// Returns the tasks due on a calendar date, in input order.
#[must_use]
pub fn tasks_due_on(tasks: &[Task], date: NaiveDate, config: &CategorizerConfig) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| {
            task.due_at()
                .is_some_and(|due| config.calendar_date(due) == date)
        })
        .cloned()
        .collect()
}

/// Weekday name of the task's due time, such as `"Monday"`.
#[must_use]
pub fn due_day_label(task: &Task, config: &CategorizerConfig) -> String {
    task.due_at().map_or_else(
        || UNKNOWN_DAY.to_owned(),
        |due| due.with_timezone(&config.offset()).format("%A").to_string(),
    )
}

/// Twelve-hour clock time of the task's due time, such as `"09:05 PM"`.
#[must_use]
pub fn due_time_label(task: &Task, config: &CategorizerConfig) -> String {
    task.due_at().map_or_else(
        || UNKNOWN_TIME.to_owned(),
        |due| due.with_timezone(&config.offset()).format("%I:%M %p").to_string(),
    )
}
