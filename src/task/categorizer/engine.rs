//! Partitioning of a task snapshot into display buckets.

use super::{Bucket, CategorizerConfig, CompletedScope, Indicator, TaskFilter};
use crate::task::domain::{Task, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tasks grouped into the four display buckets.
///
/// Every bucket is always present. Within a bucket tasks keep their input
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizedTasks {
    /// Not completed, due before `now`.
    pub overdue: Vec<Task>,
    /// Not completed, due at or after `now`.
    pub upcoming: Vec<Task>,
    /// Not completed, no due time.
    pub today: Vec<Task>,
    /// Completed, subject to the configured [`CompletedScope`].
    pub completed: Vec<Task>,
}

impl CategorizedTasks {
    /// Returns the tasks in a bucket.
    #[must_use]
    pub fn bucket(&self, bucket: Bucket) -> &[Task] {
        match bucket {
            Bucket::Overdue => &self.overdue,
            Bucket::Upcoming => &self.upcoming,
            Bucket::Today => &self.today,
            Bucket::Completed => &self.completed,
        }
    }

    fn bucket_mut(&mut self, bucket: Bucket) -> &mut Vec<Task> {
        match bucket {
            Bucket::Overdue => &mut self.overdue,
            Bucket::Upcoming => &mut self.upcoming,
            Bucket::Today => &mut self.today,
            Bucket::Completed => &mut self.completed,
        }
    }

    /// Iterates buckets in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Bucket, &[Task])> {
        Bucket::ALL
            .into_iter()
            .map(move |bucket| (bucket, self.bucket(bucket)))
    }

    /// Returns the bucket holding the task, if any.
    #[must_use]
    pub fn bucket_of(&self, id: TaskId) -> Option<Bucket> {
        self.iter()
            .find(|(_, tasks)| tasks.iter().any(|task| task.id() == id))
            .map(|(bucket, _)| bucket)
    }

    /// Returns the number of tasks across all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().map(|(_, tasks)| tasks.len()).sum()
    }

    /// Returns whether every bucket is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, tasks)| tasks.is_empty())
    }
}

/// Stateless task categorizer.
///
/// The reference instant is always passed in; nothing here reads the wall
/// clock, so the same inputs always give the same buckets.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use flexido::task::categorizer::{Bucket, Categorizer};
/// use flexido::task::domain::{PersistedTaskData, Task, TaskId, TaskTitle};
///
/// let now = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).single().expect("valid instant");
/// let task = Task::from_persisted(PersistedTaskData {
///     id: TaskId::new(),
///     title: TaskTitle::new("Pay rent").expect("valid title"),
///     description: None,
///     category: None,
///     due_at: Some(now - Duration::hours(1)),
///     completed: false,
///     created_at: now,
///     updated_at: now,
/// });
///
/// let board = Categorizer::default().categorize(&[task.clone()], now, None);
/// assert_eq!(board.bucket_of(task.id()), Some(Bucket::Overdue));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Categorizer {
    config: CategorizerConfig,
}

impl Categorizer {
    /// Creates a categorizer with the given settings.
    #[must_use]
    pub const fn new(config: CategorizerConfig) -> Self {
        Self { config }
    }

    /// Returns the settings.
    #[must_use]
    pub const fn config(&self) -> &CategorizerConfig {
        &self.config
    }

    /// Returns the bucket for one task, or `None` when the completed scope
    /// leaves the task out.
    #[must_use]
    pub fn bucket_for(&self, task: &Task, now: DateTime<Utc>) -> Option<Bucket> {
        if task.is_completed() {
            return self.admits_completed(task, now).then_some(Bucket::Completed);
        }
        match task.due_at() {
            Some(due) if due < now => Some(Bucket::Overdue),
            Some(_) => Some(Bucket::Upcoming),
            None => Some(Bucket::Today),
        }
    }

    /// Returns the presentation indicator for one task.
    #[must_use]
    pub fn indicator(&self, task: &Task, now: DateTime<Utc>) -> Indicator {
        if task.is_completed() {
            return Indicator::Done;
        }
        match task.due_at() {
            Some(due) if due < now => Indicator::Overdue,
            Some(due) if self.config.calendar_date(due) == self.config.calendar_date(now) => {
                Indicator::Today
            }
            Some(_) => Indicator::Upcoming,
            None => Indicator::Unscheduled,
        }
    }

    /// Partitions `tasks` into buckets at the instant `now`.
    ///
    /// The optional filter runs first, so buckets only ever contain tasks
    /// that pass it.
    #[must_use]
    pub fn categorize(
        &self,
        tasks: &[Task],
        now: DateTime<Utc>,
        filter: Option<&TaskFilter>,
    ) -> CategorizedTasks {
        let mut categorized = CategorizedTasks::default();
        let admitted = tasks
            .iter()
            .filter(|task| filter.is_none_or(|active| active.matches(task)));
        for task in admitted {
            if let Some(bucket) = self.bucket_for(task, now) {
                categorized.bucket_mut(bucket).push(task.clone());
            }
        }
        categorized
    }

    fn admits_completed(&self, task: &Task, now: DateTime<Utc>) -> bool {
        match self.config.completed_scope {
            CompletedScope::All => true,
            CompletedScope::CreatedToday => {
                self.config.calendar_date(task.created_at()) == self.config.calendar_date(now)
            }
        }
    }
}

/// Categorizes with the default settings.
#[must_use]
pub fn categorize(
    tasks: &[Task],
    now: DateTime<Utc>,
    filter: Option<&TaskFilter>,
) -> CategorizedTasks {
    Categorizer::default().categorize(tasks, now, filter)
}
