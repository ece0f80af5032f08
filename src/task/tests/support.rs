//! Shared fixtures for task unit tests.

use crate::task::domain::{Category, PersistedTaskData, Task, TaskId, TaskTitle};
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use std::sync::RwLock;

/// Clock pinned to an instant that tests move explicitly.
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<DateTime<Utc>>,
}

impl FixedClock {
    pub const fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.write().expect("clock lock");
        *now += delta;
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.read().expect("clock lock")
    }
}

/// 2026-03-02 09:00:00 UTC, a Monday.
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
        .single()
        .expect("valid instant")
}

/// Builder for tasks with explicit timestamps.
#[derive(Debug, Clone)]
pub struct TaskBuilder {
    data: PersistedTaskData,
}

impl TaskBuilder {
    pub fn new(title: &str) -> Self {
        let created_at = reference_now();
        Self {
            data: PersistedTaskData {
                id: TaskId::new(),
                title: TaskTitle::new(title).expect("valid title"),
                description: None,
                category: None,
                due_at: None,
                completed: false,
                created_at,
                updated_at: created_at,
            },
        }
    }

    pub fn due(mut self, due_at: DateTime<Utc>) -> Self {
        self.data.due_at = Some(due_at);
        self
    }

    pub fn completed(mut self) -> Self {
        self.data.completed = true;
        self
    }

    pub fn category(mut self, label: &str) -> Self {
        self.data.category = Some(Category::new(label).expect("valid category"));
        self
    }

    pub fn created(mut self, created_at: DateTime<Utc>) -> Self {
        self.data.created_at = created_at;
        self.data.updated_at = created_at;
        self
    }

    pub fn build(self) -> Task {
        Task::from_persisted(self.data)
    }
}

pub fn task(title: &str) -> TaskBuilder {
    TaskBuilder::new(title)
}

pub fn ids(tasks: &[Task]) -> Vec<TaskId> {
    tasks.iter().map(Task::id).collect()
}
