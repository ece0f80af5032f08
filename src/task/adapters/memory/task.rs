//! In-memory task repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{Task, TaskId, TaskPatch, UserId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository, partitioned by owner.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    collections: HashMap<UserId, HashMap<TaskId, Task>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

/// Sorts newest first, breaking timestamp ties by identifier.
fn sort_newest_first(tasks: &mut [Task]) {
    tasks.sort_by(|left, right| {
        right
            .created_at()
            .cmp(&left.created_at())
            .then_with(|| left.id().cmp(&right.id()))
    });
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, owner: &UserId, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        let collection = state.collections.entry(owner.clone()).or_default();
        if collection.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        collection.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(
        &self,
        owner: &UserId,
        id: TaskId,
        patch: &TaskPatch,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Task> {
        let mut state = self.write()?;
        let stored = state
            .collections
            .get_mut(owner)
            .and_then(|collection| collection.get_mut(&id))
            .ok_or(TaskRepositoryError::NotFound(id))?;
        stored.apply_patch(patch, updated_at);
        Ok(stored.clone())
    }

    async fn delete(&self, owner: &UserId, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        state
            .collections
            .get_mut(owner)
            .and_then(|collection| collection.remove(&id))
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn find_by_id(&self, owner: &UserId, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state
            .collections
            .get(owner)
            .and_then(|collection| collection.get(&id))
            .cloned())
    }

    async fn list_for_user(&self, owner: &UserId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        let mut tasks: Vec<Task> = state
            .collections
            .get(owner)
            .map(|collection| collection.values().cloned().collect())
            .unwrap_or_default();
        sort_newest_first(&mut tasks);
        Ok(tasks)
    }
}
