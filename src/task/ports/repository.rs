//! Repository port for user-scoped task persistence.

use crate::task::domain::{Task, TaskId, TaskPatch, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Every call names the owning user; implementations must never expose one
/// user's tasks to another.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task for `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, owner: &UserId, task: &Task) -> TaskRepositoryResult<()>;

    /// Applies `patch` to one of `owner`'s tasks and returns the stored
    /// result.
    ///
    /// The read of the current record and the write of the patched fields
    /// happen as one atomic step, so concurrent patches touching different
    /// fields all survive and a toggle always flips the stored value.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when `owner` has no task with
    /// this identifier.
    async fn update(
        &self,
        owner: &UserId,
        id: TaskId,
        patch: &TaskPatch,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Task>;

    /// Removes a task permanently.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when `owner` has no task with
    /// this identifier.
    async fn delete(&self, owner: &UserId, id: TaskId) -> TaskRepositoryResult<()>;

    /// Finds one of `owner`'s tasks by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, owner: &UserId, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns all of `owner`'s tasks, newest first.
    ///
    /// Ordered by `created_at` descending; ties are broken by task identifier
    /// so the order is stable between calls.
    async fn list_for_user(&self, owner: &UserId) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found for this user.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
