//! Service layer for user-scoped task management and board views.

use super::feed::{SnapshotFeed, SnapshotFeeds, TaskSnapshot, TaskSubscription};
use crate::task::{
    categorizer::{CategorizedTasks, Categorizer, TaskFilter, TaskSummary},
    domain::{
        Category, CompletionChange, Task, TaskDomainError, TaskDraft, TaskId, TaskPatch,
        TaskTitle, UserId,
    },
    ports::{IdentityProvider, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    category: Option<String>,
    due_at: Option<DateTime<Utc>>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            category: None,
            due_at: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the category label.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the due instant.
    #[must_use]
    pub fn with_due_at(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }

    fn into_draft(self) -> Result<TaskDraft, TaskDomainError> {
        let mut draft = TaskDraft::new(TaskTitle::new(self.title)?);
        if let Some(description) = self.description.filter(|text| !text.trim().is_empty()) {
            draft = draft.with_description(description);
        }
        if let Some(label) = self.category {
            draft = draft.with_category(Category::new(label)?);
        }
        if let Some(due_at) = self.due_at {
            draft = draft.with_due_at(due_at);
        }
        Ok(draft)
    }
}

/// Partial update of a task's editable fields.
///
/// Fields left untouched keep their stored value; the `clear_*` methods
/// remove optional values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditTaskRequest {
    title: Option<String>,
    description: Option<Option<String>>,
    category: Option<Option<String>>,
    due_at: Option<Option<DateTime<Utc>>>,
}

impl EditTaskRequest {
    /// Creates an empty edit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Removes the description.
    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    /// Replaces the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(Some(category.into()));
        self
    }

    /// Makes the task uncategorized.
    #[must_use]
    pub fn clear_category(mut self) -> Self {
        self.category = Some(None);
        self
    }

    /// Replaces the due instant.
    #[must_use]
    pub fn with_due_at(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(Some(due_at));
        self
    }

    /// Removes the due instant.
    #[must_use]
    pub fn clear_due_at(mut self) -> Self {
        self.due_at = Some(None);
        self
    }

    fn into_patch(self) -> Result<TaskPatch, TaskDomainError> {
        let mut patch = TaskPatch::new();
        if let Some(title) = self.title {
            patch = patch.with_title(TaskTitle::new(title)?);
        }
        if let Some(description) = self.description {
            patch = patch.with_description(description.filter(|text| !text.trim().is_empty()));
        }
        if let Some(category) = self.category {
            patch = patch.with_category(category.map(Category::new).transpose()?);
        }
        if let Some(due_at) = self.due_at {
            patch = patch.with_due_at(due_at);
        }
        Ok(patch)
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// No user is signed in.
    #[error("no user is signed in")]
    NotAuthenticated,
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// The owning service was dropped.
    #[error("task feed closed")]
    FeedClosed,
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task board orchestration service.
///
/// Every operation is scoped to the identity provider's current user.
pub struct TaskBoardService<R, I, C>
where
    R: TaskRepository,
    I: IdentityProvider,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    identity: Arc<I>,
    clock: Arc<C>,
    categorizer: Categorizer,
    feeds: SnapshotFeeds,
}

impl<R, I, C> Clone for TaskBoardService<R, I, C>
where
    R: TaskRepository,
    I: IdentityProvider,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            identity: Arc::clone(&self.identity),
            clock: Arc::clone(&self.clock),
            categorizer: self.categorizer,
            feeds: self.feeds.clone(),
        }
    }
}

impl<R, I, C> TaskBoardService<R, I, C>
where
    R: TaskRepository,
    I: IdentityProvider,
    C: Clock + Send + Sync,
{
    /// Creates a service with the default categorizer.
    #[must_use]
    pub fn new(repository: Arc<R>, identity: Arc<I>, clock: Arc<C>) -> Self {
        Self {
            repository,
            identity,
            clock,
            categorizer: Categorizer::default(),
            feeds: SnapshotFeeds::default(),
        }
    }

    /// Replaces the categorizer used by [`Self::board`].
    #[must_use]
    pub fn with_categorizer(mut self, categorizer: Categorizer) -> Self {
        self.categorizer = categorizer;
        self
    }

    /// Returns the categorizer used by [`Self::board`].
    #[must_use]
    pub const fn categorizer(&self) -> &Categorizer {
        &self.categorizer
    }

    /// Creates a task for the current user.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotAuthenticated`] when nobody is signed
    /// in, [`TaskServiceError::Domain`] when the title or category is blank,
    /// and [`TaskServiceError::Repository`] when the store rejects the write.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let owner = self.require_user()?;
        let draft = request.into_draft()?;
        let task = Task::new(draft, &*self.clock);
        self.repository.store(&owner, &task).await?;
        info!(user = %owner, task = %task.id(), "task created");
        self.publish(&owner).await;
        Ok(task)
    }

    /// Finds one of the current user's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotAuthenticated`] when nobody is signed
    /// in, or [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn find_task(&self, id: TaskId) -> TaskServiceResult<Option<Task>> {
        let owner = self.require_user()?;
        Ok(self.repository.find_by_id(&owner, id).await?)
    }

    /// Lists the current user's tasks, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotAuthenticated`] when nobody is signed
    /// in, or [`TaskServiceError::Repository`] when the listing fails.
    pub async fn list_tasks(&self) -> TaskServiceResult<Vec<Task>> {
        let owner = self.require_user()?;
        Ok(self.repository.list_for_user(&owner).await?)
    }

    /// Flips a task's completion flag.
    ///
    /// The flip is applied to the stored value, so concurrent toggles never
    /// cancel out silently.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] (wrapped) for unknown tasks.
    pub async fn toggle_completion(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.mutate(id, &TaskPatch::new().with_completion(CompletionChange::Toggle))
            .await
    }

    /// Sets a task's completion flag.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] (wrapped) for unknown tasks.
    pub async fn set_completed(&self, id: TaskId, completed: bool) -> TaskServiceResult<Task> {
        self.mutate(
            id,
            &TaskPatch::new().with_completion(CompletionChange::Set(completed)),
        )
        .await
    }

    /// Sets or clears a task's due instant.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] (wrapped) for unknown tasks.
    pub async fn reschedule(
        &self,
        id: TaskId,
        due_at: Option<DateTime<Utc>>,
    ) -> TaskServiceResult<Task> {
        self.mutate(id, &TaskPatch::new().with_due_at(due_at)).await
    }

    /// Applies a partial edit to a task.
    ///
    /// Only the fields named in `request` are written; concurrent edits to
    /// other fields are kept.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when a new title or category is
    /// blank or too long, and [`TaskRepositoryError::NotFound`] (wrapped) for
    /// unknown tasks.
    pub async fn edit_task(&self, id: TaskId, request: EditTaskRequest) -> TaskServiceResult<Task> {
        let patch = request.into_patch()?;
        self.mutate(id, &patch).await
    }

    /// Deletes a task permanently.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] (wrapped) for unknown tasks.
    pub async fn delete_task(&self, id: TaskId) -> TaskServiceResult<()> {
        let owner = self.require_user()?;
        self.repository.delete(&owner, id).await?;
        info!(user = %owner, task = %id, "task deleted");
        self.publish(&owner).await;
        Ok(())
    }

    /// Subscribes to live snapshots of the current user's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotAuthenticated`] when nobody is signed
    /// in, or [`TaskServiceError::Repository`] when the initial listing
    /// fails.
    pub async fn subscribe(&self) -> TaskServiceResult<TaskSubscription> {
        let owner = self.require_user()?;
        let (feed, mut receiver) = self.feeds.attach(&owner);
        self.refresh(&owner, &feed).await?;
        receiver.mark_unchanged();
        debug!(user = %owner, "task feed subscribed");
        Ok(TaskSubscription::new(owner, receiver))
    }

    /// Categorizes the current user's tasks at the clock's current instant.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotAuthenticated`] when nobody is signed
    /// in, or [`TaskServiceError::Repository`] when the listing fails.
    pub async fn board(&self, filter: Option<&TaskFilter>) -> TaskServiceResult<CategorizedTasks> {
        let tasks = self.list_tasks().await?;
        Ok(self.categorizer.categorize(&tasks, self.clock.utc(), filter))
    }

    /// Summarizes completion across the current user's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotAuthenticated`] when nobody is signed
    /// in, or [`TaskServiceError::Repository`] when the listing fails.
    pub async fn summary(&self) -> TaskServiceResult<TaskSummary> {
        let tasks = self.list_tasks().await?;
        Ok(TaskSummary::from_tasks(&tasks))
    }

    fn require_user(&self) -> TaskServiceResult<UserId> {
        self.identity
            .current_user()
            .ok_or(TaskServiceError::NotAuthenticated)
    }

    async fn mutate(&self, id: TaskId, patch: &TaskPatch) -> TaskServiceResult<Task> {
        let owner = self.require_user()?;
        let task = self
            .repository
            .update(&owner, id, patch, self.clock.utc())
            .await?;
        info!(user = %owner, task = %id, completed = task.is_completed(), "task updated");
        self.publish(&owner).await;
        Ok(task)
    }

    async fn publish(&self, owner: &UserId) {
        let Some(feed) = self.feeds.feed_for(owner) else {
            return;
        };
        if let Err(err) = self.refresh(owner, &feed).await {
            warn!(user = %owner, error = %err, "task snapshot refresh failed");
        }
    }

    /// Lists the owner's tasks and sends the outcome, failures included, to
    /// every subscriber.
    async fn refresh(
        &self,
        owner: &UserId,
        feed: &SnapshotFeed,
    ) -> TaskRepositoryResult<TaskSnapshot> {
        let _serialized = feed.serialize().await;
        let listing: TaskRepositoryResult<TaskSnapshot> = self
            .repository
            .list_for_user(owner)
            .await
            .map(Arc::from);
        if let Ok(snapshot) = &listing {
            debug!(user = %owner, count = snapshot.len(), "task snapshot published");
        }
        feed.send(listing.clone());
        listing
    }
}
