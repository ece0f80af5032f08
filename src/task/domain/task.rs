//! Task record and its validated field types.

use super::{TaskDomainError, TaskId, TaskPatch};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-empty display title of a task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Maximum title length in characters after trimming.
    pub const MAX_CHARS: usize = 255;

    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the value is blank and
    /// [`TaskDomainError::TitleTooLong`] when it exceeds
    /// [`Self::MAX_CHARS`].
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        let actual = trimmed.chars().count();
        if actual > Self::MAX_CHARS {
            return Err(TaskDomainError::TitleTooLong {
                max: Self::MAX_CHARS,
                actual,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskTitle {
    type Error = TaskDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskTitle> for String {
    fn from(value: TaskTitle) -> Self {
        value.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User-defined category label.
///
/// The set of labels is open: the application ships with `Personal`, `Work`
/// and `Events`, and users may add their own. Labels compare exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Category(String);

impl Category {
    /// Label of the built-in personal category.
    pub const PERSONAL: &'static str = "Personal";
    /// Label of the built-in work category.
    pub const WORK: &'static str = "Work";
    /// Label of the built-in events category.
    pub const EVENTS: &'static str = "Events";
    /// Maximum label length in characters after trimming.
    pub const MAX_CHARS: usize = 100;

    /// Creates a validated category label.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyCategory`] when the value is blank and
    /// [`TaskDomainError::CategoryTooLong`] when it exceeds
    /// [`Self::MAX_CHARS`].
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyCategory);
        }
        let actual = trimmed.chars().count();
        if actual > Self::MAX_CHARS {
            return Err(TaskDomainError::CategoryTooLong {
                max: Self::MAX_CHARS,
                actual,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the built-in categories in display order.
    #[must_use]
    pub fn builtin() -> Vec<Self> {
        [Self::PERSONAL, Self::WORK, Self::EVENTS]
            .into_iter()
            .map(|label| Self(label.to_owned()))
            .collect()
    }

    /// Returns the label as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Category {
    type Error = TaskDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Field values for a task that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: TaskTitle,
    description: Option<String>,
    category: Option<Category>,
    due_at: Option<DateTime<Utc>>,
}

impl TaskDraft {
    /// Creates a draft with the required title.
    #[must_use]
    pub const fn new(title: TaskTitle) -> Self {
        Self {
            title,
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

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Sets the due instant.
    #[must_use]
    pub fn with_due_at(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }
}

/// A user's task record.
///
/// Completion is only ever changed through explicit calls; the passage of
/// time never completes a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: Option<String>,
    category: Option<Category>,
    due_at: Option<DateTime<Utc>>,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted category, if any.
    pub category: Option<Category>,
    /// Persisted due instant, if any.
    pub due_at: Option<DateTime<Utc>>,
    /// Persisted completion flag.
    pub completed: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new, not yet completed task from a draft.
    #[must_use]
    pub fn new(draft: TaskDraft, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            title: draft.title,
            description: draft.description,
            category: draft.category,
            due_at: draft.due_at,
            completed: false,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            category: data.category,
            due_at: data.due_at,
            completed: data.completed,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the category, or `None` when uncategorized.
    #[must_use]
    pub const fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }

    /// Returns the due instant, if scheduled.
    #[must_use]
    pub const fn due_at(&self) -> Option<DateTime<Utc>> {
        self.due_at
    }

    /// Returns whether the user marked the task as completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Sets the completion flag.
    pub fn set_completed(&mut self, completed: bool, clock: &impl Clock) {
        self.completed = completed;
        self.touch(clock);
    }

    /// Flips the completion flag and returns the new value.
    pub fn toggle_completion(&mut self, clock: &impl Clock) -> bool {
        self.set_completed(!self.completed, clock);
        self.completed
    }

    /// Sets or clears the due instant.
    pub fn reschedule(&mut self, due_at: Option<DateTime<Utc>>, clock: &impl Clock) {
        self.due_at = due_at;
        self.touch(clock);
    }

    /// Replaces the title.
    pub fn rename(&mut self, title: TaskTitle, clock: &impl Clock) {
        self.title = title;
        self.touch(clock);
    }

    /// Replaces the description; `None` clears it.
    pub fn describe(&mut self, description: Option<String>, clock: &impl Clock) {
        self.description = description;
        self.touch(clock);
    }

    /// Replaces the category; `None` makes the task uncategorized.
    pub fn recategorize(&mut self, category: Option<Category>, clock: &impl Clock) {
        self.category = category;
        self.touch(clock);
    }

    /// Applies every touched field of `patch` and stamps `updated_at`.
    ///
    /// Returns the new completion flag.
    pub fn apply_patch(&mut self, patch: &TaskPatch, updated_at: DateTime<Utc>) -> bool {
        if let Some(title) = patch.title() {
            self.title = title.clone();
        }
        if let Some(description) = patch.description() {
            self.description = description.map(str::to_owned);
        }
        if let Some(category) = patch.category() {
            self.category = category.cloned();
        }
        if let Some(due_at) = patch.due_at() {
            self.due_at = due_at;
        }
        if let Some(completion) = patch.completion() {
            self.completed = completion.apply(self.completed);
        }
        self.updated_at = updated_at;
        self.completed
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
