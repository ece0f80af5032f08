//! Partial task updates applied atomically by the store.

use super::{Category, TaskTitle};
use chrono::{DateTime, Utc};

/// Change to a task's completion flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionChange {
    /// Sets the flag to the given value.
    Set(bool),
    /// Flips whatever value is stored when the patch is applied.
    Toggle,
}

impl CompletionChange {
    /// Returns the flag after applying the change to `current`.
    #[must_use]
    pub const fn apply(self, current: bool) -> bool {
        match self {
            Self::Set(value) => value,
            Self::Toggle => !current,
        }
    }
}

/// Field changes for one task.
///
/// Untouched fields keep whatever value the store holds when the patch is
/// applied, so two patches touching different fields never overwrite each
/// other. For optional fields `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<TaskTitle>,
    description: Option<Option<String>>,
    category: Option<Option<Category>>,
    due_at: Option<Option<DateTime<Utc>>>,
    completion: Option<CompletionChange>,
}

impl TaskPatch {
    /// Creates a patch that touches nothing but the update timestamp.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: TaskTitle) -> Self {
        self.title = Some(title);
        self
    }

    /// Replaces or clears the description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    /// Replaces or clears the category.
    #[must_use]
    pub fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = Some(category);
        self
    }

    /// Replaces or clears the due instant.
    #[must_use]
    pub const fn with_due_at(mut self, due_at: Option<DateTime<Utc>>) -> Self {
        self.due_at = Some(due_at);
        self
    }

    /// Changes the completion flag.
    #[must_use]
    pub const fn with_completion(mut self, completion: CompletionChange) -> Self {
        self.completion = Some(completion);
        self
    }

    /// Returns the new title, if touched.
    #[must_use]
    pub const fn title(&self) -> Option<&TaskTitle> {
        self.title.as_ref()
    }

    /// Returns the description change, if touched.
    #[must_use]
    pub fn description(&self) -> Option<Option<&str>> {
        self.description.as_ref().map(Option::as_deref)
    }

    /// Returns the category change, if touched.
    #[must_use]
    pub fn category(&self) -> Option<Option<&Category>> {
        self.category.as_ref().map(Option::as_ref)
    }

    /// Returns the due instant change, if touched.
    #[must_use]
    pub const fn due_at(&self) -> Option<Option<DateTime<Utc>>> {
        self.due_at
    }

    /// Returns the completion change, if touched.
    #[must_use]
    pub const fn completion(&self) -> Option<CompletionChange> {
        self.completion
    }

    /// Returns whether no field is touched.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.due_at.is_none()
            && self.completion.is_none()
    }
}
