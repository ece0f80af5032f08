//! Pre-bucketing filters over task lists.

use crate::task::domain::{Category, Task};
use std::str::FromStr;
use thiserror::Error;

/// Error returned while parsing a category selector from user input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("category selector must not be empty")]
pub struct ParseCategorySelectorError;

/// Category restriction applied before bucketing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CategorySelector {
    /// No restriction.
    #[default]
    All,
    /// Tasks labelled with exactly this category.
    Named(Category),
    /// Tasks without a category.
    Uncategorized,
}

impl CategorySelector {
    /// Returns whether a task with the given category passes the selector.
    ///
    /// Uncategorized tasks only pass [`CategorySelector::All`] and
    /// [`CategorySelector::Uncategorized`].
    #[must_use]
    pub fn matches(&self, category: Option<&Category>) -> bool {
        match self {
            Self::All => true,
            Self::Named(expected) => category == Some(expected),
            Self::Uncategorized => category.is_none(),
        }
    }
}

impl FromStr for CategorySelector {
    type Err = ParseCategorySelectorError;

    /// Parses `"All"` and `"uncategorized"` case-insensitively; any other
    /// label selects that named category.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        if trimmed.eq_ignore_ascii_case("uncategorized") {
            return Ok(Self::Uncategorized);
        }
        Category::new(trimmed)
            .map(Self::Named)
            .map_err(|_| ParseCategorySelectorError)
    }
}

/// Filter applied to the input sequence before tasks are bucketed.
///
/// Combines a category selector with a case-insensitive title search; a task
/// must pass both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    category: CategorySelector,
    search: Option<String>,
}

impl TaskFilter {
    /// Creates a filter that admits every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the filter to a category selector.
    #[must_use]
    pub fn with_category(mut self, category: CategorySelector) -> Self {
        self.category = category;
        self
    }

    /// Restricts the filter to titles containing `needle`, ignoring case.
    ///
    /// A blank needle clears the search restriction.
    #[must_use]
    pub fn with_search(mut self, needle: impl Into<String>) -> Self {
        let raw = needle.into();
        self.search = if raw.trim().is_empty() {
            None
        } else {
            Some(raw.to_lowercase())
        };
        self
    }

    /// Returns the category selector.
    #[must_use]
    pub const fn category(&self) -> &CategorySelector {
        &self.category
    }

    /// Returns the lowercased search needle, if any.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Returns whether the task passes the filter.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        if !self.category.matches(task.category()) {
            return false;
        }
        self.search.as_deref().is_none_or(|needle| {
            task.title().as_str().to_lowercase().contains(needle)
        })
    }
}
