//! Error types for task domain validation and normalization.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the stored column width.
    #[error("task title is {actual} characters long, at most {max} are allowed")]
    TitleTooLong {
        /// Maximum accepted length in characters.
        max: usize,
        /// Length of the rejected value in characters.
        actual: usize,
    },

    /// A category label was supplied but is empty after trimming.
    #[error("category label must not be empty")]
    EmptyCategory,

    /// The category label exceeds the stored column width.
    #[error("category label is {actual} characters long, at most {max} are allowed")]
    CategoryTooLong {
        /// Maximum accepted length in characters.
        max: usize,
        /// Length of the rejected value in characters.
        actual: usize,
    },

    /// The user identifier is empty after trimming.
    #[error("user identifier must not be empty")]
    EmptyUserId,

    /// The user identifier exceeds the stored column width.
    #[error("user identifier is {actual} characters long, at most {max} are allowed")]
    UserIdTooLong {
        /// Maximum accepted length in characters.
        max: usize,
        /// Length of the rejected value in characters.
        actual: usize,
    },

    /// A stored document carries no readable creation timestamp.
    #[error("task document has no readable creation timestamp")]
    MissingCreatedAt,
}

