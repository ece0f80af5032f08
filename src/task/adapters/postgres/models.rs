//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning user identifier.
    pub user_id: String,
    /// Display title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional category label.
    pub category: Option<String>,
    /// Optional due instant.
    pub due_at: Option<DateTime<Utc>>,
    /// Completion flag.
    pub completed: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning user identifier.
    pub user_id: String,
    /// Display title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional category label.
    pub category: Option<String>,
    /// Optional due instant.
    pub due_at: Option<DateTime<Utc>>,
    /// Completion flag.
    pub completed: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset for the columns a patch touches.
///
/// Outer `None` skips a column; `Some(None)` clears a nullable one.
/// `updated_at` is always written.
#[derive(Debug, Clone, PartialEq, Eq, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangeset {
    /// Display title.
    pub title: Option<String>,
    /// Optional description.
    pub description: Option<Option<String>>,
    /// Optional category label.
    pub category: Option<Option<String>>,
    /// Optional due instant.
    pub due_at: Option<Option<DateTime<Utc>>>,
    /// Completion flag.
    pub completed: Option<bool>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
