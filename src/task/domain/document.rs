//! Storage-boundary normalization of loosely typed task documents.
//!
//! Documents written by older application revisions are bags of optional
//! fields: the due time may be a timestamp object, an RFC 3339 string, epoch
//! milliseconds, a display string such as `"10:30 PM"`, or missing. This
//! module turns such a document into a [`Task`] with a single instant type
//! and reports every field it had to drop, so business logic never parses
//! display-formatted values.

use super::{Category, PersistedTaskData, Task, TaskDomainError, TaskId, TaskTitle};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw task document as stored by the hosted document collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDocument {
    /// Display title; required.
    #[serde(default)]
    pub title: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Category label; null or blank means uncategorized.
    #[serde(default)]
    pub category: Option<String>,
    /// Due time in any of the historical encodings.
    #[serde(default, alias = "time")]
    pub due_at: Option<Value>,
    /// Creation time in any of the historical encodings; required.
    #[serde(default)]
    pub created_at: Option<Value>,
    /// Completion flag; missing means not completed.
    #[serde(default)]
    pub completed: Option<Value>,
}

/// A field value that normalization discarded instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizationWarning {
    /// The due time could not be read as an instant and was treated as absent.
    UnreadableDueTime(String),
    /// The completion flag was not a boolean and was treated as `false`.
    UnreadableCompleted(String),
}

/// Outcome of normalizing one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTask {
    /// The typed task record.
    pub task: Task,
    /// Fields that were dropped to safe defaults.
    pub warnings: Vec<NormalizationWarning>,
}

impl TaskDocument {
    /// Normalizes the document into a typed task with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is missing or
    /// blank and [`TaskDomainError::MissingCreatedAt`] when no creation time
    /// can be read. Every other malformed field degrades to its default and
    /// is reported in [`NormalizedTask::warnings`].
    pub fn normalize(self, id: TaskId) -> Result<NormalizedTask, TaskDomainError> {
        let mut warnings = Vec::new();

        let title = TaskTitle::new(self.title.unwrap_or_default())?;
        let created_at = self
            .created_at
            .as_ref()
            .and_then(parse_instant)
            .ok_or(TaskDomainError::MissingCreatedAt)?;

        let due_at = match self.due_at {
            None | Some(Value::Null) => None,
            Some(raw) => {
                let parsed = parse_instant(&raw);
                if parsed.is_none() {
                    warnings.push(NormalizationWarning::UnreadableDueTime(raw.to_string()));
                }
                parsed
            }
        };

        let completed = match self.completed {
            None | Some(Value::Null) => false,
            Some(Value::Bool(flag)) => flag,
            Some(other) => {
                warnings.push(NormalizationWarning::UnreadableCompleted(other.to_string()));
                false
            }
        };

        let category = self.category.and_then(|label| Category::new(label).ok());
        let description = self.description.filter(|text| !text.trim().is_empty());

        let task = Task::from_persisted(PersistedTaskData {
            id,
            title,
            description,
            category,
            due_at,
            completed,
            created_at,
            updated_at: created_at,
        });
        Ok(NormalizedTask { task, warnings })
    }
}

impl From<&Task> for TaskDocument {
    fn from(task: &Task) -> Self {
        Self {
            title: Some(task.title().as_str().to_owned()),
            description: task.description().map(str::to_owned),
            category: task.category().map(|category| category.as_str().to_owned()),
            due_at: task.due_at().map(|due| Value::String(due.to_rfc3339())),
            created_at: Some(Value::String(task.created_at().to_rfc3339())),
            completed: Some(Value::Bool(task.is_completed())),
        }
    }
}

/// Reads an instant from one of the accepted encodings.
///
/// Accepts `{seconds, nanoseconds}` timestamp objects (with or without a
/// leading underscore), RFC 3339 strings, and integer epoch milliseconds.
#[must_use]
pub fn parse_instant(raw: &Value) -> Option<DateTime<Utc>> {
    match raw {
        Value::Object(fields) => {
            let seconds = fields
                .get("seconds")
                .or_else(|| fields.get("_seconds"))
                .and_then(Value::as_i64)?;
            let nanos = fields
                .get("nanoseconds")
                .or_else(|| fields.get("_nanoseconds"))
                .and_then(Value::as_u64)
                .map_or(Some(0), |value| u32::try_from(value).ok())?;
            DateTime::from_timestamp(seconds, nanos)
        }
        Value::String(text) => DateTime::parse_from_rfc3339(text.trim())
            .ok()
            .map(|instant| instant.with_timezone(&Utc)),
        Value::Number(number) => number.as_i64().and_then(DateTime::from_timestamp_millis),
        Value::Null | Value::Bool(_) | Value::Array(_) => None,
    }
}
