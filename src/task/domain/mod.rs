//! Domain model for user task records.
//!
//! Tasks are owned by a task store and scoped by user; the domain keeps the
//! record shape explicit and normalizes loosely typed stored documents at the
//! boundary, so the categorizer only ever sees typed instants.

mod document;
mod error;
mod ids;
mod patch;
mod task;

pub use document::{NormalizationWarning, NormalizedTask, TaskDocument, parse_instant};
pub use error::TaskDomainError;
pub use ids::{TaskId, UserId};
pub use patch::{CompletionChange, TaskPatch};
pub use task::{Category, PersistedTaskData, Task, TaskDraft, TaskTitle};
