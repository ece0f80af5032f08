//! Task categorization for grouped display.
//!
//! The categorizer takes a snapshot of a user's tasks plus a reference
//! instant and partitions the snapshot into four mutually exclusive buckets,
//! evaluated in priority order:
//!
//! 1. `completed`: the user marked the task done
//! 2. `overdue`: not done and due before now
//! 3. `upcoming`: not done and due at or after now
//! 4. `today`: not done and without a due time
//!
//! An optional [`TaskFilter`] narrows the snapshot before bucketing. The
//! module has no I/O and never reads the wall clock; callers decide when to
//! re-run it (on a new snapshot, a filter change, or a timer tick).

mod bucket;
mod config;
mod engine;
mod filter;
mod views;

pub use bucket::{Bucket, Indicator};
pub use config::{CategorizerConfig, CompletedScope};
pub use engine::{CategorizedTasks, Categorizer, categorize};
pub use filter::{CategorySelector, ParseCategorySelectorError, TaskFilter};
pub use views::{
    DueWindow, TaskSummary, UNKNOWN_DAY, UNKNOWN_TIME, WeekdayGroup, due_day_label,
    due_time_label, group_by_weekday, tasks_due_on,
};
