//! Bucket names and per-task urgency indicators.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named display group a task is placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    /// Not completed and due before now.
    Overdue,
    /// Not completed and due at or after now.
    Upcoming,
    /// Not completed and without a due time.
    Today,
    /// Marked completed by the user.
    Completed,
}

impl Bucket {
    /// Every bucket, in display order.
    pub const ALL: [Self; 4] = [Self::Overdue, Self::Upcoming, Self::Today, Self::Completed];

    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overdue => "overdue",
            Self::Upcoming => "upcoming",
            Self::Today => "today",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation accent derived from a task's status and due time.
///
/// Unlike [`Bucket`], a task due later today is tagged [`Indicator::Today`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    /// The task is completed.
    Done,
    /// The due time has passed.
    Overdue,
    /// Due later on the current calendar day.
    Today,
    /// Due on a later calendar day.
    Upcoming,
    /// No due time.
    Unscheduled,
}

impl Indicator {
    /// Returns the canonical tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Done => "done",
            Self::Overdue => "overdue",
            Self::Today => "today",
            Self::Upcoming => "upcoming",
            Self::Unscheduled => "unscheduled",
        }
    }

    /// Returns the accent colour as a hex RGB string.
    #[must_use]
    pub const fn accent(self) -> &'static str {
        match self {
            Self::Done => "#4CAF50",
            Self::Overdue => "#FF6B6B",
            Self::Today => "#FFC107",
            Self::Upcoming => "#FFA500",
            Self::Unscheduled => "#AAAAAA",
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
