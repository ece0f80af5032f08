//! Configuration for task categorization.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};

/// Which completed tasks the completed bucket admits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletedScope {
    /// Every completed task, regardless of dates.
    #[default]
    All,
    /// Only completed tasks created on the same calendar day as `now`.
    ///
    /// Completed tasks created on other days are left out of every bucket.
    CreatedToday,
}

/// Categorization settings.
///
/// Deserializes from any serde format; missing fields take their defaults.
///
/// # Examples
///
/// ```
/// use flexido::task::categorizer::{CategorizerConfig, CompletedScope};
///
/// let config = CategorizerConfig::default();
/// assert_eq!(config.completed_scope, CompletedScope::All);
/// assert_eq!(config.utc_offset_seconds, 0);
///
/// let jakarta = CategorizerConfig::completed_today().with_utc_offset_seconds(7 * 3600);
/// assert_eq!(jakarta.completed_scope, CompletedScope::CreatedToday);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategorizerConfig {
    /// Completed bucket policy.
    pub completed_scope: CompletedScope,
    /// Offset from UTC, in seconds, used to decide calendar days.
    ///
    /// Values outside one day in either direction fall back to UTC.
    pub utc_offset_seconds: i32,
}

impl Default for CategorizerConfig {
    fn default() -> Self {
        Self {
            completed_scope: CompletedScope::All,
            utc_offset_seconds: 0,
        }
    }
}

impl CategorizerConfig {
    /// Preset that admits only completed tasks created today.
    #[must_use]
    pub const fn completed_today() -> Self {
        Self {
            completed_scope: CompletedScope::CreatedToday,
            utc_offset_seconds: 0,
        }
    }

    /// Sets the calendar offset from UTC in seconds.
    #[must_use]
    pub const fn with_utc_offset_seconds(mut self, seconds: i32) -> Self {
        self.utc_offset_seconds = seconds;
        self
    }

    /// Sets the completed bucket policy.
    #[must_use]
    pub const fn with_completed_scope(mut self, scope: CompletedScope) -> Self {
        self.completed_scope = scope;
        self
    }

    /// Returns the calendar offset, falling back to UTC when out of range.
    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_seconds).unwrap_or_else(|| Utc.fix())
    }

    /// Returns the calendar date of an instant in the configured offset.
    #[must_use]
    pub fn calendar_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset()).date_naive()
    }
}
