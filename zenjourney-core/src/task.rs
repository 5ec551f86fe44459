//! Task model for the ZenJourney scheduling core.
//!
//! This is the one canonical shape every storage adapter (REST rows, document
//! snapshots, on-device JSON) coerces into before the scorer or packer sees it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lowest allowed stated priority.
pub const PRIORITY_MIN: i32 = 1;
/// Highest allowed stated priority.
pub const PRIORITY_MAX: i32 = 5;

/// Core task type.
///
/// Note: we keep this small + serializable. Anything the scheduler does not
/// consume (tags, notes, subtasks) stays in the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,

    /// Stated importance, 1-5 (5 = most urgent).
    pub priority: i32,

    /// Estimated wall-clock hours to reserve. The UI offers 0.5-hour steps
    /// up to 8; the core accepts any positive real.
    pub effort_hours: f64,

    pub created_at: DateTime<Utc>,
    pub completed: bool,

    /// Cached scorer output. Refreshed on every priority/effort edit and
    /// before each planning run; never hand-edited.
    pub priority_score: f64,

    /// Assigned by the day scheduler for one planning run.
    pub scheduled_start: Option<DateTime<Utc>>,
    pub scheduled_end: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            priority: 3,
            effort_hours: 1.0,
            created_at,
            completed: false,
            priority_score: 0.0,
            scheduled_start: None,
            scheduled_end: None,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_effort_hours(mut self, hours: f64) -> Self {
        self.effort_hours = hours;
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Score this task's own fields at `now` (does not touch the cache).
    pub fn refreshed_score(&self, now: DateTime<Utc>) -> f64 {
        crate::score::compute_priority_score(
            Some(f64::from(self.priority)),
            Some(self.effort_hours),
            Some(self.created_at),
            now,
        )
    }
}
