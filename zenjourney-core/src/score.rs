//! Priority scorer: one real-valued ranking key per task.
//!
//! Blends stated importance, inverse effort (cheap important work ranks above
//! expensive important work), and aging, so old low-priority tasks cannot
//! starve forever.

use chrono::{DateTime, Utc};

use crate::task::Task;

/// Floor for the effort denominator; keeps near-zero estimates from
/// exploding the score.
const MIN_EFFORT_HOURS: f64 = 0.1;

/// Aging gain per day since creation.
const URGENCY_GAIN_PER_DAY: f64 = 0.1;

const SECS_PER_DAY: f64 = 86_400.0;

/// Compute the ranking score for one task.
///
/// Inputs arrive `Option`-shaped because storage adapters feed this function
/// records with missing fields. A missing or non-finite input degrades to
/// `0.0` (the task ranks last), never an error.
///
/// ```
/// use chrono::{Duration, Utc};
/// use zenjourney_core::compute_priority_score;
///
/// let now = Utc::now();
/// let created = now - Duration::days(10);
/// let score = compute_priority_score(Some(2.0), Some(4.0), Some(created), now);
/// assert!((score - 1.0).abs() < 1e-9);
/// ```
pub fn compute_priority_score(
    priority: Option<f64>,
    effort_hours: Option<f64>,
    created_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> f64 {
    let (Some(priority), Some(effort), Some(created_at)) = (priority, effort_hours, created_at)
    else {
        return 0.0;
    };
    if !priority.is_finite() || !effort.is_finite() {
        return 0.0;
    }

    let days_since_created = ((now - created_at).num_seconds() as f64 / SECS_PER_DAY).max(0.0);
    let urgency_multiplier = 1.0 + days_since_created * URGENCY_GAIN_PER_DAY;
    let efficiency = priority / effort.max(MIN_EFFORT_HOURS);

    (efficiency * urgency_multiplier).max(0.0)
}

/// Refresh the cached `priority_score` of every task in place.
pub fn refresh_scores(tasks: &mut [Task], now: DateTime<Utc>) {
    for task in tasks.iter_mut() {
        task.priority_score = task.refreshed_score(now);
    }
}
