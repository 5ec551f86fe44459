//! Day scheduler — greedy first-fit packing of scored tasks into one workday.
//!
//! Greedy-by-priority rather than knapsack-optimal: the product rule is
//! "always work on the most important thing next", so the packer stays an
//! O(n log n) sort plus an O(n) pass and the outcome stays explainable
//! ("X outranked Y and there was room for it").

use anyhow::Result;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::score::refresh_scores;
use crate::task::{PRIORITY_MAX, PRIORITY_MIN, Task};
use crate::workday::{DayWindow, WorkdayConfig};

/// Why a task was excluded from a planning run before packing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SkipReason {
    /// `priority` outside 1..=5.
    PriorityOutOfRange(i32),
    /// `effort_hours` zero, negative, or non-finite.
    InvalidEffort(f64),
}

/// A task excluded from packing, surfaced so the caller can warn per-task
/// instead of failing the whole batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedTask {
    pub task: Task,
    pub reason: SkipReason,
}

/// One accepted block. The embedded task carries the same bounds in its
/// `scheduled_start` / `scheduled_end` slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub task: Task,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Output of one planning run. `scheduled`, `unscheduled`, and `skipped`
/// exactly partition the non-completed input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Accepted tasks, in acceptance order == ascending start order.
    pub scheduled: Vec<ScheduledTask>,
    /// Tasks that did not fit before the end of the window, in sorted order.
    pub unscheduled: Vec<Task>,
    /// Contract-violating tasks excluded before packing.
    pub skipped: Vec<SkippedTask>,
}

/// Pack tasks into one workday, sorting by the cached `priority_score`.
///
/// Fatal only on invalid config (`resolve_window`); a bad task record is
/// moved to `skipped` and the rest of the batch still schedules.
pub fn schedule_day(
    tasks: &[Task],
    config: &WorkdayConfig,
    date: NaiveDate,
    tz: Tz,
) -> Result<ScheduleResult> {
    let window = config.resolve_window(date, tz)?;
    Ok(pack(tasks, &window, config.break_minutes))
}

/// Refresh every score at `now`, then pack.
///
/// The composed operation for callers holding canonical in-memory tasks.
/// Pure: identical inputs (including `now`) produce identical plans.
pub fn plan_day(
    tasks: &[Task],
    config: &WorkdayConfig,
    date: NaiveDate,
    tz: Tz,
    now: DateTime<Utc>,
) -> Result<ScheduleResult> {
    let mut tasks = tasks.to_vec();
    refresh_scores(&mut tasks, now);
    schedule_day(&tasks, config, date, tz)
}

fn validate_fields(task: &Task) -> Option<SkipReason> {
    if !(PRIORITY_MIN..=PRIORITY_MAX).contains(&task.priority) {
        return Some(SkipReason::PriorityOutOfRange(task.priority));
    }
    if !task.effort_hours.is_finite() || task.effort_hours <= 0.0 {
        return Some(SkipReason::InvalidEffort(task.effort_hours));
    }
    None
}

/// Fractional hours to a second-precision duration. Keeping the cursor in
/// absolute timestamps (never re-derived wall-clock fields) avoids
/// accumulating rounding error over many tasks.
fn effort_duration(hours: f64) -> Duration {
    Duration::seconds((hours * 3600.0).round() as i64)
}

fn pack(tasks: &[Task], window: &DayWindow, break_minutes: i64) -> ScheduleResult {
    let mut skipped = Vec::new();
    let mut candidates: Vec<Task> = Vec::new();

    for task in tasks.iter().filter(|t| !t.completed) {
        match validate_fields(task) {
            Some(reason) => skipped.push(SkippedTask {
                task: task.clone(),
                reason,
            }),
            None => candidates.push(task.clone()),
        }
    }

    // Stable sort: equal scores keep their input order.
    candidates.sort_by(|a, b| {
        b.priority_score
            .partial_cmp(&a.priority_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let break_len = Duration::minutes(break_minutes);
    let mut current = window.start;
    let mut scheduled = Vec::new();
    let mut unscheduled = Vec::new();

    for mut task in candidates {
        let candidate_end = current + effort_duration(task.effort_hours);
        if candidate_end <= window.end {
            task.scheduled_start = Some(current);
            task.scheduled_end = Some(candidate_end);
            scheduled.push(ScheduledTask {
                start: current,
                end: candidate_end,
                task,
            });
            current = candidate_end + break_len;
        } else {
            // First-fit by priority: a task that does not fit is set aside
            // without moving the cursor, so a smaller lower-priority task can
            // still use the remaining space.
            task.scheduled_start = None;
            task.scheduled_end = None;
            unscheduled.push(task);
        }
    }

    ScheduleResult {
        scheduled,
        unscheduled,
        skipped,
    }
}
