//! zenjourney-core: priority scoring and single-day schedule packing.
//!
//! Pure, synchronous, storage-agnostic. Collaborators (CLI, sync layers)
//! supply canonical [`Task`] records and a [`WorkdayConfig`]; the core hands
//! back a [`ScheduleResult`] and never performs I/O of its own.

pub mod score;
pub mod scheduler;
pub mod task;
pub mod workday;

pub use score::{compute_priority_score, refresh_scores};
pub use scheduler::{
    ScheduleResult, ScheduledTask, SkipReason, SkippedTask, plan_day, schedule_day,
};
pub use task::{PRIORITY_MAX, PRIORITY_MIN, Task};
pub use workday::{DayWindow, WorkdayConfig, parse_time_of_day};
