//! Workday configuration: the user's schedulable window and break policy,
//! resolved to accurate timezone-aware UTC bounds.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// 24-hour wall-clock `HH:MM`; one- or two-digit hour, `00`-`23`.
const TIME_OF_DAY_PATTERN: &str = r"^([0-1]?[0-9]|2[0-3]):([0-5][0-9])$";

/// The user's configured workday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkdayConfig {
    /// Wall-clock `HH:MM`.
    pub start_time: String,
    /// Wall-clock `HH:MM`; must resolve after `start_time` on the same day.
    pub end_time: String,
    /// Minutes inserted between consecutive scheduled tasks (not before the
    /// first, not after the last).
    pub break_minutes: i64,
}

impl Default for WorkdayConfig {
    fn default() -> Self {
        Self {
            start_time: "09:00".to_string(),
            end_time: "17:00".to_string(),
            break_minutes: 15,
        }
    }
}

/// Absolute UTC bounds of one schedulable day.
///
/// `start < end` is established at construction; downstream code relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Parse a wall-clock time like "09:00" or "9:05".
pub fn parse_time_of_day(s: &str) -> Result<NaiveTime> {
    let re = Regex::new(TIME_OF_DAY_PATTERN).context("compile time-of-day pattern")?;
    let caps = re
        .captures(s.trim())
        .ok_or_else(|| anyhow::anyhow!("invalid time of day (expected HH:MM): {s:?}"))?;

    let hour: u32 = caps[1].parse()?;
    let minute: u32 = caps[2].parse()?;

    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| anyhow::anyhow!("invalid time of day: {s:?}"))
}

impl WorkdayConfig {
    /// Resolve this config against a calendar date in an IANA timezone,
    /// returning UTC bounds.
    ///
    /// Any violation is fatal to the planning call: a malformed time string,
    /// a negative break, a window that does not satisfy `start < end`, or a
    /// wall-clock time that is ambiguous/nonexistent on `date` (DST).
    pub fn resolve_window(&self, date: NaiveDate, tz: Tz) -> Result<DayWindow> {
        if self.break_minutes < 0 {
            bail!("break_minutes must be >= 0, got {}", self.break_minutes);
        }

        let start_time = parse_time_of_day(&self.start_time)
            .with_context(|| format!("workday start_time {:?}", self.start_time))?;
        let end_time = parse_time_of_day(&self.end_time)
            .with_context(|| format!("workday end_time {:?}", self.end_time))?;

        let start = resolve_local(date, start_time, tz)?;
        let end = resolve_local(date, end_time, tz)?;

        if start >= end {
            bail!(
                "workday must start before it ends: {} >= {} on {}",
                self.start_time,
                self.end_time,
                date
            );
        }

        Ok(DayWindow { start, end })
    }
}

fn resolve_local(date: NaiveDate, time: NaiveTime, tz: Tz) -> Result<DateTime<Utc>> {
    let ndt = date.and_time(time);
    let local = tz
        .from_local_datetime(&ndt)
        .single()
        .ok_or_else(|| anyhow::anyhow!("ambiguous or invalid local time (DST?): {ndt} {tz}"))?;
    Ok(local.with_timezone(&Utc))
}
