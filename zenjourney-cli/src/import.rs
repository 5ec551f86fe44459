//! Task-record adapters: coerce storage-shaped JSON/CSV records into
//! canonical core tasks before the scheduler ever sees them.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

use zenjourney_core::{PRIORITY_MIN, Task, compute_priority_score};

/// Storage-shaped task record. Everything the scorer needs is optional; a
/// record missing a field still loads and simply ranks last (score 0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub effort_hours: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: bool,
}

impl TaskRecord {
    /// Coerce into the canonical core task, scoring at `now`.
    ///
    /// Missing fields are defaulted into range so the packer does not reject
    /// the record outright; the degenerate score already ranks it last.
    pub fn into_task(self, now: DateTime<Utc>) -> Task {
        let score = compute_priority_score(
            self.priority.map(f64::from),
            self.effort_hours,
            self.created_at,
            now,
        );
        let mut task = Task::new(self.id, self.title, self.created_at.unwrap_or(now))
            .with_priority(self.priority.unwrap_or(PRIORITY_MIN))
            .with_effort_hours(self.effort_hours.unwrap_or(1.0))
            .with_completed(self.completed);
        task.priority_score = score;
        task
    }
}

/// Load records from a JSON array file.
pub fn load_json_tasks(path: impl AsRef<Path>, now: DateTime<Utc>) -> Result<Vec<Task>> {
    let path = path.as_ref();
    let s = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let records: Vec<TaskRecord> =
        serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
    Ok(records.into_iter().map(|r| r.into_task(now)).collect())
}

/// Load records from a CSV export with columns
/// `id,title,priority,effort_hours,created_at,completed`.
pub fn load_csv_tasks(path: impl AsRef<Path>, now: DateTime<Utc>) -> Result<Vec<Task>> {
    let rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;
    csv_to_tasks(rdr, now)
}

/// Rows without an id are skipped; unparseable cells degrade to missing
/// fields (and thus to a degenerate score) rather than failing the import.
fn csv_to_tasks<R: Read>(mut rdr: csv::Reader<R>, now: DateTime<Utc>) -> Result<Vec<Task>> {
    let mut tasks = Vec::new();
    for result in rdr.records() {
        let record = result?;

        let id = record.get(0).unwrap_or("").trim();
        if id.is_empty() {
            continue;
        }

        let rec = TaskRecord {
            id: id.to_string(),
            title: record.get(1).unwrap_or("").trim().to_string(),
            priority: record.get(2).and_then(|v| v.trim().parse().ok()),
            effort_hours: record.get(3).and_then(|v| v.trim().parse().ok()),
            created_at: record.get(4).and_then(parse_created_at),
            completed: record
                .get(5)
                .map(|v| v.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        };
        tasks.push(rec.into_task(now));
    }
    Ok(tasks)
}

/// Accept RFC3339 timestamps or bare `YYYY-MM-DD` dates (midnight UTC).
fn parse_created_at(v: &str) -> Option<DateTime<Utc>> {
    let v = v.trim();
    if v.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(v) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(v, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}
