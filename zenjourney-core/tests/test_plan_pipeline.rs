use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::UTC;
use serde::Deserialize;
use zenjourney_core::{
    Task, WorkdayConfig, compute_priority_score, plan_day, refresh_scores, schedule_day,
};

/// Storage-shaped record, as a sync layer would hand it over.
#[derive(Debug, Deserialize)]
struct StoredTask {
    id: String,
    title: String,
    priority: Option<i32>,
    effort_hours: Option<f64>,
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    completed: bool,
}

fn stored_to_task(rec: StoredTask, now: DateTime<Utc>) -> Task {
    let score = compute_priority_score(
        rec.priority.map(f64::from),
        rec.effort_hours,
        rec.created_at,
        now,
    );
    let mut task = Task::new(rec.id, rec.title, rec.created_at.unwrap_or(now))
        .with_priority(rec.priority.unwrap_or(1))
        .with_effort_hours(rec.effort_hours.unwrap_or(1.0))
        .with_completed(rec.completed);
    task.priority_score = score;
    task
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 6, 8, 0, 0).unwrap()
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()
}

fn fixture_tasks(json: &str) -> Vec<Task> {
    let records: Vec<StoredTask> = serde_json::from_str(json).unwrap();
    records.into_iter().map(|r| stored_to_task(r, now())).collect()
}

/// The three-task first-fit scenario, driven end to end from JSON records.
#[test]
fn test_plan_from_stored_records_first_fit() {
    let tasks = fixture_tasks(
        r#"[
            {"id": "a", "title": "deep work", "priority": 5, "effort_hours": 2.0,
             "created_at": "2026-08-06T08:00:00Z"},
            {"id": "b", "title": "also big", "priority": 4, "effort_hours": 2.0,
             "created_at": "2026-08-06T08:00:00Z"},
            {"id": "c", "title": "small errand", "priority": 1, "effort_hours": 1.0,
             "created_at": "2026-08-06T08:00:00Z"}
        ]"#,
    );

    let config = WorkdayConfig {
        start_time: "09:00".to_string(),
        end_time: "12:00".to_string(),
        break_minutes: 0,
    };

    let res = schedule_day(&tasks, &config, date(), UTC).unwrap();

    let scheduled: Vec<&str> = res.scheduled.iter().map(|s| s.task.id.as_str()).collect();
    assert_eq!(scheduled, vec!["a", "c"]);
    assert_eq!(res.unscheduled.len(), 1);
    assert_eq!(res.unscheduled[0].id, "b");

    // a: 09:00-11:00, c slots into the remaining hour.
    assert_eq!(res.scheduled[0].start, Utc.with_ymd_and_hms(2026, 8, 6, 9, 0, 0).unwrap());
    assert_eq!(res.scheduled[1].start, Utc.with_ymd_and_hms(2026, 8, 6, 11, 0, 0).unwrap());
    assert_eq!(res.scheduled[1].end, Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap());
}

/// A record with a missing priority loads at score 0 and ranks last, but
/// still schedules if there is room.
#[test]
fn test_degenerate_record_ranks_last_without_failing() {
    let tasks = fixture_tasks(
        r#"[
            {"id": "partial", "title": "imported stub", "priority": null,
             "effort_hours": 1.0, "created_at": null},
            {"id": "whole", "title": "real task", "priority": 3, "effort_hours": 1.0,
             "created_at": "2026-08-01T08:00:00Z"}
        ]"#,
    );

    assert_eq!(tasks[0].priority_score, 0.0);
    assert!(tasks[1].priority_score > 0.0);

    let config = WorkdayConfig {
        start_time: "09:00".to_string(),
        end_time: "17:00".to_string(),
        break_minutes: 15,
    };

    let res = schedule_day(&tasks, &config, date(), UTC).unwrap();
    let order: Vec<&str> = res.scheduled.iter().map(|s| s.task.id.as_str()).collect();
    assert_eq!(order, vec!["whole", "partial"]);
}

/// Aging moves a stale low-priority task ahead of a fresh heavyweight one.
#[test]
fn test_aging_prevents_starvation() {
    let tasks = vec![
        Task::new("fresh", "big launch task", now())
            .with_priority(5)
            .with_effort_hours(4.0),
        Task::new("stale", "two-week-old chore", now() - chrono::Duration::days(14))
            .with_priority(2)
            .with_effort_hours(0.5),
    ];

    let config = WorkdayConfig::default();
    let res = plan_day(&tasks, &config, date(), UTC, now()).unwrap();

    // 2/0.5 * 2.4 = 9.6 vs 5/4 * 1.0 = 1.25
    assert_eq!(res.scheduled[0].task.id, "stale");
    assert_eq!(res.scheduled[1].task.id, "fresh");
}

/// Running the same plan twice produces identical output, and refreshing at a
/// later instant only raises scores.
#[test]
fn test_idempotent_within_one_instant() {
    let mut tasks = fixture_tasks(
        r#"[
            {"id": "t1", "title": "write", "priority": 4, "effort_hours": 2.0,
             "created_at": "2026-07-30T08:00:00Z"},
            {"id": "t2", "title": "review", "priority": 3, "effort_hours": 1.0,
             "created_at": "2026-08-02T08:00:00Z"}
        ]"#,
    );

    let config = WorkdayConfig::default();
    let first = plan_day(&tasks, &config, date(), UTC, now()).unwrap();
    let second = plan_day(&tasks, &config, date(), UTC, now()).unwrap();
    assert_eq!(first, second);

    let before: Vec<f64> = tasks.iter().map(|t| t.priority_score).collect();
    refresh_scores(&mut tasks, now() + chrono::Duration::days(3));
    for (task, old) in tasks.iter().zip(before) {
        assert!(task.priority_score >= old);
    }
}

/// Full-day scenario: one 8-hour task consumes the whole window exactly.
#[test]
fn test_exact_fit_day() {
    let tasks = fixture_tasks(
        r#"[{"id": "marathon", "title": "all day", "priority": 3, "effort_hours": 8.0,
             "created_at": "2026-08-06T08:00:00Z"}]"#,
    );

    let res = schedule_day(&tasks, &WorkdayConfig::default(), date(), UTC).unwrap();
    assert_eq!(res.scheduled.len(), 1);
    assert!(res.unscheduled.is_empty());
    assert_eq!(
        res.scheduled[0].task.scheduled_end,
        Some(Utc.with_ymd_and_hms(2026, 8, 6, 17, 0, 0).unwrap())
    );
}
