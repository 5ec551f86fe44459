use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use std::cmp::Ordering;
use std::path::PathBuf;

use zenjourney_core::{SkipReason, Task, schedule_day};

mod config;
mod import;
mod state;

#[derive(Parser, Debug)]
#[command(name = "zenjourney", version, about = "ZenJourney day-planning CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// One-time setup: write a default config to ~/.zenjourney/config.toml
    Init,

    /// Rank tasks by priority score without packing a day
    Score {
        /// JSON task file (default: ./tasks.json)
        #[arg(long)]
        tasks: Option<PathBuf>,

        /// Limit number of rows printed (default: 10)
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Pack tasks into the configured workday window
    Plan {
        /// JSON task file (default: ./tasks.json)
        #[arg(long)]
        tasks: Option<PathBuf>,

        /// Optional CSV of task records to merge in
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Reference date, YYYY-MM-DD (default: today in the configured timezone)
        #[arg(long)]
        date: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Init => config::init_config()?,
        Command::Score { tasks, limit } => score_tasks(tasks, limit)?,
        Command::Plan { tasks, csv, date } => plan(tasks, csv, date)?,
    }

    Ok(())
}

fn parse_timezone(tz: &str) -> Result<Tz> {
    tz.parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone in config: {tz}"))
}

fn load_tasks(
    tasks: Option<PathBuf>,
    csv: Option<PathBuf>,
    now: chrono::DateTime<Utc>,
) -> Result<Vec<Task>> {
    let mut out = Vec::new();

    match tasks {
        Some(p) => out.extend(import::load_json_tasks(&p, now)?),
        None => {
            let p = state::default_tasks_file();
            if p.exists() {
                out.extend(import::load_json_tasks(&p, now)?);
            }
        }
    }

    if let Some(p) = csv {
        out.extend(import::load_csv_tasks(&p, now)?);
    }

    if out.is_empty() {
        bail!("no tasks to work with (pass --tasks <file> or --csv <file>)");
    }

    Ok(out)
}

fn score_tasks(tasks: Option<PathBuf>, limit: usize) -> Result<()> {
    let now = Utc::now();
    let mut tasks = load_tasks(tasks, None, now)?;

    tasks.sort_by(|a, b| {
        b.priority_score
            .partial_cmp(&a.priority_score)
            .unwrap_or(Ordering::Equal)
    });

    println!("# Task ranking\n");
    for t in tasks.iter().take(limit) {
        println!(
            "- score={:.2} | [P{}] {} | {:.1}h",
            t.priority_score, t.priority, t.title, t.effort_hours
        );
    }

    Ok(())
}

fn plan(tasks: Option<PathBuf>, csv: Option<PathBuf>, date: Option<String>) -> Result<()> {
    let cfg = config::load_config()?;
    let tz = parse_timezone(&cfg.timezone)?;
    let now = Utc::now();

    let date = match date {
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .with_context(|| format!("invalid --date {s:?} (want YYYY-MM-DD)"))?,
        None => now.with_timezone(&tz).date_naive(),
    };

    let tasks = load_tasks(tasks, csv, now)?;
    let result = schedule_day(&tasks, &cfg.workday, date, tz)?;

    println!("# Plan for {} ({})\n", date, cfg.timezone);
    println!(
        "Workday {}-{}, {}-minute breaks\n",
        cfg.workday.start_time, cfg.workday.end_time, cfg.workday.break_minutes
    );

    println!("## Scheduled\n");
    if result.scheduled.is_empty() {
        println!("(nothing fits; check the workday window)");
    }
    for block in &result.scheduled {
        println!(
            "- {}-{} | [P{}] {} (score {:.2})",
            block.start.with_timezone(&tz).format("%H:%M"),
            block.end.with_timezone(&tz).format("%H:%M"),
            block.task.priority,
            block.task.title,
            block.task.priority_score,
        );
    }

    if !result.unscheduled.is_empty() {
        println!("\n## Did not fit\n");
        for t in &result.unscheduled {
            println!(
                "- [P{}] {} ({:.1}h, score {:.2})",
                t.priority, t.title, t.effort_hours, t.priority_score
            );
        }
    }

    if !result.skipped.is_empty() {
        println!("\n## Warnings\n");
        for s in &result.skipped {
            println!("- {} skipped: {}", s.task.id, skip_reason_label(&s.reason));
        }
    }

    Ok(())
}

fn skip_reason_label(reason: &SkipReason) -> String {
    match reason {
        SkipReason::PriorityOutOfRange(p) => format!("priority {p} is outside 1-5"),
        SkipReason::InvalidEffort(h) => format!("effort {h}h is not a positive number"),
    }
}
