use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

use std::collections::HashSet;

use crate::internal_error::Rejection;

use super::data::*;

const MINUTE_MILLIS: i64 = 60 * 1000;
const HOUR_MILLIS: i64 = 60 * MINUTE_MILLIS;
const DAY_MILLIS: i64 = 24 * HOUR_MILLIS;

/// Accepts RFC 3339, or the `datetime-local` form value in server local time.
pub fn parse_deadline(input: &str) -> Result<DateTime<Utc>, Rejection> {
    let input = input.trim();

    if let Ok(deadline) = DateTime::parse_from_rfc3339(input) {
        return Ok(deadline.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M"))
        .map_err(|_| Rejection::InvalidDeadline(input.to_string()))?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|deadline| deadline.with_timezone(&Utc))
        .ok_or_else(|| Rejection::InvalidDeadline(input.to_string()))
}

/// Ids come from the creation time in milliseconds; a collision moves past
/// the largest id in the collection. If that would overflow, the smallest
/// non-negative id not yet taken is used instead.
pub fn next_task_id(tasks: &[Task], now: DateTime<Utc>) -> TaskID {
    let candidate = now.timestamp_millis();

    match tasks.iter().map(|t| t.id).max() {
        Some(max_id) if max_id >= candidate => max_id
            .checked_add(1)
            .unwrap_or_else(|| smallest_unused_id(tasks)),
        _ => candidate,
    }
}

fn smallest_unused_id(tasks: &[Task]) -> TaskID {
    let taken: HashSet<TaskID> = tasks.iter().map(|t| t.id).collect();
    (0..).find(|id: &TaskID| !taken.contains(id)).unwrap_or_default()
}

pub fn matches_filter(task: &Task, filter: Filter) -> bool {
    match filter {
        Filter::All => true,
        Filter::Active => !task.done,
        Filter::Completed => task.done,
        Filter::Favorite => task.favorite,
    }
}

pub fn filter_tasks(tasks: &[Task], filter: Filter) -> Vec<Task> {
    let mut filtered: Vec<Task> = tasks
        .iter()
        .filter(|t| matches_filter(t, filter))
        .cloned()
        .collect();

    // sort_by_key is stable
    filtered.sort_by_key(|t| !t.favorite);

    filtered
}

pub fn time_left(task: &Task, now: DateTime<Utc>) -> TimeLeft {
    let diff = (task.deadline - now).num_milliseconds();

    if diff <= 0 {
        return TimeLeft::Expired;
    }

    TimeLeft::Remaining {
        days: diff / DAY_MILLIS,
        hours: (diff / HOUR_MILLIS) % 24,
        minutes: (diff / MINUTE_MILLIS) % 60,
    }
}

pub fn progress(task: &Task, now: DateTime<Utc>) -> f64 {
    let total = (task.deadline - task.created_at).num_milliseconds();

    if total <= 0 {
        return 100.0;
    }

    let passed = (now - task.created_at).num_milliseconds();

    (passed as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
}

pub fn daily_summary(tasks: &[Task]) -> DailySummary {
    let completed = tasks.iter().filter(|t| t.done).count();
    let total = tasks.len();
    let percent = if total == 0 {
        0
    } else {
        (completed * 100 + total / 2) / total
    };

    DailySummary {
        completed,
        total,
        percent,
        message: format!(
            "You completed {} of {} tasks – {}%",
            completed, total, percent
        ),
    }
}

pub fn task_view(task: &Task, now: DateTime<Utc>) -> TaskView {
    TaskView {
        task: task.clone(),
        time_left: time_left(task, now).to_string(),
        progress: progress(task, now),
    }
}
