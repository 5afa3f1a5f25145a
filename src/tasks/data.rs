use chrono::{DateTime, Utc};
use rocket::FromFormField;
use serde::{Deserialize, Serialize};

use std::fmt;

pub type TaskID = i64;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskID,
    pub text: String,
    pub deadline: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub favorite: bool,
    /// Set once the deadline reminder has fired; only an edit clears it.
    #[serde(default)]
    pub notified: bool,
}

#[derive(FromFormField, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    #[field(value = "all")]
    All,
    #[field(value = "active")]
    Active,
    #[field(value = "completed")]
    Completed,
    #[field(value = "favorite")]
    Favorite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeLeft {
    Expired,
    Remaining { days: i64, hours: i64, minutes: i64 },
}

impl fmt::Display for TimeLeft {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TimeLeft::Expired => write!(f, "Expired"),
            TimeLeft::Remaining {
                days,
                hours,
                minutes,
            } => write!(f, "{}d {}h {}m", days, hours, minutes),
        }
    }
}

/// A task together with the values derived from it at render time.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    #[serde(flatten)]
    pub task: Task,
    pub time_left: String,
    pub progress: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DailySummary {
    pub completed: usize,
    pub total: usize,
    pub percent: usize,
    pub message: String,
}

/// Current values of a task, used to prefill the add/update form.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub id: TaskID,
    pub text: String,
    pub deadline: DateTime<Utc>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AddTaskRequest {
    pub text: String,
    pub deadline: String,
    #[serde(default)]
    pub editing_id: Option<TaskID>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TaskIdRequest {
    pub task_id: TaskID,
}

#[derive(Serialize, Debug)]
pub struct ChangedResponse {
    pub changed: bool,
}
