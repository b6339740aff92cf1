//! Task record model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a task.
pub type TaskId = Uuid;

/// Time of day parsed from task text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TaskTime {
    /// Hour in 24-hour form (0-23).
    pub hour: u8,
    /// Minute (0-59).
    pub minute: u8,
}

impl TaskTime {
    /// Build a time, returning None when either field is out of range.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self { hour, minute })
    }

    /// Minutes since midnight, the key used for schedule ordering.
    pub fn minutes_of_day(&self) -> u16 {
        u16::from(self.hour) * 60 + u16::from(self.minute)
    }
}

/// Column a task sits in on the status board.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// All statuses in board column order.
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    /// Stable wire label.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Done => "done",
        }
    }

    /// Human-readable column heading.
    pub fn heading(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "To do",
            TaskStatus::InProgress => "In progress",
            TaskStatus::Done => "Done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a status label is not recognised.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown task status: {0} (expected todo, in-progress or done)")]
pub struct ParseStatusError(pub String);

impl FromStr for TaskStatus {
    type Err = ParseStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "todo" | "to-do" => Ok(TaskStatus::Todo),
            "in-progress" | "in_progress" | "inprogress" | "doing" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// A single user-entered task after parsing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskRecord {
    /// Task identifier.
    pub id: TaskId,
    /// Text exactly as entered.
    pub raw: String,
    /// Display title with the time removed.
    pub title: String,
    /// Parsed time of day, if any.
    pub time: Option<TaskTime>,
    /// Location label.
    pub location: String,
    /// Category label.
    pub category: String,
    /// Board column.
    #[serde(default)]
    pub status: TaskStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
