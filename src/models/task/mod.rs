// Task module
// A user's task with a fixed deadline and reminder preferences

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Longest accepted task title, in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Lifecycle state of a task. The only transition is `Pending -> Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            other => Err(format!("Unknown task status: {}", other)),
        }
    }
}

/// How the user wants to be reminded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderType {
    Email,
    Notification,
}

impl ReminderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Notification => "notification",
        }
    }
}

impl fmt::Display for ReminderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReminderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "email" => Ok(Self::Email),
            "notification" => Ok(Self::Notification),
            other => Err(format!("Unknown reminder type: {}", other)),
        }
    }
}

/// Failures of task operations that callers are expected to handle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("invalid task: {0}")]
    Invalid(String),
    #[error("task {0} not found")]
    NotFound(i64),
    #[error("task {0} is already completed")]
    AlreadyCompleted(i64),
}

/// A persisted task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    /// `None` when the stored value could not be decoded. Such tasks are
    /// treated as overdue.
    pub deadline: Option<DateTime<Utc>>,
    pub status: TaskStatus,
    pub reminder_type: ReminderType,
    /// Minutes between reminders.
    pub reminder_interval: u32,
    pub created_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn is_pending(&self) -> bool {
        self.status == TaskStatus::Pending
    }

    /// Apply the `pending -> completed` transition.
    pub fn complete(&mut self) -> Result<(), TaskError> {
        if self.status == TaskStatus::Completed {
            return Err(TaskError::AlreadyCompleted(self.id));
        }
        self.status = TaskStatus::Completed;
        Ok(())
    }
}

/// A task as submitted by its owner, before it is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub deadline: DateTime<Utc>,
    pub reminder_type: ReminderType,
    pub reminder_interval: u32,
}

impl NewTask {
    /// Create a new task with required fields
    ///
    /// # Examples
    /// ```
    /// use task_reminder::models::task::{NewTask, ReminderType};
    /// use chrono::{Duration, Utc};
    ///
    /// let deadline = Utc::now() + Duration::days(3);
    /// let task = NewTask::new("File taxes", deadline, ReminderType::Email, 60).unwrap();
    /// assert!(task.description.is_none());
    /// ```
    pub fn new(
        title: impl Into<String>,
        deadline: DateTime<Utc>,
        reminder_type: ReminderType,
        reminder_interval: u32,
    ) -> Result<Self, String> {
        let task = Self {
            title: title.into(),
            description: None,
            deadline,
            reminder_type,
            reminder_interval,
        };
        task.validate()?;
        Ok(task)
    }

    /// Set the description. Blank text clears it.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = if description.trim().is_empty() {
            None
        } else {
            Some(description)
        };
        self
    }

    /// Validate the task
    pub fn validate(&self) -> Result<(), String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("Task title cannot be empty".to_string());
        }

        if title.chars().count() > MAX_TITLE_LEN {
            return Err(format!(
                "Task title cannot be longer than {} characters",
                MAX_TITLE_LEN
            ));
        }

        if self.reminder_interval == 0 {
            return Err("Reminder interval must be at least one minute".to_string());
        }

        Ok(())
    }
}
