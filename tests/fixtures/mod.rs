// Test fixtures - reusable test data
// Provides consistent instants and tasks across integration tests

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use task_reminder::models::task::{ReminderType, Task, TaskStatus};

/// Sample instants for testing
pub mod dates {
    use super::*;

    /// Returns Jan 1, 2024 at midnight UTC
    pub fn new_year_2024() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    /// Returns Feb 29, 2024 at noon UTC (leap day)
    pub fn leap_day_2024() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap()
    }
}

/// Sample tasks for testing
pub mod tasks {
    use super::*;

    pub fn task(id: i64, deadline: DateTime<Utc>, status: TaskStatus) -> Task {
        Task {
            id,
            user_id: 1,
            title: format!("Task {}", id),
            description: None,
            deadline: Some(deadline),
            status,
            reminder_type: ReminderType::Email,
            reminder_interval: 60,
            created_at: None,
        }
    }

    /// A pending task due `offset` after `now`.
    pub fn pending_in(id: i64, now: DateTime<Utc>, offset: Duration) -> Task {
        task(id, now + offset, TaskStatus::Pending)
    }
}
