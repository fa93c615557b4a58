use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::Connection;

use super::board::{build_dashboard, partition_tasks, Dashboard, TaskBoard};
use crate::services::task::TaskService;

/// Reads a user's tasks and evaluates their countdowns.
///
/// Nothing is cached: every call reads the store and recomputes against
/// the supplied `now`.
pub struct CountdownService<'a> {
    conn: &'a Connection,
}

impl<'a> CountdownService<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Pending tasks with countdowns and the weekly due count.
    pub fn dashboard(&self, user_id: i64, now: DateTime<Utc>) -> Result<Dashboard> {
        let tasks = TaskService::new(self.conn).list_for_user(user_id)?;
        let dashboard = build_dashboard(tasks, now);
        log::debug!(
            "Dashboard for user {}: {} pending, {} due this week",
            user_id,
            dashboard.tasks.len(),
            dashboard.weekly_tasks
        );
        Ok(dashboard)
    }

    /// Pending and completed tasks, each list in display order.
    pub fn task_board(&self, user_id: i64, now: DateTime<Utc>) -> Result<TaskBoard> {
        let tasks = TaskService::new(self.conn).list_for_user(user_id)?;
        Ok(partition_tasks(tasks, now))
    }
}
