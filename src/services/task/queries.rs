use super::shared::{map_task_row, TASK_COLUMNS};
use super::TaskService;
use crate::models::task::{Task, TaskStatus};
use anyhow::{Context, Result};
use rusqlite::params;

impl<'a> TaskService<'a> {
    /// Every task owned by `user_id`, ordered by deadline.
    pub fn list_for_user(&self, user_id: i64) -> Result<Vec<Task>> {
        let sql = format!(
            "SELECT {} FROM tasks WHERE user_id = ? ORDER BY deadline ASC, id ASC",
            TASK_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;

        let tasks = stmt
            .query_map([user_id], map_task_row)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to list tasks")?;

        Ok(tasks)
    }

    /// Tasks in one status. Pending tasks come soonest deadline first,
    /// completed ones latest deadline first.
    pub fn list_by_status(&self, user_id: i64, status: TaskStatus) -> Result<Vec<Task>> {
        let order = match status {
            TaskStatus::Pending => "deadline ASC, id ASC",
            TaskStatus::Completed => "deadline DESC, id ASC",
        };
        let sql = format!(
            "SELECT {} FROM tasks WHERE user_id = ? AND status = ? ORDER BY {}",
            TASK_COLUMNS, order
        );
        let mut stmt = self.conn.prepare(&sql)?;

        let tasks = stmt
            .query_map(params![user_id, status.as_str()], map_task_row)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to list tasks by status")?;

        Ok(tasks)
    }
}
