use super::shared::{map_task_row, TASK_COLUMNS};
use super::TaskService;
use crate::models::task::{NewTask, Task, TaskError, TaskStatus};
use crate::utils::date::to_storage;
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};

impl<'a> TaskService<'a> {
    /// Store a new pending task for `user_id`, created at `now`.
    pub fn create(&self, user_id: i64, task: NewTask, now: DateTime<Utc>) -> Result<Task> {
        task.validate().map_err(TaskError::Invalid)?;

        self.conn
            .execute(
                "INSERT INTO tasks (
                    user_id, title, description, deadline, status,
                    reminder_type, reminder_interval, created_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    user_id,
                    task.title.trim(),
                    task.description,
                    to_storage(task.deadline),
                    TaskStatus::Pending.as_str(),
                    task.reminder_type.as_str(),
                    task.reminder_interval,
                    to_storage(now),
                ],
            )
            .context("Failed to insert task")?;

        let id = self.conn.last_insert_rowid();
        log::debug!("Created task {} for user {}", id, user_id);

        // Read back so the caller sees exactly what later reads will return
        self.get(user_id, id)?
            .ok_or_else(|| anyhow!("Task {} missing right after insert", id))
    }

    /// Retrieve a task by ID, only if it belongs to `user_id`.
    pub fn get(&self, user_id: i64, id: i64) -> Result<Option<Task>> {
        let sql = format!(
            "SELECT {} FROM tasks WHERE id = ? AND user_id = ?",
            TASK_COLUMNS
        );
        self.conn
            .query_row(&sql, params![id, user_id], map_task_row)
            .optional()
            .context("Failed to load task")
    }

    /// Mark a pending task as completed.
    ///
    /// Fails with [`TaskError::NotFound`] for unknown or foreign tasks and
    /// [`TaskError::AlreadyCompleted`] when there is nothing to do.
    pub fn complete(&self, user_id: i64, id: i64) -> Result<Task> {
        let mut task = self.get(user_id, id)?.ok_or(TaskError::NotFound(id))?;
        task.complete()?;

        let rows_affected = self
            .conn
            .execute(
                "UPDATE tasks SET status = ?
                 WHERE id = ? AND user_id = ? AND status = ?",
                params![
                    TaskStatus::Completed.as_str(),
                    id,
                    user_id,
                    TaskStatus::Pending.as_str()
                ],
            )
            .context("Failed to complete task")?;

        if rows_affected == 0 {
            return Err(TaskError::AlreadyCompleted(id).into());
        }

        log::debug!("Completed task {} for user {}", id, user_id);
        Ok(task)
    }
}
