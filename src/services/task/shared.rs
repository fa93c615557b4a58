use rusqlite::types::Type;
use rusqlite::{self, Row};

use crate::models::task::{ReminderType, Task, TaskStatus};
use crate::utils::date::from_storage;

pub(crate) const TASK_COLUMNS: &str = "id, user_id, title, description, deadline, status,
    reminder_type, reminder_interval, created_at";

fn conversion_error(idx: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, message.into())
}

pub(crate) fn map_task_row(row: &Row<'_>) -> Result<Task, rusqlite::Error> {
    let id: i64 = row.get(0)?;

    let raw_deadline: String = row.get(4)?;
    let deadline = from_storage(&raw_deadline);
    if deadline.is_none() {
        log::warn!(
            "Task {} has an unreadable deadline {:?}; treating it as overdue",
            id,
            raw_deadline
        );
    }

    let status = row
        .get::<_, String>(5)?
        .parse::<TaskStatus>()
        .map_err(|e| conversion_error(5, e))?;
    let reminder_type = row
        .get::<_, String>(6)?
        .parse::<ReminderType>()
        .map_err(|e| conversion_error(6, e))?;
    let reminder_interval = u32::try_from(row.get::<_, i64>(7)?)
        .map_err(|e| conversion_error(7, e.to_string()))?;

    Ok(Task {
        id,
        user_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        deadline,
        status,
        reminder_type,
        reminder_interval,
        created_at: from_storage(&row.get::<_, String>(8)?),
    })
}
