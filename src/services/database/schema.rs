use anyhow::{Context, Result};
use rusqlite::Connection;

use super::migrations;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_users_table(conn)?;
    create_tasks_table(conn)?;
    run_tasks_migrations(conn)?;
    create_sessions_table(conn)?;
    Ok(())
}

fn create_users_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TEXT NOT NULL
        )",
        [],
    )
    .context("Failed to create users table")?;

    Ok(())
}

fn create_tasks_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            title TEXT NOT NULL,
            description TEXT,
            deadline TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending'
                CHECK (status IN ('pending', 'completed')),
            reminder_type TEXT NOT NULL DEFAULT 'email',
            reminder_interval INTEGER NOT NULL DEFAULT 60,
            created_at TEXT NOT NULL DEFAULT '',
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
        )",
        [],
    )
    .context("Failed to create tasks table")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_tasks_user_status_deadline
         ON tasks(user_id, status, deadline)",
        [],
    )
    .context("Failed to create tasks index")?;

    Ok(())
}

fn run_tasks_migrations(conn: &Connection) -> Result<()> {
    // Files from the first schema have no created_at; an empty value
    // decodes as unknown.
    migrations::ensure_column(
        conn,
        "tasks",
        "created_at",
        "ALTER TABLE tasks ADD COLUMN created_at TEXT NOT NULL DEFAULT ''",
    )?;

    Ok(())
}

fn create_sessions_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS sessions (
            token TEXT PRIMARY KEY,
            user_id INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            expires_at TEXT NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
        )",
        [],
    )
    .context("Failed to create sessions table")?;

    Ok(())
}
