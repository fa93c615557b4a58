//! Task service entry point.
//! Database-backed task operations split across focused submodules.
//! Tasks are never deleted; the only mutation is completion.

use rusqlite::Connection;

pub mod crud;
pub mod queries;
mod shared;

/// Service for managing tasks stored in SQLite.
pub struct TaskService<'a> {
    pub(crate) conn: &'a Connection,
}

impl<'a> TaskService<'a> {
    /// Create a new TaskService with a database connection
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}
