// Database service module
// SQLite connection wrapper and schema management

mod connection;
pub mod migrations;
mod schema;

pub use connection::{Database, BUSY_TIMEOUT};

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn table_exists(db: &Database, name: &str) -> bool {
        let count: i64 = db
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?",
                [name],
                |row| row.get(0),
            )
            .unwrap();
        count == 1
    }

    #[test]
    fn test_new_database_in_memory() {
        let result = Database::new(":memory:");
        assert!(result.is_ok(), "Should create in-memory database");
    }

    #[test]
    fn test_new_database_with_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let result = Database::new(&db_path);
        assert!(result.is_ok(), "Should create file-based database");
        assert!(db_path.exists(), "Database file should exist");
    }

    #[test]
    fn test_open_failure_names_the_path() {
        let err = Database::new(Path::new("/nonexistent/dir/tasks.db")).err().unwrap();
        assert!(format!("{:#}", err).contains("/nonexistent/dir/tasks.db"));
    }

    #[test]
    fn test_busy_timeout_is_set() {
        let db = Database::new(":memory:").unwrap();

        let timeout_ms: i64 = db
            .connection()
            .query_row("PRAGMA busy_timeout", [], |row| row.get(0))
            .unwrap();

        assert_eq!(timeout_ms, BUSY_TIMEOUT.as_millis() as i64);
    }

    #[test]
    fn test_initialize_schema_creates_tables() {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();

        for table in ["users", "tasks", "sessions"] {
            assert!(table_exists(&db, table), "{} table should exist", table);
        }
    }

    #[test]
    fn test_initialize_schema_is_idempotent() {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        assert!(db.initialize_schema().is_ok());
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let db = Database::new(":memory:").unwrap();

        let enabled: i64 = db
            .connection()
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();

        assert_eq!(enabled, 1, "Foreign keys should be enabled");
    }

    #[test]
    fn test_task_requires_existing_user() {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();

        let result = db.connection().execute(
            "INSERT INTO tasks (user_id, title, deadline, reminder_type, reminder_interval)
             VALUES (42, 'Orphan', '2024-01-01T00:00:00Z', 'email', 5)",
            [],
        );
        assert!(result.is_err(), "Orphan task should violate the foreign key");
    }

    #[test]
    fn test_task_status_is_constrained() {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        db.connection()
            .execute(
                "INSERT INTO users (username, email, password_hash, created_at)
                 VALUES ('ada', 'ada@example.com', 'x', '2024-01-01T00:00:00Z')",
                [],
            )
            .unwrap();

        let result = db.connection().execute(
            "INSERT INTO tasks (user_id, title, deadline, status, reminder_type, reminder_interval)
             VALUES (1, 'Odd', '2024-01-01T00:00:00Z', 'archived', 'email', 5)",
            [],
        );
        assert!(result.is_err(), "Unknown status should be rejected");
    }
}
