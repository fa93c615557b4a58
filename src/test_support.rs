// Shared fixtures for unit tests

use crate::services::database::Database;

pub(crate) fn setup_test_db() -> Database {
    let db = Database::new(":memory:").unwrap();
    db.initialize_schema().unwrap();
    db
}

/// Insert a user directly, bypassing registration. Returns the new id.
pub(crate) fn insert_user(db: &Database, username: &str) -> i64 {
    db.connection()
        .execute(
            "INSERT INTO users (username, email, password_hash, created_at)
             VALUES (?, ?, 'unused', '2024-01-01T00:00:00Z')",
            rusqlite::params![username, format!("{}@example.com", username)],
        )
        .unwrap();
    db.connection().last_insert_rowid()
}
