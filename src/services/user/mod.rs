//! Account registration and login.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};

use crate::models::user::{Registration, User, UserError};
use crate::services::auth::CredentialVerifier;
use crate::utils::date::{from_storage, to_storage};

/// Service for user accounts stored in SQLite.
pub struct UserService<'a> {
    conn: &'a Connection,
    verifier: &'a dyn CredentialVerifier,
}

fn map_user_row(row: &Row<'_>) -> Result<User, rusqlite::Error> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        created_at: from_storage(&row.get::<_, String>(3)?),
    })
}

impl<'a> UserService<'a> {
    pub fn new(conn: &'a Connection, verifier: &'a dyn CredentialVerifier) -> Self {
        Self { conn, verifier }
    }

    /// Create an account. The password is stored only in verifier form.
    pub fn register(&self, form: &Registration, now: DateTime<Utc>) -> Result<User> {
        form.validate().map_err(UserError::Invalid)?;

        let username = form.username.trim();
        let email = form.email.trim().to_lowercase();
        let credential = self.verifier.hash(&form.password);

        let inserted = self.conn.execute(
            "INSERT INTO users (username, email, password_hash, created_at) VALUES (?, ?, ?, ?)",
            params![username, email, credential, to_storage(now)],
        );

        match inserted {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                return Err(UserError::AlreadyExists.into());
            }
            Err(e) => return Err(anyhow::Error::new(e).context("Failed to insert user")),
        }

        let id = self.conn.last_insert_rowid();
        log::info!("Registered user {} ({})", id, username);

        self.get(id)?
            .ok_or_else(|| anyhow::anyhow!("User {} missing right after insert", id))
    }

    /// Check credentials. Unknown email and wrong password fail the same way.
    pub fn login(&self, email: &str, password: &str) -> Result<User> {
        let row = self
            .conn
            .query_row(
                "SELECT id, username, email, created_at, password_hash FROM users WHERE email = ?",
                [email.trim().to_lowercase()],
                |row| Ok((map_user_row(row)?, row.get::<_, String>(4)?)),
            )
            .optional()
            .context("Failed to load user")?;

        match row {
            Some((user, stored)) if self.verifier.verify(password, &stored) => {
                log::info!("User {} logged in", user.id);
                Ok(user)
            }
            _ => {
                log::debug!("Rejected login attempt");
                Err(UserError::InvalidCredentials.into())
            }
        }
    }

    pub fn get(&self, id: i64) -> Result<Option<User>> {
        self.conn
            .query_row(
                "SELECT id, username, email, created_at FROM users WHERE id = ?",
                [id],
                map_user_row,
            )
            .optional()
            .context("Failed to load user")
    }
}
