use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;

use super::credentials::to_hex;
use crate::utils::date::{from_storage, to_storage};

const TOKEN_BYTES: usize = 32;

/// A logged-in user's bearer token and its lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Sessions persisted in the `sessions` table.
pub struct SessionService<'a> {
    conn: &'a Connection,
}

impl<'a> SessionService<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Issue a fresh token for `user_id`, valid for `ttl` from `now`.
    pub fn create(&self, user_id: i64, now: DateTime<Utc>, ttl: Duration) -> Result<Session> {
        let token_bytes: [u8; TOKEN_BYTES] = rand::random();
        let created_at = trim_to_storage(now);
        let expires_at = created_at
            .checked_add_signed(ttl)
            .ok_or_else(|| anyhow!("Session lifetime {} overflows from {}", ttl, created_at))?;
        let session = Session {
            token: to_hex(&token_bytes),
            user_id,
            created_at,
            expires_at,
        };

        self.conn
            .execute(
                "INSERT INTO sessions (token, user_id, created_at, expires_at) VALUES (?, ?, ?, ?)",
                params![
                    session.token,
                    session.user_id,
                    to_storage(session.created_at),
                    to_storage(session.expires_at),
                ],
            )
            .context("Failed to insert session")?;

        Ok(session)
    }

    /// Look up a live session. Expired or unreadable sessions are removed
    /// and resolve to `None`.
    pub fn resolve(&self, token: &str, now: DateTime<Utc>) -> Result<Option<Session>> {
        let row = self
            .conn
            .query_row(
                "SELECT user_id, created_at, expires_at FROM sessions WHERE token = ?",
                [token],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()
            .context("Failed to load session")?;

        let Some((user_id, created_at, expires_at)) = row else {
            return Ok(None);
        };

        let session = match (from_storage(&created_at), from_storage(&expires_at)) {
            (Some(created_at), Some(expires_at)) => Session {
                token: token.to_string(),
                user_id,
                created_at,
                expires_at,
            },
            _ => {
                log::warn!("Dropping session for user {} with unreadable times", user_id);
                self.revoke(token)?;
                return Ok(None);
            }
        };

        if session.is_expired(now) {
            log::debug!("Session for user {} expired at {}", user_id, session.expires_at);
            self.revoke(token)?;
            return Ok(None);
        }

        Ok(Some(session))
    }

    /// Remove a session. Returns whether it existed.
    pub fn revoke(&self, token: &str) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM sessions WHERE token = ?", [token])
            .context("Failed to delete session")?;
        Ok(rows > 0)
    }

    /// Remove every session that has expired by `now`.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize> {
        let rows = self
            .conn
            .execute(
                "DELETE FROM sessions WHERE expires_at <= ?",
                [to_storage(now)],
            )
            .context("Failed to purge sessions")?;
        if rows > 0 {
            log::info!("Purged {} expired sessions", rows);
        }
        Ok(rows)
    }
}

/// Drop sub-second precision so the value matches what the store returns.
fn trim_to_storage(dt: DateTime<Utc>) -> DateTime<Utc> {
    from_storage(&to_storage(dt)).unwrap_or(dt)
}
