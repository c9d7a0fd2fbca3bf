//! SQLite-backed session store.
//!
//! # Responsibility
//! - Persist session snapshots as JSON text in the `sessions` table.
//! - Keep SQL details inside the session persistence boundary.
//!
//! # Invariants
//! - The connection must be opened through `crate::db` so migrations ran.
//! - Stored text that no longer parses is reported, never silently dropped.

use crate::db::migrations::latest_version;
use crate::session::{
    expiry_from, now_epoch_ms, SessionId, SessionSnapshot, SessionStore, StoreError, StoreResult,
    DEFAULT_SESSION_MAX_AGE,
};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use std::time::Duration;

pub struct SqliteSessionStore<'conn> {
    conn: &'conn Connection,
    max_age: Duration,
}

impl<'conn> SqliteSessionStore<'conn> {
    /// Creates a store with the default 31-day session lifetime.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        Self::with_max_age(conn, DEFAULT_SESSION_MAX_AGE)
    }

    pub fn with_max_age(conn: &'conn Connection, max_age: Duration) -> StoreResult<Self> {
        ensure_session_connection_ready(conn)?;
        Ok(Self { conn, max_age })
    }
}

impl SessionStore for SqliteSessionStore<'_> {
    fn load(&self, session_id: SessionId) -> StoreResult<Option<SessionSnapshot>> {
        let text: Option<String> = self
            .conn
            .query_row(
                "SELECT snapshot
                 FROM sessions
                 WHERE session_id = ?1
                   AND expires_at > ?2;",
                params![session_id.to_string(), now_epoch_ms()],
                |row| row.get(0),
            )
            .optional()?;

        match text {
            None => Ok(None),
            Some(text) => serde_json::from_str(&text)
                .map(Some)
                .map_err(|source| StoreError::CorruptSnapshot { session_id, source }),
        }
    }

    fn save(&self, session_id: SessionId, snapshot: &SessionSnapshot) -> StoreResult<()> {
        let text = serde_json::to_string(snapshot).map_err(StoreError::Serialize)?;
        let now = now_epoch_ms();

        self.conn.execute(
            "INSERT INTO sessions (session_id, snapshot, expires_at, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(session_id) DO UPDATE SET
                snapshot = excluded.snapshot,
                expires_at = excluded.expires_at,
                updated_at = excluded.updated_at;",
            params![
                session_id.to_string(),
                text,
                expiry_from(now, self.max_age),
                now
            ],
        )?;
        Ok(())
    }

    fn delete(&self, session_id: SessionId) -> StoreResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM sessions WHERE session_id = ?1;",
            [session_id.to_string()],
        )?;
        Ok(changed > 0)
    }

    fn prune_expired(&self) -> StoreResult<usize> {
        let removed = self.conn.execute(
            "DELETE FROM sessions WHERE expires_at <= ?1;",
            [now_epoch_ms()],
        )?;
        debug!("event=session_prune module=session status=ok removed={removed}");
        Ok(removed)
    }
}

fn ensure_session_connection_ready(conn: &Connection) -> StoreResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }
    Ok(())
}
