//! Per-client session snapshot storage.
//!
//! # Responsibility
//! - Define the store contract used at request start (`load`) and request
//!   end (`save`).
//! - Provide in-memory and SQLite-backed implementations.
//!
//! # Invariants
//! - Snapshots hold opaque JSON values; stores never interpret entity fields.
//! - Expired sessions are invisible to `load` even before they are pruned.
//! - Every `save` refreshes the session's expiry.

pub mod memory;
pub mod sqlite;

use crate::db::DbError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use uuid::Uuid;

pub use memory::MemorySessionStore;
pub use sqlite::SqliteSessionStore;

/// Opaque per-client session identifier.
pub type SessionId = Uuid;

/// Default lifetime of an idle session: 31 days.
pub const DEFAULT_SESSION_MAX_AGE: Duration = Duration::from_secs(31 * 24 * 60 * 60);

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// Snapshot could not be encoded for storage.
    Serialize(serde_json::Error),
    /// Stored snapshot text is not a valid snapshot document.
    CorruptSnapshot {
        session_id: SessionId,
        source: serde_json::Error,
    },
    /// Connection schema is not at the migrated version this store expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// In-memory store lock was poisoned by a panicking writer.
    Poisoned,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to encode session snapshot: {err}"),
            Self::CorruptSnapshot { session_id, source } => {
                write!(f, "stored snapshot for session {session_id} is corrupt: {source}")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "session store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::Poisoned => write!(f, "session store lock poisoned"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::CorruptSnapshot { source, .. } => Some(source),
            Self::UninitializedConnection { .. } => None,
            Self::Poisoned => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Structural state of one session as persisted between requests.
///
/// Key names match the stored session layout (`todoLists`, `contactData`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(rename = "todoLists", default)]
    pub todo_lists: Vec<Value>,
    #[serde(rename = "contactData", default)]
    pub contacts: Vec<Value>,
}

/// Storage contract for session snapshots.
pub trait SessionStore {
    /// Loads the snapshot, or `None` for unknown or expired sessions.
    fn load(&self, session_id: SessionId) -> StoreResult<Option<SessionSnapshot>>;
    /// Inserts or replaces the snapshot and refreshes its expiry.
    fn save(&self, session_id: SessionId, snapshot: &SessionSnapshot) -> StoreResult<()>;
    /// Removes a session. Returns whether it existed.
    fn delete(&self, session_id: SessionId) -> StoreResult<bool>;
    /// Removes every expired session. Returns the number removed.
    fn prune_expired(&self) -> StoreResult<usize>;
}

/// Generates a fresh random session id.
pub fn new_session_id() -> SessionId {
    Uuid::new_v4()
}

pub(crate) fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
        })
}

pub(crate) fn expiry_from(now_ms: i64, max_age: Duration) -> i64 {
    let max_age_ms = i64::try_from(max_age.as_millis()).unwrap_or(i64::MAX);
    now_ms.saturating_add(max_age_ms)
}
