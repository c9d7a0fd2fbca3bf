//! Process-local session store.

use crate::session::{
    expiry_from, now_epoch_ms, SessionId, SessionSnapshot, SessionStore, StoreError, StoreResult,
    DEFAULT_SESSION_MAX_AGE,
};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

struct StoredSession {
    snapshot: SessionSnapshot,
    expires_at_ms: i64,
}

/// `HashMap`-backed store; contents vanish with the process.
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<SessionId, StoredSession>>,
    max_age: Duration,
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_MAX_AGE)
    }
}

impl MemorySessionStore {
    pub fn new(max_age: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            max_age,
        }
    }

    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, HashMap<SessionId, StoredSession>>> {
        self.sessions.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self, session_id: SessionId) -> StoreResult<Option<SessionSnapshot>> {
        let now = now_epoch_ms();
        let sessions = self.lock()?;
        Ok(sessions
            .get(&session_id)
            .filter(|stored| stored.expires_at_ms > now)
            .map(|stored| stored.snapshot.clone()))
    }

    fn save(&self, session_id: SessionId, snapshot: &SessionSnapshot) -> StoreResult<()> {
        let expires_at_ms = expiry_from(now_epoch_ms(), self.max_age);
        self.lock()?.insert(
            session_id,
            StoredSession {
                snapshot: snapshot.clone(),
                expires_at_ms,
            },
        );
        Ok(())
    }

    fn delete(&self, session_id: SessionId) -> StoreResult<bool> {
        Ok(self.lock()?.remove(&session_id).is_some())
    }

    fn prune_expired(&self) -> StoreResult<usize> {
        let now = now_epoch_ms();
        let mut sessions = self.lock()?;
        let before = sessions.len();
        sessions.retain(|_, stored| stored.expires_at_ms > now);
        Ok(before - sessions.len())
    }
}
