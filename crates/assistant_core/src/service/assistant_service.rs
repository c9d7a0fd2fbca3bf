//! Session lifecycle service.
//!
//! # Responsibility
//! - Bridge a `SessionStore` and the live `Workspace` of one request.
//! - Share one `IdAllocator` across every session handled by the process.
//!
//! # Invariants
//! - Rehydration failures surface at `begin`, never on first entity use.
//! - `with_workspace` commits only when the operation succeeded.

use crate::model::id::IdAllocator;
use crate::service::workspace::Workspace;
use crate::service::{ServiceError, ServiceResult};
use crate::session::{new_session_id, SessionId, SessionStore, StoreError};
use crate::validation::ValidationLimits;
use log::{error, info, warn};
use std::sync::Arc;
use std::time::Instant;

/// Use-case entry point over a session store implementation.
pub struct AssistantService<S: SessionStore> {
    store: S,
    ids: Arc<IdAllocator>,
    limits: ValidationLimits,
}

impl<S: SessionStore> AssistantService<S> {
    /// Creates a service with its own id allocator and default limits.
    pub fn new(store: S) -> Self {
        Self::with_parts(store, Arc::new(IdAllocator::new()), ValidationLimits::default())
    }

    /// Creates a service sharing an existing allocator.
    pub fn with_parts(store: S, ids: Arc<IdAllocator>, limits: ValidationLimits) -> Self {
        Self { store, ids, limits }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn ids(&self) -> &Arc<IdAllocator> {
        &self.ids
    }

    pub fn new_session_id(&self) -> SessionId {
        new_session_id()
    }

    /// Loads and rehydrates a session. Unknown sessions start empty.
    pub fn begin(&self, session_id: SessionId) -> ServiceResult<Workspace> {
        let started_at = Instant::now();
        let Some(snapshot) = self.store.load(session_id)? else {
            info!("event=session_begin module=service status=ok session={session_id} state=new");
            return Ok(Workspace::new(Arc::clone(&self.ids), self.limits));
        };

        match Workspace::rehydrate(&snapshot, Arc::clone(&self.ids), self.limits) {
            Ok(workspace) => {
                info!(
                    "event=session_begin module=service status=ok session={session_id} state=rehydrated lists={} contacts={} duration_ms={}",
                    workspace.todo_lists().len(),
                    workspace.contacts().len(),
                    started_at.elapsed().as_millis()
                );
                Ok(workspace)
            }
            Err(err) => {
                error!(
                    "event=session_begin module=service status=error session={session_id} error_code=malformed_record error={err}"
                );
                Err(err.into())
            }
        }
    }

    /// Serializes the workspace and saves it as the session's new state.
    pub fn commit(&self, session_id: SessionId, workspace: &Workspace) -> ServiceResult<()> {
        let snapshot = workspace.to_snapshot().map_err(StoreError::Serialize)?;
        self.store.save(session_id, &snapshot)?;
        info!(
            "event=session_commit module=service status=ok session={session_id} lists={} contacts={}",
            snapshot.todo_lists.len(),
            snapshot.contacts.len()
        );
        Ok(())
    }

    /// Runs one request: begin, apply `op`, and commit when `op` succeeds.
    pub fn with_workspace<T>(
        &self,
        session_id: SessionId,
        op: impl FnOnce(&mut Workspace) -> ServiceResult<T>,
    ) -> ServiceResult<T> {
        let mut workspace = self.begin(session_id)?;
        match op(&mut workspace) {
            Ok(value) => {
                self.commit(session_id, &workspace)?;
                Ok(value)
            }
            Err(err) => {
                if matches!(err, ServiceError::NotFound(_) | ServiceError::Validation(_)) {
                    info!("event=session_request module=service status=rejected session={session_id} error={err}");
                } else {
                    warn!("event=session_request module=service status=error session={session_id} error={err}");
                }
                Err(err)
            }
        }
    }

    /// Drops a session's stored state. Returns whether it existed.
    pub fn end_session(&self, session_id: SessionId) -> ServiceResult<bool> {
        Ok(self.store.delete(session_id)?)
    }

    pub fn prune_expired(&self) -> ServiceResult<usize> {
        let removed = self.store.prune_expired()?;
        info!("event=session_prune module=service status=ok removed={removed}");
        Ok(removed)
    }
}
