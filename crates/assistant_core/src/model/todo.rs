//! Todo entity.

use crate::model::id::{EntityId, IdAllocator};
use crate::model::record::TodoRecord;

/// One actionable item owned by a `TodoList`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    id: EntityId,
    title: String,
    done: bool,
}

impl Todo {
    /// Creates a not-done todo with a fresh id.
    pub fn new(ids: &IdAllocator, title: impl Into<String>) -> Self {
        Self {
            id: ids.next_id(),
            title: title.into(),
            done: false,
        }
    }

    /// Rebuilds a todo whose identity already exists in session history.
    pub(crate) fn from_parts(id: EntityId, title: String, done: bool) -> Self {
        Self { id, title, done }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn mark_done(&mut self) {
        self.done = true;
    }

    pub fn mark_undone(&mut self) {
        self.done = false;
    }

    /// Structural snapshot written back to the session store.
    pub fn to_record(&self) -> TodoRecord {
        TodoRecord {
            id: self.id,
            title: self.title.clone(),
            done: self.done,
        }
    }
}
