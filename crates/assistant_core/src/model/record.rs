//! Structural record shapes exchanged with the session store.
//!
//! # Responsibility
//! - Mirror the field names and types stored in session snapshots.
//! - Carry no behavior; `crate::rehydrate` turns them back into entities.
//!
//! # Invariants
//! - Contact fields are serialized in camelCase (`firstName`, ...) to keep
//!   snapshots compatible with the stored session layout.

use crate::model::id::EntityId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoRecord {
    pub id: EntityId,
    pub title: String,
    pub done: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoListRecord {
    pub id: EntityId,
    pub title: String,
    pub todos: Vec<TodoRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}
