//! Entity model for todo lists, todos and contacts.
//!
//! # Responsibility
//! - Define the behavior-bearing entities mutated during one request.
//! - Define the structural record shapes exchanged with the session store.
//!
//! # Invariants
//! - Every entity is identified by an `EntityId` issued by one shared
//!   `IdAllocator`; ids are never reused within a process lifetime.
//! - `id` and todo `title` never change after construction.
//! - A `TodoList` exclusively owns its todos.

pub mod contact;
pub mod id;
pub mod record;
pub mod todo;
pub mod todo_list;

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type EntityResult<T> = Result<T, EntityError>;

/// Errors raised by entity mutation operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityError {
    /// Removal index outside `[0, len)`.
    IndexOutOfRange { index: usize, len: usize },
    /// Value passed to a mutation cannot be accepted by the entity.
    InvalidArgument(String),
}

impl Display for EntityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} is out of range for list of size {len}")
            }
            Self::InvalidArgument(message) => write!(f, "invalid argument: {message}"),
        }
    }
}

impl Error for EntityError {}
