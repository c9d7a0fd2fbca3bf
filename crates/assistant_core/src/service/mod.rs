//! Request-level use cases over one session.
//!
//! # Responsibility
//! - Run the per-request lifecycle: load snapshot, rehydrate, mutate,
//!   serialize, save.
//! - Express each user action (create list, toggle todo, ...) as a typed
//!   operation with `NotFound` and validation failures the caller can map
//!   to responses.
//!
//! # Invariants
//! - Field input goes through `crate::validation` before any entity
//!   mutation.
//! - A failed operation is never committed; the stored snapshot keeps the
//!   previous request's state.

pub mod assistant_service;
pub mod workspace;

use crate::model::id::EntityId;
use crate::model::EntityError;
use crate::rehydrate::RehydrateError;
use crate::session::StoreError;
use crate::validation::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Entity a lookup failed to find in the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    TodoList(EntityId),
    Todo { list_id: EntityId, todo_id: EntityId },
    Contact(EntityId),
}

impl Display for Resource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TodoList(id) => write!(f, "todo list {id}"),
            Self::Todo { list_id, todo_id } => write!(f, "todo {todo_id} in list {list_id}"),
            Self::Contact(id) => write!(f, "contact {id}"),
        }
    }
}

#[derive(Debug)]
pub enum ServiceError {
    NotFound(Resource),
    /// Every rule the input failed, in field order.
    Validation(Vec<ValidationError>),
    Entity(EntityError),
    Rehydrate(RehydrateError),
    Store(StoreError),
}

impl ServiceError {
    /// User-facing messages for validation failures; empty otherwise.
    pub fn validation_messages(&self) -> Vec<String> {
        match self {
            Self::Validation(errors) => errors.iter().map(ToString::to_string).collect(),
            _ => Vec::new(),
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(resource) => write!(f, "{resource} not found"),
            Self::Validation(errors) => {
                let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
                write!(f, "{}", messages.join(" "))
            }
            Self::Entity(err) => write!(f, "{err}"),
            Self::Rehydrate(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Validation(_) => None,
            Self::Entity(err) => Some(err),
            Self::Rehydrate(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<Vec<ValidationError>> for ServiceError {
    fn from(value: Vec<ValidationError>) -> Self {
        Self::Validation(value)
    }
}

impl From<EntityError> for ServiceError {
    fn from(value: EntityError) -> Self {
        Self::Entity(value)
    }
}

impl From<RehydrateError> for ServiceError {
    fn from(value: RehydrateError) -> Self {
        Self::Rehydrate(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
