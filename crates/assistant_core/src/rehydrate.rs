//! Reconstruction of entities from session snapshot values.
//!
//! # Responsibility
//! - Turn the opaque JSON values returned by a session store back into
//!   behavior-bearing `Todo`, `TodoList` and `Contact` entities.
//! - Reject mis-shaped records at the boundary instead of on first use.
//!
//! # Invariants
//! - Never allocates ids; the stored `id` is preserved verbatim.
//! - Every record must be a JSON object; positional (array) forms are
//!   rejected even though serde would accept them for structs.
//! - Nested todos are rehydrated element-wise with the same rules.
//! - Unknown extra fields are ignored.

use crate::model::contact::Contact;
use crate::model::id::EntityId;
use crate::model::record::{ContactRecord, TodoRecord};
use crate::model::todo::Todo;
use crate::model::todo_list::TodoList;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RehydrateResult<T> = Result<T, RehydrateError>;

/// Entity kind named in rehydration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Todo,
    TodoList,
    Contact,
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Todo => write!(f, "todo"),
            Self::TodoList => write!(f, "todo list"),
            Self::Contact => write!(f, "contact"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RehydrateError {
    /// Snapshot value is missing required fields or has the wrong shape.
    MalformedRecord { kind: RecordKind, reason: String },
}

impl Display for RehydrateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedRecord { kind, reason } => {
                write!(f, "malformed {kind} record: {reason}")
            }
        }
    }
}

impl Error for RehydrateError {}

/// List shape with todos left opaque, so each one goes through
/// `rehydrate_todo` instead of serde's lenient struct handling.
#[derive(Deserialize)]
struct TodoListShape {
    id: EntityId,
    title: String,
    todos: Vec<Value>,
}

pub fn rehydrate_todo(value: &Value) -> RehydrateResult<Todo> {
    let record: TodoRecord = decode(RecordKind::Todo, value)?;
    ensure_id(RecordKind::Todo, record.id)?;
    Ok(Todo::from_parts(record.id, record.title, record.done))
}

pub fn rehydrate_todo_list(value: &Value) -> RehydrateResult<TodoList> {
    let shape: TodoListShape = decode(RecordKind::TodoList, value)?;
    ensure_id(RecordKind::TodoList, shape.id)?;

    let mut seen = HashSet::with_capacity(shape.todos.len());
    let mut todos = Vec::with_capacity(shape.todos.len());
    for (index, todo_value) in shape.todos.iter().enumerate() {
        let todo = rehydrate_todo(todo_value).map_err(|err| match err {
            RehydrateError::MalformedRecord { reason, .. } => malformed(
                RecordKind::TodoList,
                format!("todos[{index}]: {reason}"),
            ),
        })?;
        if !seen.insert(todo.id()) {
            return Err(malformed(
                RecordKind::TodoList,
                format!("todos[{index}]: duplicate todo id {}", todo.id()),
            ));
        }
        todos.push(todo);
    }

    Ok(TodoList::from_parts(shape.id, shape.title, todos))
}

pub fn rehydrate_contact(value: &Value) -> RehydrateResult<Contact> {
    let record: ContactRecord = decode(RecordKind::Contact, value)?;
    ensure_id(RecordKind::Contact, record.id)?;
    Ok(Contact::from_parts(
        record.id,
        record.first_name,
        record.last_name,
        record.phone_number,
    ))
}

fn decode<'de, T: Deserialize<'de>>(kind: RecordKind, value: &'de Value) -> RehydrateResult<T> {
    if !value.is_object() {
        return Err(malformed(
            kind,
            format!("expected an object, got {}", value_type_name(value)),
        ));
    }
    T::deserialize(value).map_err(|err| malformed(kind, err.to_string()))
}

fn ensure_id(kind: RecordKind, id: EntityId) -> RehydrateResult<()> {
    if id == 0 {
        return Err(malformed(kind, "id must be non-zero".to_string()));
    }
    Ok(())
}

fn malformed(kind: RecordKind, reason: String) -> RehydrateError {
    RehydrateError::MalformedRecord { kind, reason }
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
