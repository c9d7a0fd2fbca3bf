//! Todo list entity.
//!
//! # Responsibility
//! - Own an ordered sequence of todos plus a title.
//! - Provide positional removal and bulk completion helpers.
//!
//! # Invariants
//! - Storage order is insertion order; display order lives in
//!   `crate::ordering` and never reorders `todos`.
//! - Todo ids are unique within one list.
//! - Title uniqueness across lists is the caller's concern.

use crate::model::id::{EntityId, IdAllocator};
use crate::model::record::TodoListRecord;
use crate::model::todo::Todo;
use crate::model::{EntityError, EntityResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoList {
    id: EntityId,
    title: String,
    todos: Vec<Todo>,
}

impl TodoList {
    /// Creates an empty list with a fresh id.
    pub fn new(ids: &IdAllocator, title: impl Into<String>) -> Self {
        Self {
            id: ids.next_id(),
            title: title.into(),
            todos: Vec::new(),
        }
    }

    pub(crate) fn from_parts(id: EntityId, title: String, todos: Vec<Todo>) -> Self {
        Self { id, title, todos }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Todos in storage order.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Appends `todo` to the end of the list.
    ///
    /// # Errors
    /// - `InvalidArgument` when the todo carries the reserved id `0` or an id
    ///   already present in this list.
    pub fn add(&mut self, todo: Todo) -> EntityResult<()> {
        if todo.id() == 0 {
            return Err(EntityError::InvalidArgument(
                "todo id must be non-zero".to_string(),
            ));
        }
        if self.find_todo(todo.id()).is_some() {
            return Err(EntityError::InvalidArgument(format!(
                "todo {} is already in list {}",
                todo.id(),
                self.id
            )));
        }

        self.todos.push(todo);
        Ok(())
    }

    /// Removes and returns the todo at `index`, shifting later todos left.
    pub fn remove_at(&mut self, index: usize) -> EntityResult<Todo> {
        if index >= self.todos.len() {
            return Err(EntityError::IndexOutOfRange {
                index,
                len: self.todos.len(),
            });
        }
        Ok(self.todos.remove(index))
    }

    /// Storage position of the todo with the same id as `todo`.
    pub fn find_index_of(&self, todo: &Todo) -> Option<usize> {
        self.todos
            .iter()
            .position(|candidate| candidate.id() == todo.id())
    }

    pub fn find_todo(&self, id: EntityId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id() == id)
    }

    pub fn find_todo_mut(&mut self, id: EntityId) -> Option<&mut Todo> {
        self.todos.iter_mut().find(|todo| todo.id() == id)
    }

    /// True when the list has todos and all of them are done.
    pub fn is_done(&self) -> bool {
        !self.todos.is_empty() && self.todos.iter().all(Todo::is_done)
    }

    pub fn mark_all_done(&mut self) {
        self.todos.iter_mut().for_each(Todo::mark_done);
    }

    pub fn mark_all_undone(&mut self) {
        self.todos.iter_mut().for_each(Todo::mark_undone);
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn to_record(&self) -> TodoListRecord {
        TodoListRecord {
            id: self.id,
            title: self.title.clone(),
            todos: self.todos.iter().map(Todo::to_record).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TodoList;
    use crate::model::id::IdAllocator;
    use crate::model::todo::Todo;
    use crate::model::EntityError;

    #[test]
    fn add_rejects_reserved_zero_id() {
        let ids = IdAllocator::new();
        let mut list = TodoList::new(&ids, "Chores");

        let err = list
            .add(Todo::from_parts(0, "ghost".to_string(), false))
            .unwrap_err();
        assert!(matches!(err, EntityError::InvalidArgument(_)));
        assert!(list.is_empty());
    }

    #[test]
    fn add_rejects_todo_already_in_list() {
        let ids = IdAllocator::new();
        let mut list = TodoList::new(&ids, "Chores");
        let todo = Todo::new(&ids, "Sweep");

        list.add(todo.clone()).unwrap();
        let err = list.add(todo).unwrap_err();
        assert!(matches!(err, EntityError::InvalidArgument(_)));
        assert_eq!(list.len(), 1);
    }
}
