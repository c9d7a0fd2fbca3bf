//! Display ordering for lists, todos and contacts.
//!
//! # Invariants
//! - Functions borrow their input and return a new sequence of references;
//!   storage order is never touched.
//! - All sorts are stable, so full ties keep storage order.
//! - Title comparison is case-insensitive; contact name comparison is plain
//!   code-point order (case-sensitive).

use crate::model::contact::Contact;
use crate::model::todo::Todo;
use crate::model::todo_list::TodoList;

/// Incomplete lists first, then by case-insensitive title.
pub fn order_todo_lists(lists: &[TodoList]) -> Vec<&TodoList> {
    let mut ordered: Vec<&TodoList> = lists.iter().collect();
    ordered.sort_by_cached_key(|list| (list.is_done(), list.title().to_lowercase()));
    ordered
}

/// Incomplete todos first, then by case-insensitive title.
pub fn order_todos(list: &TodoList) -> Vec<&Todo> {
    let mut ordered: Vec<&Todo> = list.todos().iter().collect();
    ordered.sort_by_cached_key(|todo| (todo.is_done(), todo.title().to_lowercase()));
    ordered
}

/// By last name, then first name.
pub fn order_contacts(contacts: &[Contact]) -> Vec<&Contact> {
    let mut ordered: Vec<&Contact> = contacts.iter().collect();
    ordered.sort_by(|a, b| {
        a.last_name()
            .cmp(b.last_name())
            .then_with(|| a.first_name().cmp(b.first_name()))
    });
    ordered
}
