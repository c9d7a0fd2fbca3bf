//! Live entities of one session for the duration of one request.

use crate::model::contact::Contact;
use crate::model::id::{EntityId, IdAllocator};
use crate::model::todo::Todo;
use crate::model::todo_list::TodoList;
use crate::ordering::{order_contacts, order_todo_lists, order_todos};
use crate::rehydrate::{
    rehydrate_contact, rehydrate_todo_list, RecordKind, RehydrateError, RehydrateResult,
};
use crate::service::{Resource, ServiceError, ServiceResult};
use crate::session::SessionSnapshot;
use crate::validation::{
    validate_contact, validate_list_title, validate_todo_title, ValidationLimits,
};
use std::collections::HashSet;
use std::sync::Arc;

/// Rehydrated todo lists and contacts plus the handles needed to create
/// new entities.
#[derive(Debug)]
pub struct Workspace {
    ids: Arc<IdAllocator>,
    limits: ValidationLimits,
    todo_lists: Vec<TodoList>,
    contacts: Vec<Contact>,
}

impl Workspace {
    /// Empty workspace for a session with no stored state.
    pub fn new(ids: Arc<IdAllocator>, limits: ValidationLimits) -> Self {
        Self {
            ids,
            limits,
            todo_lists: Vec::new(),
            contacts: Vec::new(),
        }
    }

    /// Rebuilds live entities from a stored snapshot.
    ///
    /// Fails on the first malformed record, or when two entities of any kind
    /// share an id. On success the allocator floor is raised past every id in
    /// the snapshot.
    pub fn rehydrate(
        snapshot: &SessionSnapshot,
        ids: Arc<IdAllocator>,
        limits: ValidationLimits,
    ) -> RehydrateResult<Self> {
        let todo_lists = snapshot
            .todo_lists
            .iter()
            .map(rehydrate_todo_list)
            .collect::<RehydrateResult<Vec<_>>>()?;
        let contacts = snapshot
            .contacts
            .iter()
            .map(rehydrate_contact)
            .collect::<RehydrateResult<Vec<_>>>()?;

        let workspace = Self {
            ids,
            limits,
            todo_lists,
            contacts,
        };
        workspace.ensure_unique_ids()?;
        workspace.ids.observe(workspace.max_entity_id());
        Ok(workspace)
    }

    /// Structural snapshot of every entity, in storage order.
    pub fn to_snapshot(&self) -> serde_json::Result<SessionSnapshot> {
        let todo_lists = self
            .todo_lists
            .iter()
            .map(|list| serde_json::to_value(list.to_record()))
            .collect::<serde_json::Result<Vec<_>>>()?;
        let contacts = self
            .contacts
            .iter()
            .map(|contact| serde_json::to_value(contact.to_record()))
            .collect::<serde_json::Result<Vec<_>>>()?;

        Ok(SessionSnapshot {
            todo_lists,
            contacts,
        })
    }

    /// Todo lists in storage order.
    pub fn todo_lists(&self) -> &[TodoList] {
        &self.todo_lists
    }

    /// Contacts in storage order.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn todo_lists_in_display_order(&self) -> Vec<&TodoList> {
        order_todo_lists(&self.todo_lists)
    }

    pub fn contacts_in_display_order(&self) -> Vec<&Contact> {
        order_contacts(&self.contacts)
    }

    pub fn todos_in_display_order(&self, list_id: EntityId) -> ServiceResult<Vec<&Todo>> {
        Ok(order_todos(self.todo_list(list_id)?))
    }

    pub fn todo_list(&self, list_id: EntityId) -> ServiceResult<&TodoList> {
        Ok(&self.todo_lists[self.list_index(list_id)?])
    }

    pub fn contact(&self, contact_id: EntityId) -> ServiceResult<&Contact> {
        Ok(&self.contacts[self.contact_index(contact_id)?])
    }

    /// Creates a list after title validation. Returns the new list id.
    pub fn create_todo_list(&mut self, title: &str) -> ServiceResult<EntityId> {
        let title = validate_list_title(title, self.titles(), &self.limits)?;
        let list = TodoList::new(&self.ids, title);
        let id = list.id();
        self.todo_lists.push(list);
        Ok(id)
    }

    /// Retitles a list. The new title must differ from every list title in
    /// the session, including the list's current one.
    pub fn edit_todo_list_title(&mut self, list_id: EntityId, title: &str) -> ServiceResult<()> {
        let index = self.list_index(list_id)?;
        let title = validate_list_title(title, self.titles(), &self.limits)?;
        self.todo_lists[index].set_title(title);
        Ok(())
    }

    pub fn delete_todo_list(&mut self, list_id: EntityId) -> ServiceResult<TodoList> {
        let index = self.list_index(list_id)?;
        Ok(self.todo_lists.remove(index))
    }

    /// Appends a new todo to a list. Returns the new todo id.
    pub fn add_todo(&mut self, list_id: EntityId, title: &str) -> ServiceResult<EntityId> {
        let index = self.list_index(list_id)?;
        let title = validate_todo_title(title, &self.limits)?;
        let todo = Todo::new(&self.ids, title);
        let id = todo.id();
        self.todo_lists[index].add(todo)?;
        Ok(id)
    }

    /// Flips a todo's done flag. Returns the new state.
    pub fn toggle_todo(&mut self, list_id: EntityId, todo_id: EntityId) -> ServiceResult<bool> {
        let index = self.list_index(list_id)?;
        let todo = self.todo_lists[index]
            .find_todo_mut(todo_id)
            .ok_or(ServiceError::NotFound(Resource::Todo { list_id, todo_id }))?;

        if todo.is_done() {
            todo.mark_undone();
        } else {
            todo.mark_done();
        }
        Ok(todo.is_done())
    }

    pub fn delete_todo(&mut self, list_id: EntityId, todo_id: EntityId) -> ServiceResult<Todo> {
        let index = self.list_index(list_id)?;
        let list = &mut self.todo_lists[index];
        let position = list
            .find_todo(todo_id)
            .and_then(|todo| list.find_index_of(todo))
            .ok_or(ServiceError::NotFound(Resource::Todo { list_id, todo_id }))?;
        Ok(list.remove_at(position)?)
    }

    pub fn complete_all(&mut self, list_id: EntityId) -> ServiceResult<()> {
        let index = self.list_index(list_id)?;
        self.todo_lists[index].mark_all_done();
        Ok(())
    }

    /// Adds a contact after field validation. Returns the new contact id.
    pub fn create_contact(
        &mut self,
        first_name: &str,
        last_name: &str,
        phone_number: &str,
    ) -> ServiceResult<EntityId> {
        let fields = validate_contact(first_name, last_name, phone_number, &self.limits)?;
        let contact = Contact::new(
            &self.ids,
            fields.first_name,
            fields.last_name,
            fields.phone_number,
        );
        let id = contact.id();
        self.contacts.push(contact);
        Ok(id)
    }

    /// Replaces all fields of a contact after the same validation as create.
    pub fn edit_contact(
        &mut self,
        contact_id: EntityId,
        first_name: &str,
        last_name: &str,
        phone_number: &str,
    ) -> ServiceResult<()> {
        let index = self.contact_index(contact_id)?;
        let fields = validate_contact(first_name, last_name, phone_number, &self.limits)?;
        self.contacts[index].edit(fields.first_name, fields.last_name, fields.phone_number);
        Ok(())
    }

    pub fn delete_contact(&mut self, contact_id: EntityId) -> ServiceResult<Contact> {
        let index = self.contact_index(contact_id)?;
        Ok(self.contacts.remove(index))
    }

    fn titles(&self) -> impl Iterator<Item = &str> {
        self.todo_lists.iter().map(TodoList::title)
    }

    fn list_index(&self, list_id: EntityId) -> ServiceResult<usize> {
        self.todo_lists
            .iter()
            .position(|list| list.id() == list_id)
            .ok_or(ServiceError::NotFound(Resource::TodoList(list_id)))
    }

    fn contact_index(&self, contact_id: EntityId) -> ServiceResult<usize> {
        self.contacts
            .iter()
            .position(|contact| contact.id() == contact_id)
            .ok_or(ServiceError::NotFound(Resource::Contact(contact_id)))
    }

    /// Every id with the kind of entity carrying it, in snapshot order.
    fn entity_ids(&self) -> impl Iterator<Item = (RecordKind, EntityId)> + '_ {
        let list_ids = self.todo_lists.iter().flat_map(|list| {
            std::iter::once((RecordKind::TodoList, list.id())).chain(
                list.todos()
                    .iter()
                    .map(|todo| (RecordKind::Todo, todo.id())),
            )
        });
        let contact_ids = self
            .contacts
            .iter()
            .map(|contact| (RecordKind::Contact, contact.id()));
        list_ids.chain(contact_ids)
    }

    /// Ids are unique across every entity kind, not only within one list.
    fn ensure_unique_ids(&self) -> RehydrateResult<()> {
        let mut seen = HashSet::new();
        for (kind, id) in self.entity_ids() {
            if !seen.insert(id) {
                return Err(RehydrateError::MalformedRecord {
                    kind,
                    reason: format!("id {id} is already used by another entity in the session"),
                });
            }
        }
        Ok(())
    }

    fn max_entity_id(&self) -> EntityId {
        self.entity_ids().map(|(_, id)| id).max().unwrap_or(0)
    }
}
