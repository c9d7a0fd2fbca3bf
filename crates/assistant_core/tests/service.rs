use assistant_core::db::open_db_in_memory;
use assistant_core::{
    AssistantService, EntityId, IdAllocator, MemorySessionStore, RecordKind, RehydrateError,
    Resource, ServiceError, SessionSnapshot, SessionStore, SqliteSessionStore, ValidationError,
    ValidationLimits,
};
use serde_json::json;
use std::sync::Arc;

fn memory_service() -> AssistantService<MemorySessionStore> {
    AssistantService::new(MemorySessionStore::default())
}

fn list_titles<S: SessionStore>(
    service: &AssistantService<S>,
    session_id: assistant_core::SessionId,
) -> Vec<String> {
    service
        .begin(session_id)
        .unwrap()
        .todo_lists_in_display_order()
        .iter()
        .map(|list| list.title().to_string())
        .collect()
}

#[test]
fn new_session_starts_empty() {
    let service = memory_service();
    let workspace = service.begin(service.new_session_id()).unwrap();

    assert!(workspace.todo_lists().is_empty());
    assert!(workspace.contacts().is_empty());
}

#[test]
fn committed_changes_are_visible_to_the_next_request() {
    let service = memory_service();
    let session_id = service.new_session_id();

    let (list_id, todo_id) = service
        .with_workspace(session_id, |workspace| {
            let list_id = workspace.create_todo_list("  Groceries  ")?;
            let todo_id = workspace.add_todo(list_id, "Buy milk")?;
            workspace.add_todo(list_id, "apples")?;
            Ok((list_id, todo_id))
        })
        .unwrap();

    let done = service
        .with_workspace(session_id, |workspace| workspace.toggle_todo(list_id, todo_id))
        .unwrap();
    assert!(done);

    let workspace = service.begin(session_id).unwrap();
    let list = workspace.todo_list(list_id).unwrap();
    assert_eq!(list.title(), "Groceries");
    assert_eq!(list.len(), 2);
    assert!(list.find_todo(todo_id).unwrap().is_done());

    let ordered: Vec<&str> = workspace
        .todos_in_display_order(list_id)
        .unwrap()
        .iter()
        .map(|todo| todo.title())
        .collect();
    assert_eq!(ordered, ["apples", "Buy milk"]);
}

#[test]
fn failed_operations_are_not_committed() {
    let service = memory_service();
    let session_id = service.new_session_id();
    service
        .with_workspace(session_id, |workspace| workspace.create_todo_list("Work"))
        .unwrap();

    let err = service
        .with_workspace(session_id, |workspace| {
            workspace.create_todo_list("Home")?;
            workspace.create_todo_list("Work")
        })
        .unwrap_err();
    assert_eq!(err.validation_messages(), ["List title must be unique."]);

    assert_eq!(list_titles(&service, session_id), ["Work"]);
}

#[test]
fn unknown_ids_are_not_found() {
    let service = memory_service();
    let session_id = service.new_session_id();
    let mut workspace = service.begin(session_id).unwrap();
    let list_id = workspace.create_todo_list("Chores").unwrap();

    assert!(matches!(
        workspace.add_todo(999, "x"),
        Err(ServiceError::NotFound(Resource::TodoList(999)))
    ));
    assert!(matches!(
        workspace.toggle_todo(list_id, 999),
        Err(ServiceError::NotFound(Resource::Todo { todo_id: 999, .. }))
    ));
    assert!(matches!(
        workspace.delete_todo(list_id, 999),
        Err(ServiceError::NotFound(Resource::Todo { .. }))
    ));
    assert!(matches!(
        workspace.complete_all(999),
        Err(ServiceError::NotFound(Resource::TodoList(999)))
    ));
    assert!(matches!(
        workspace.edit_todo_list_title(999, "New"),
        Err(ServiceError::NotFound(_))
    ));
    assert!(matches!(
        workspace.delete_todo_list(999),
        Err(ServiceError::NotFound(_))
    ));
    assert!(matches!(
        workspace.delete_contact(999),
        Err(ServiceError::NotFound(Resource::Contact(999)))
    ));
    assert!(matches!(
        workspace.edit_contact(999, "A", "B", "111-111-1111"),
        Err(ServiceError::NotFound(Resource::Contact(999)))
    ));
}

#[test]
fn not_found_takes_precedence_over_validation() {
    let service = memory_service();
    let mut workspace = service.begin(service.new_session_id()).unwrap();

    assert!(matches!(
        workspace.add_todo(42, ""),
        Err(ServiceError::NotFound(Resource::TodoList(42)))
    ));
}

#[test]
fn list_title_edit_validates_against_all_lists() {
    let service = memory_service();
    let mut workspace = service.begin(service.new_session_id()).unwrap();
    let work = workspace.create_todo_list("Work").unwrap();
    workspace.create_todo_list("Home").unwrap();

    let err = workspace.edit_todo_list_title(work, "Home").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ref errors) if errors == &[ValidationError::ListTitleNotUnique]
    ));

    workspace.edit_todo_list_title(work, "Office").unwrap();
    assert_eq!(workspace.todo_list(work).unwrap().title(), "Office");
}

#[test]
fn delete_todo_removes_only_the_target() {
    let service = memory_service();
    let mut workspace = service.begin(service.new_session_id()).unwrap();
    let list_id = workspace.create_todo_list("Chores").unwrap();
    let first = workspace.add_todo(list_id, "Sweep").unwrap();
    let second = workspace.add_todo(list_id, "Mop").unwrap();
    let third = workspace.add_todo(list_id, "Dust").unwrap();

    let removed = workspace.delete_todo(list_id, second).unwrap();
    assert_eq!(removed.id(), second);

    let remaining: Vec<EntityId> = workspace
        .todo_list(list_id)
        .unwrap()
        .todos()
        .iter()
        .map(|todo| todo.id())
        .collect();
    assert_eq!(remaining, [first, third]);
}

#[test]
fn complete_all_and_delete_list() {
    let service = memory_service();
    let mut workspace = service.begin(service.new_session_id()).unwrap();
    let list_id = workspace.create_todo_list("Chores").unwrap();
    workspace.add_todo(list_id, "Sweep").unwrap();
    workspace.add_todo(list_id, "Mop").unwrap();

    workspace.complete_all(list_id).unwrap();
    assert!(workspace.todo_list(list_id).unwrap().is_done());

    let removed = workspace.delete_todo_list(list_id).unwrap();
    assert_eq!(removed.len(), 2);
    assert!(workspace.todo_lists().is_empty());
}

#[test]
fn contacts_are_validated_edited_and_deleted() {
    let service = memory_service();
    let session_id = service.new_session_id();

    let err = service
        .with_workspace(session_id, |workspace| {
            workspace.create_contact("Mike", "Jones", "2813308004")
        })
        .unwrap_err();
    assert_eq!(
        err.validation_messages(),
        ["Invalid phone number format. Use ###-###-####."]
    );

    let contact_id = service
        .with_workspace(session_id, |workspace| {
            workspace.create_contact(" Mike ", "Jones", "281-330-8004")
        })
        .unwrap();

    service
        .with_workspace(session_id, |workspace| {
            workspace.edit_contact(contact_id, "Michael", "Jones", "281-330-0000")
        })
        .unwrap();

    let workspace = service.begin(session_id).unwrap();
    let contact = workspace.contact(contact_id).unwrap();
    assert_eq!(contact.first_name(), "Michael");
    assert_eq!(contact.phone_number(), "281-330-0000");

    service
        .with_workspace(session_id, |workspace| workspace.delete_contact(contact_id))
        .unwrap();
    assert!(service.begin(session_id).unwrap().contacts().is_empty());
}

#[test]
fn begin_raises_id_floor_above_stored_ids() {
    let store = MemorySessionStore::default();
    let session_id = assistant_core::new_session_id();
    store
        .save(
            session_id,
            &SessionSnapshot {
                todo_lists: vec![json!({
                    "id": 10,
                    "title": "Old",
                    "todos": [{"id": 57, "title": "Stored", "done": false}]
                })],
                contacts: vec![json!({
                    "id": 31,
                    "firstName": "Jenny",
                    "lastName": "Keys",
                    "phoneNumber": "768-867-5309"
                })],
            },
        )
        .unwrap();

    let ids = Arc::new(IdAllocator::new());
    let service = AssistantService::with_parts(store, Arc::clone(&ids), ValidationLimits::default());
    let mut workspace = service.begin(session_id).unwrap();

    let new_todo = workspace.add_todo(10, "Fresh").unwrap();
    assert_eq!(new_todo, 58);
    assert_eq!(ids.peek(), 58);
}

#[test]
fn malformed_snapshot_fails_at_begin() {
    let store = MemorySessionStore::default();
    let session_id = assistant_core::new_session_id();
    store
        .save(
            session_id,
            &SessionSnapshot {
                todo_lists: vec![json!({"id": 1, "todos": []})],
                contacts: Vec::new(),
            },
        )
        .unwrap();
    let service = AssistantService::new(store);

    match service.begin(session_id).unwrap_err() {
        ServiceError::Rehydrate(RehydrateError::MalformedRecord { kind, .. }) => {
            assert_eq!(kind, RecordKind::TodoList);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn sqlite_backed_service_round_trips_a_session() {
    let conn = open_db_in_memory().unwrap();
    let service = AssistantService::new(SqliteSessionStore::try_new(&conn).unwrap());
    let session_id = service.new_session_id();

    service
        .with_workspace(session_id, |workspace| {
            let list_id = workspace.create_todo_list("Groceries")?;
            workspace.add_todo(list_id, "Buy milk")?;
            workspace.create_todo_list("errands")?;
            workspace.create_contact("Alicia", "Keys", "515-489-4608")?;
            Ok(())
        })
        .unwrap();

    assert_eq!(list_titles(&service, session_id), ["errands", "Groceries"]);

    assert!(service.end_session(session_id).unwrap());
    assert!(service.begin(session_id).unwrap().todo_lists().is_empty());
}

#[test]
fn sessions_are_isolated() {
    let service = memory_service();
    let first = service.new_session_id();
    let second = service.new_session_id();

    service
        .with_workspace(first, |workspace| workspace.create_todo_list("Mine"))
        .unwrap();

    assert_eq!(list_titles(&service, first), ["Mine"]);
    assert!(list_titles(&service, second).is_empty());
}

#[test]
fn ids_shared_across_entities_fail_at_begin() {
    let store = MemorySessionStore::default();
    let session_id = assistant_core::new_session_id();
    store
        .save(
            session_id,
            &SessionSnapshot {
                todo_lists: vec![
                    json!({"id": 7, "title": "A", "todos": []}),
                    json!({"id": 7, "title": "B", "todos": []}),
                ],
                contacts: Vec::new(),
            },
        )
        .unwrap();
    let service = AssistantService::new(store);

    match service.begin(session_id).unwrap_err() {
        ServiceError::Rehydrate(RehydrateError::MalformedRecord { kind, reason }) => {
            assert_eq!(kind, RecordKind::TodoList);
            assert!(reason.contains("id 7"), "{reason}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn todo_and_contact_may_not_share_an_id() {
    let store = MemorySessionStore::default();
    let session_id = assistant_core::new_session_id();
    store
        .save(
            session_id,
            &SessionSnapshot {
                todo_lists: vec![json!({
                    "id": 3,
                    "title": "Chores",
                    "todos": [{"id": 4, "title": "Sweep", "done": false}]
                })],
                contacts: vec![json!({
                    "id": 4,
                    "firstName": "Mike",
                    "lastName": "Jones",
                    "phoneNumber": "281-330-8004"
                })],
            },
        )
        .unwrap();
    let service = AssistantService::new(store);

    assert!(matches!(
        service.begin(session_id).unwrap_err(),
        ServiceError::Rehydrate(RehydrateError::MalformedRecord {
            kind: RecordKind::Contact,
            ..
        })
    ));
}
