use crate::operation::Operation;
use crate::operation::OperationStore;
use crate::schema::Schema;

fn setup_schema() -> Schema {
    Schema::from_sdl(
        r#"
        type Query { user(id: ID): User }
        type User { id: ID! name: String }
        "#,
    )
    .unwrap()
}

#[test]
fn toggles_apply_serially_to_one_operation() {
    let schema = setup_schema();
    let mut store = OperationStore::new();
    let id = store.add(Operation::new("", "")).id;

    store.add_path(id, "query.user.id");
    store.add_argument(id, "query.user", "id", &schema);
    store.add_path(id, "query.user.name");
    let op = store.remove_path(id, "query.user.id").unwrap();

    assert_eq!(op.query, "query Untitled($id: ID) {\n  user(id: $id) {\n    name\n  }\n}\n");
    assert_eq!(op.name, "Untitled");
}

#[test]
fn removal_toggles_leave_empty_text_alone() {
    let schema = setup_schema();
    let mut store = OperationStore::new();
    let id = store.add(Operation::new("Draft", "")).id;

    assert_eq!(store.remove_path(id, "query.user").unwrap().query, "");
    assert_eq!(store.remove_argument(id, "query.user", "id").unwrap().query, "");
    assert_eq!(store.add_argument(id, "query.user", "id", &schema).unwrap().query, "");
    assert_eq!(store.get(id).unwrap().name, "Draft");
}

#[test]
fn update_query_renames_from_text() {
    let mut store = OperationStore::new();
    let id = store.add(Operation::new("Old", "query Old { a }")).id;

    assert_eq!(store.update_query(id, "query New { a }".to_string()).unwrap().name, "New");
    assert_eq!(store.update_query(id, "query Typing { a(".to_string()).unwrap().name, "Typing");
    assert_eq!(store.update_query(id, "{ a }".to_string()).unwrap().name, "Typing");
}

#[test]
fn unknown_ids_are_ignored() {
    let mut store = OperationStore::from_operations(vec![Operation::new("A", "query A { a }")]);
    let stranger = Operation::new("B", "");
    assert!(store.add_path(stranger.id, "query.a").is_none());
    assert!(store.remove(stranger.id).is_none());
    assert_eq!(store.operations().len(), 1);
}
