use crate::arguments::add_argument;
use crate::arguments::is_argument_present;
use crate::arguments::remove_argument;
use crate::path::add_path;
use crate::schema::Schema;

fn setup_schema() -> Schema {
    Schema::from_sdl(
        r#"
        type Query {
            user(id: ID, ids: [ID!]!): User
            users(first: Int = 10): [User!]!
        }

        type Mutation {
            createUser(name: String!): User
        }

        type User {
            id: ID!
            name: String
            posts(first: Int, after: String): [Post!]!
        }

        type Post {
            id: ID!
            title: String
        }
        "#,
    )
    .unwrap()
}

#[test]
fn add_path_then_argument_on_empty_text() {
    let schema = setup_schema();

    let query = add_path("", "query.user", None);
    assert_eq!(query, "query Untitled {\n  user\n}\n");

    let query = add_argument(&query, "query.user", "id", &schema, None);
    assert_eq!(query, "query Untitled($id: ID) {\n  user(id: $id)\n}\n");
}

#[test]
fn add_argument_creates_missing_path() {
    let schema = setup_schema();
    assert_eq!(
        add_argument("", "query.user", "id", &schema, None),
        "query Untitled($id: ID) {\n  user(id: $id)\n}\n",
    );
}

#[test]
fn repeated_add_synthesizes_distinct_variables() {
    let schema = setup_schema();
    let once = add_argument("", "query.user", "id", &schema, None);
    let twice = add_argument(&once, "query.user", "id", &schema, None);
    assert_eq!(
        twice,
        "query Untitled($id: ID, $id2: ID) {\n  user(id: $id, id: $id2)\n}\n",
    );

    let thrice = add_argument(&twice, "query.user", "id", &schema, None);
    assert!(thrice.starts_with("query Untitled($id: ID, $id2: ID, $id3: ID)"));
}

#[test]
fn variable_type_keeps_list_and_non_null_wrappers() {
    let schema = setup_schema();
    assert_eq!(
        add_argument("", "query.user", "ids", &schema, None),
        "query Untitled($ids: [ID!]!) {\n  user(ids: $ids)\n}\n",
    );
}

#[test]
fn nested_argument_resolves_through_list_types() {
    let schema = setup_schema();
    assert_eq!(
        add_argument("query A {\n  users {\n    id\n  }\n}\n", "query.users.posts", "first", &schema, None),
        "query A($first: Int) {\n  users {\n    id\n    posts(first: $first)\n  }\n}\n",
    );
}

#[test]
fn variable_name_avoids_names_used_by_other_arguments() {
    let schema = setup_schema();
    let query = "query A($first: Int) {\n  users(first: $first) {\n    id\n  }\n}\n";
    assert_eq!(
        add_argument(query, "query.users.posts", "first", &schema, None),
        "query A($first: Int, $first2: Int) {\n  users(first: $first) {\n    id\n    posts(first: $first2)\n  }\n}\n",
    );
}

#[test]
fn mutation_argument() {
    let schema = setup_schema();
    assert_eq!(
        add_argument("", "mutation.createUser", "name", &schema, None),
        "mutation Untitled($name: String!) {\n  createUser(name: $name)\n}\n",
    );
}

#[test]
fn unknown_argument_or_field_is_a_no_op() {
    let schema = setup_schema();
    let query = "query A { user { id } }";
    assert_eq!(add_argument(query, "query.user", "nope", &schema, None), query);
    assert_eq!(add_argument(query, "query.nope", "id", &schema, None), query);
    assert_eq!(add_argument(query, "query.user.id.deeper", "id", &schema, None), query);
    assert_eq!(add_argument(query, "subscription.user", "id", &schema, None), query);
}

#[test]
fn argument_goes_to_the_named_operation() {
    let schema = setup_schema();
    let query = "query A {\n  user\n}\n\nquery B {\n  user\n}\n";
    assert_eq!(
        add_argument(query, "query.user", "id", &schema, Some("B")),
        "query A {\n  user\n}\n\nquery B($id: ID) {\n  user(id: $id)\n}\n",
    );
}

#[test]
fn remove_argument_keeps_its_variable() {
    assert_eq!(
        remove_argument("query Untitled($id: ID) {\n  user(id: $id)\n}\n", "query.user", "id", None),
        "query Untitled($id: ID) {\n  user\n}\n",
    );
}

#[test]
fn remove_absent_argument_returns_input() {
    let query = "query A { user(id: 1) { id } }";
    assert_eq!(remove_argument(query, "query.user", "name", None), query);
    assert_eq!(remove_argument(query, "query.users", "id", None), query);
    assert_eq!(remove_argument("query A {", "query.user", "id", None), "query A {");
}

#[test]
fn argument_presence() {
    let query = "query A($id: ID) {\n  user(id: $id) {\n    posts\n  }\n}\n";
    assert!(is_argument_present(query, "query.user", "id", None));
    assert!(!is_argument_present(query, "query.user", "ids", None));
    assert!(!is_argument_present(query, "query.user.posts", "id", None));
    assert!(!is_argument_present(query, "query.missing", "id", None));
}
