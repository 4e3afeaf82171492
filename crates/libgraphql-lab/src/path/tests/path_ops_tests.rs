use crate::path::add_path;
use crate::path::is_path_present;
use crate::path::open_paths;
use crate::path::remove_path;
use proptest::prelude::*;

#[test]
fn add_to_empty_text_creates_untitled_operation() {
    assert_eq!(add_path("", "query.user", None), "query Untitled {\n  user\n}\n");
}

#[test]
fn add_creates_missing_intermediate_fields() {
    assert_eq!(
        add_path("", "query.user.posts.title", None),
        "query Untitled {\n  user {\n    posts {\n      title\n    }\n  }\n}\n",
    );
}

#[test]
fn add_bare_kind_creates_empty_operation() {
    assert_eq!(add_path("", "mutation", None), "mutation Untitled {}\n");
}

#[test]
fn add_existing_path_changes_nothing_but_formatting() {
    let query = "query A {\n  user {\n    id\n  }\n}\n";
    assert_eq!(add_path(query, "query.user.id", None), query);
    assert_eq!(add_path(query, "query.user", None), query);
}

#[test]
fn add_appends_after_existing_siblings() {
    assert_eq!(
        add_path("query A {\n  user {\n    id\n  }\n}\n", "query.user.name", None),
        "query A {\n  user {\n    id\n    name\n  }\n}\n",
    );
}

#[test]
fn add_of_another_kind_appends_an_operation() {
    assert_eq!(
        add_path("query A {\n  a\n}\n", "mutation.createUser", None),
        "query A {\n  a\n}\n\nmutation Untitled {\n  createUser\n}\n",
    );
}

#[test]
fn operation_name_picks_among_same_kind_definitions() {
    let query = "query A {\n  a\n}\n\nquery B {\n  b\n}\n";
    assert_eq!(
        add_path(query, "query.x", Some("B")),
        "query A {\n  a\n}\n\nquery B {\n  b\n  x\n}\n",
    );
    assert_eq!(
        add_path(query, "query.x", None),
        "query A {\n  a\n  x\n}\n\nquery B {\n  b\n}\n",
    );
}

#[test]
fn add_with_unknown_operation_name_creates_it() {
    assert_eq!(
        add_path("query A {\n  a\n}\n", "query.b", Some("Other")),
        "query A {\n  a\n}\n\nquery Other {\n  b\n}\n",
    );
}

#[test]
fn add_to_unparseable_text_starts_over() {
    assert_eq!(add_path("query A { user(", "query.user", None), "query Untitled {\n  user\n}\n");
}

#[test]
fn add_with_malformed_path_returns_input() {
    let query = "query A { a }";
    assert_eq!(add_path(query, "query..a", None), query);
    assert_eq!(add_path(query, "nope.a", None), query);
}

#[test]
fn presence_follows_the_whole_chain() {
    let query = "query A {\n  user {\n    posts {\n      title\n    }\n  }\n}\n";
    assert!(is_path_present(query, "query", None));
    assert!(is_path_present(query, "query.user", None));
    assert!(is_path_present(query, "query.user.posts.title", None));
    assert!(!is_path_present(query, "query.posts", None));
    assert!(!is_path_present(query, "query.user.title", None));
    assert!(!is_path_present(query, "mutation", None));
    assert!(!is_path_present(query, "query.user", Some("B")));
    assert!(!is_path_present("query A {", "query", None));
}

#[test]
fn presence_sees_through_inline_fragments() {
    let query = "query A { node { ... on User { id posts { ... on Post { title } } } } }";
    assert!(is_path_present(query, "query.node.id", None));
    assert!(is_path_present(query, "query.node.posts.title", None));
    assert!(is_path_present("query A { ... on Query { user { id } } }", "query.user.id", None));
    assert!(!is_path_present(query, "query.node.name", None));
    assert!(!is_path_present(query, "query.id", None));
}

#[test]
fn remove_leaf_keeps_siblings() {
    assert_eq!(
        remove_path("query A {\n  user {\n    id\n    name\n  }\n}\n", "query.user.id", None),
        "query A {\n  user {\n    name\n  }\n}\n",
    );
}

#[test]
fn removing_last_child_leaves_a_leaf_field() {
    assert_eq!(
        remove_path("query A {\n  user {\n    id\n  }\n}\n", "query.user.id", None),
        "query A {\n  user\n}\n",
    );
}

#[test]
fn removing_sole_field_collapses_operation() {
    let collapsed = remove_path("query A($id: ID) {\n  user(id: $id)\n}\n", "query.user", None);
    assert_eq!(collapsed, "query A {}\n");
    assert!(is_path_present(&collapsed, "query", None));
    assert!(!is_path_present(&collapsed, "query.user", None));
}

#[test]
fn collapse_preserves_other_definitions() {
    assert_eq!(
        remove_path("query A {\n  a\n}\n\nquery B {\n  b\n}\n", "query.b", Some("B")),
        "query A {\n  a\n}\n\nquery B {}\n",
    );
}

#[test]
fn remove_drops_every_aliased_copy() {
    assert_eq!(
        remove_path("query A {\n  first: user\n  second: user\n  id\n}\n", "query.user", None),
        "query A {\n  id\n}\n",
    );
}

#[test]
fn remove_with_missing_ancestor_returns_input_verbatim() {
    let query = "query A { user { id } }";
    assert_eq!(remove_path(query, "query.nope.id", None), query);
    assert_eq!(remove_path(query, "query.user.name", None), query);
    assert_eq!(remove_path(query, "mutation.user", None), query);
    assert_eq!(remove_path(query, "query", None), query);
}

#[test]
fn remove_from_unparseable_text_returns_input() {
    let query = "query A { user(";
    assert_eq!(remove_path(query, "query.user", None), query);
}

#[test]
fn open_paths_lists_every_field_in_document_order() {
    let query = "query A {\n  user {\n    id\n  }\n  posts\n}\n\nmutation M {\n  save\n}\n";
    assert_eq!(
        open_paths(query),
        vec!["query", "query.user", "query.user.id", "query.posts", "mutation", "mutation.save"],
    );
}

#[test]
fn open_paths_of_unparseable_text_is_empty() {
    assert!(open_paths("query A {").is_empty());
    assert!(open_paths("").is_empty());
}

fn field_path() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["query", "mutation", "subscription"]),
        prop::collection::vec(prop::sample::select(vec!["user", "posts", "id", "title"]), 1..5),
    )
        .prop_map(|(kind, segments)| format!("{kind}.{}", segments.join(".")))
}

fn seed_query() -> impl Strategy<Value = String> {
    prop::collection::vec(field_path(), 0..4).prop_map(|paths| {
        paths.iter().fold(String::new(), |query, path| add_path(&query, path, None))
    })
}

proptest! {
    #[test]
    fn added_path_is_present(query in seed_query(), path in field_path()) {
        let added = add_path(&query, &path, None);
        prop_assert!(is_path_present(&added, &path, None));
    }

    #[test]
    fn removed_path_is_absent(query in seed_query(), path in field_path()) {
        let removed = remove_path(&add_path(&query, &path, None), &path, None);
        prop_assert!(!is_path_present(&removed, &path, None));
    }

    #[test]
    fn add_is_idempotent(query in seed_query(), path in field_path()) {
        let once = add_path(&query, &path, None);
        let twice = add_path(&once, &path, None);
        prop_assert_eq!(once, twice);
    }
}
