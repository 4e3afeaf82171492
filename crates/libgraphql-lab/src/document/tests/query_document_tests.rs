use crate::document::QueryDocument;
use proptest::prelude::*;

#[test]
fn blank_text_is_absent() {
    assert!(QueryDocument::parse("").is_none());
    assert!(QueryDocument::parse("  \n\t").is_none());
}

#[test]
fn invalid_text_is_absent() {
    assert!(QueryDocument::parse("query A { user(").is_none());
    assert!(QueryDocument::parse("not graphql at all").is_none());
}

#[test]
fn prints_canonical_form() {
    let doc = QueryDocument::parse("query   A{user(id:1){ id name }}").unwrap();
    assert_eq!(
        doc.print(),
        "query A {\n  user(id: 1) {\n    id\n    name\n  }\n}\n",
    );
}

#[test]
fn empty_operation_body_round_trips() {
    let doc = QueryDocument::parse("query A {}").unwrap();
    assert_eq!(doc.definitions().len(), 1);
    assert_eq!(doc.print(), "query A {}\n");
}

#[test]
fn empty_operation_sits_next_to_other_definitions() {
    let text = "query A {}\n\nquery B {\n  b\n}\n";
    let doc = QueryDocument::parse(text).unwrap();
    assert_eq!(doc.definitions().len(), 2);
    assert_eq!(doc.print(), text);
}

#[test]
fn vestigial_nested_braces_are_healed() {
    let doc = QueryDocument::parse("query A {\n  user {}\n}").unwrap();
    assert_eq!(doc.print(), "query A {\n  user\n}\n");
}

#[test]
fn empty_document_prints_nothing() {
    assert_eq!(QueryDocument::empty().print(), "");
}

fn field_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["id", "name", "user", "posts", "title"]).prop_map(str::to_string)
}

fn selection_text(depth: u32) -> BoxedStrategy<String> {
    let leaf = field_name();
    if depth == 0 {
        return leaf.boxed();
    }
    prop_oneof![
        3 => leaf,
        1 => (field_name(), prop::collection::vec(selection_text(depth - 1), 1..4))
            .prop_map(|(name, children)| format!("{name} {{ {} }}", children.join(" "))),
    ]
    .boxed()
}

fn operation_text() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["query", "mutation", "subscription"]),
        "[A-Z][a-zA-Z0-9]{0,8}",
        prop::collection::vec(selection_text(3), 0..4),
    )
        .prop_map(|(kind, name, selections)| {
            format!("{kind} {name} {{ {} }}", selections.join("\n"))
        })
}

proptest! {
    #[test]
    fn printing_is_idempotent(text in operation_text()) {
        let first = QueryDocument::parse(&text).unwrap().print();
        let second = QueryDocument::parse(&first).unwrap().print();
        prop_assert_eq!(first, second);
    }
}
