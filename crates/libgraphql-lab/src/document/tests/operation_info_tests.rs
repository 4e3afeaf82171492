use crate::document::operation_hash;
use crate::document::operation_name;
use sha2::Digest;
use sha2::Sha256;

#[test]
fn name_of_first_operation() {
    assert_eq!(operation_name("query GetUser { user { id } }").as_deref(), Some("GetUser"));
    assert_eq!(
        operation_name("fragment F on User { id }\nmutation Save { save }").as_deref(),
        Some("Save"),
    );
}

#[test]
fn anonymous_operation_has_no_name() {
    assert_eq!(operation_name("{ user { id } }"), None);
    assert_eq!(operation_name("query { user { id } }"), None);
}

#[test]
fn unparseable_text_falls_back_to_header_scan() {
    assert_eq!(operation_name("query Broken { user(").as_deref(), Some("Broken"));
    assert_eq!(operation_name("subscription OnPost {").as_deref(), Some("OnPost"));
    assert_eq!(operation_name("{ user("), None);
}

#[test]
fn hash_ignores_formatting() {
    let compact = operation_hash("query A{a}").unwrap();
    let spaced = operation_hash("query A {\n  a\n}\n").unwrap();
    assert_eq!(compact, spaced);
    assert_eq!(compact, hex::encode(Sha256::digest(b"query A {\n  a\n}\n\n")));
}

#[test]
fn hash_distinguishes_queries() {
    assert_ne!(operation_hash("query A { a }"), operation_hash("query A { b }"));
}

#[test]
fn hash_of_unparseable_query_is_none() {
    assert_eq!(operation_hash("query A {"), None);
}
