use crate::ast;
use crate::document::OperationDefinitionExt;
use crate::document::QueryDocument;
use regex::Regex;
use sha2::Digest;
use sha2::Sha256;
use std::sync::OnceLock;

fn operation_header_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(query|mutation|subscription)\s+([a-zA-Z0-9_]+)")
            .expect("operation header pattern is a valid regex")
    })
}

/// Name of the first operation definition in `text`.
///
/// Text that does not parse (a half-typed operation in the editor, say) is
/// scanned for a `kind Name` header instead, so the operation keeps a
/// sensible name while it is being edited.
pub fn operation_name(text: &str) -> Option<String> {
    match QueryDocument::parse(text) {
        Some(doc) => doc.definitions().iter().find_map(|def| match def {
            ast::operation::Definition::Operation(op) => op.name().map(str::to_string),
            ast::operation::Definition::Fragment(_) => None,
        }),

        None => operation_header_pattern()
            .captures(text)
            .map(|caps| caps[2].to_string()),
    }
}

/// Hex SHA-256 of the canonical printed query followed by a newline, so that
/// formatting differences do not change the hash. `None` when the query
/// does not parse.
pub fn operation_hash(query: &str) -> Option<String> {
    let canonical = format!("{}\n", QueryDocument::parse(query)?.print());
    Some(hex::encode(Sha256::digest(canonical.as_bytes())))
}
