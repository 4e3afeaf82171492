//! Parse/print round-trip of operation text, tolerant of the vestigial empty
//! blocks that builder edits leave behind.

mod heal;
mod operation_definition_ext;
mod operation_info;
mod query_document;

pub use heal::heal;
pub(crate) use operation_definition_ext::OperationDefinitionExt;
pub use operation_info::operation_hash;
pub use operation_info::operation_name;
pub use query_document::QueryDocument;

#[cfg(test)]
mod tests;
