//! An in-memory model of a server's schema, built from an introspection
//! response or from SDL, and the walk that resolves a
//! [`FieldPath`](crate::FieldPath) to its field definition.

mod field_resolver;
mod introspection;
#[allow(clippy::module_inception)]
mod schema;
mod schema_build_error;
mod sdl;
mod type_ref;

pub use introspection::INTROSPECTION_QUERY;
pub use introspection::IntrospectionError;
pub use introspection::fetch_schema;
pub use schema::InputValue;
pub use schema::NamedType;
pub use schema::Schema;
pub use schema::SchemaField;
pub use schema::TypeKind;
pub use schema_build_error::SchemaBuildError;
pub use type_ref::TypeRef;

#[cfg(test)]
mod tests;
