use crate::ast;
use std::fmt;

/// A reference to a named type, possibly wrapped in list and non-null
/// modifiers. Prints as a GraphQL type signature (`[ID!]!`).
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TypeRef {
    List(Box<TypeRef>),
    Named(String),
    NonNull(Box<TypeRef>),
}
impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// The innermost named type, with every wrapper peeled off.
    pub fn named_type(&self) -> &str {
        match self {
            Self::List(inner) | Self::NonNull(inner) => inner.named_type(),
            Self::Named(name) => name,
        }
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }

    pub fn to_ast_type(&self) -> ast::operation::Type {
        match self {
            Self::List(inner) =>
                ast::operation::Type::ListType(Box::new(inner.to_ast_type())),
            Self::Named(name) =>
                ast::operation::Type::NamedType(name.clone()),
            Self::NonNull(inner) =>
                ast::operation::Type::NonNullType(Box::new(inner.to_ast_type())),
        }
    }

    pub(super) fn from_ast_type(ast_type: &ast::schema::Type) -> Self {
        match ast_type {
            ast::schema::Type::ListType(inner) =>
                Self::List(Box::new(Self::from_ast_type(inner))),
            ast::schema::Type::NamedType(name) =>
                Self::Named(name.clone()),
            ast::schema::Type::NonNullType(inner) =>
                Self::NonNull(Box::new(Self::from_ast_type(inner))),
        }
    }
}
impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::Named(name) => f.write_str(name),
            Self::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}
