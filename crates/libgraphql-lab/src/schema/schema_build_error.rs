use crate::ast;

#[derive(Debug, thiserror::Error)]
pub enum SchemaBuildError {
    #[error("invalid introspection JSON: {0}")]
    InvalidIntrospectionJson(#[from] serde_json::Error),

    #[error("introspection result has no `__schema` member")]
    MissingSchema,

    #[error("failed to parse SDL: {0}")]
    SdlParse(#[from] ast::schema::ParseError),

    #[error("type `{type_name}` is defined more than once")]
    DuplicateType {
        type_name: String,
    },

    #[error("schema declares no query root type")]
    NoQueryType,
}
