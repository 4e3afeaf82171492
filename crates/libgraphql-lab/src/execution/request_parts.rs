use crate::env::Environment;
use crate::env::interpolate;
use crate::execution::ExecutionError;
use crate::operation::Operation;
use indexmap::IndexMap;

type Result<T> = std::result::Result<T, ExecutionError>;

/// An operation's JSON text fields, templated and parsed, ready to send.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestParts {
    pub headers: IndexMap<String, String>,
    pub variables: serde_json::Value,
    pub extensions: serde_json::Value,
}
impl RequestParts {
    /// Interpolates `env` into the operation's headers, variables and
    /// extensions and parses each. Empty text stands for `{}`. Header values
    /// that are not strings are sent as their JSON text.
    pub fn resolve(operation: &Operation, env: &Environment) -> Result<Self> {
        let headers = match parse_object("headers", &operation.headers, env)? {
            serde_json::Value::Object(map) => map
                .into_iter()
                .map(|(name, value)| match value {
                    serde_json::Value::String(text) => (name, text),
                    other => (name, other.to_string()),
                })
                .collect(),
            _ => IndexMap::new(),
        };

        Ok(Self {
            headers,
            variables: parse_object("variables", &operation.variables, env)?,
            extensions: parse_object("extensions", &operation.extensions, env)?,
        })
    }

    pub(super) fn request_body(&self, query: &str) -> serde_json::Value {
        serde_json::json!({
            "query": query,
            "variables": self.variables,
            "extensions": self.extensions,
        })
    }

    /// Headers as the object a graphql-ws `connection_init` carries.
    pub(super) fn connection_params(&self) -> serde_json::Map<String, serde_json::Value> {
        self.headers
            .iter()
            .map(|(name, value)| (name.clone(), serde_json::Value::String(value.clone())))
            .collect()
    }
}

fn parse_object(
    field: &'static str,
    text: &str,
    env: &Environment,
) -> Result<serde_json::Value> {
    if text.trim().is_empty() {
        return Ok(serde_json::Value::Object(Default::default()));
    }

    let value = serde_json::from_str::<serde_json::Value>(&interpolate(text, env))
        .map_err(|source| ExecutionError::InvalidJson { field, source })?;
    match value {
        serde_json::Value::Object(_) => Ok(value),
        _ => Err(ExecutionError::NotAnObject { field }),
    }
}
