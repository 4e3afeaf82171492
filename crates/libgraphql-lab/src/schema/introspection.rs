use crate::schema::InputValue;
use crate::schema::NamedType;
use crate::schema::Schema;
use crate::schema::SchemaBuildError;
use crate::schema::SchemaField;
use crate::schema::TypeKind;
use crate::schema::TypeRef;
use indexmap::IndexMap;

type Result<T> = std::result::Result<T, SchemaBuildError>;

/// The standard introspection query, deep enough for seven levels of type
/// wrappers.
pub const INTROSPECTION_QUERY: &str = r#"query IntrospectionQuery {
  __schema {
    queryType { name }
    mutationType { name }
    subscriptionType { name }
    types {
      ...FullType
    }
    directives {
      name
      description
      locations
      args {
        ...InputValue
      }
    }
  }
}

fragment FullType on __Type {
  kind
  name
  description
  fields(includeDeprecated: true) {
    name
    description
    args {
      ...InputValue
    }
    type {
      ...TypeRef
    }
    isDeprecated
    deprecationReason
  }
  inputFields {
    ...InputValue
  }
  interfaces {
    ...TypeRef
  }
  enumValues(includeDeprecated: true) {
    name
    description
    isDeprecated
    deprecationReason
  }
  possibleTypes {
    ...TypeRef
  }
}

fragment InputValue on __InputValue {
  name
  description
  type {
    ...TypeRef
  }
  defaultValue
}

fragment TypeRef on __Type {
  kind
  name
  ofType {
    kind
    name
    ofType {
      kind
      name
      ofType {
        kind
        name
        ofType {
          kind
          name
          ofType {
            kind
            name
            ofType {
              kind
              name
              ofType {
                kind
                name
              }
            }
          }
        }
      }
    }
  }
}
"#;

#[derive(Debug, thiserror::Error)]
pub enum IntrospectionError {
    #[error("introspection request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("introspection request returned HTTP {status}: {body}")]
    Status {
        status: u16,
        body: String,
    },

    #[error("introspection response carried errors: {0}")]
    GraphQLErrors(serde_json::Value),

    #[error(transparent)]
    Build(#[from] SchemaBuildError),
}

/// Runs [`INTROSPECTION_QUERY`] against `endpoint` with `headers` and builds
/// a [`Schema`] from the response's `data` member.
pub async fn fetch_schema(
    client: &reqwest::Client,
    endpoint: &str,
    headers: &IndexMap<String, String>,
) -> std::result::Result<Schema, IntrospectionError> {
    let mut request = client
        .post(endpoint)
        .json(&serde_json::json!({ "query": INTROSPECTION_QUERY }));
    for (name, value) in headers {
        request = request.header(name, value);
    }

    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(IntrospectionError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let json: serde_json::Value = serde_json::from_str(&body)
        .map_err(SchemaBuildError::from)?;
    if json.get("data").is_none_or(serde_json::Value::is_null)
        && let Some(errors) = json.get("errors") {
        return Err(IntrospectionError::GraphQLErrors(errors.clone()));
    }

    tracing::debug!(endpoint, bytes = body.len(), "Fetched introspection result.");
    Ok(Schema::from_introspection(json)?)
}

impl Schema {
    /// Builds a schema from an introspection result. Accepts a full
    /// `{"data": {"__schema": ..}}` response as well as the bare
    /// `{"__schema": ..}` object.
    pub fn from_introspection(mut json: serde_json::Value) -> Result<Self> {
        if let Some(data) = json.get_mut("data") {
            json = data.take();
        }
        let Some(schema) = json.get_mut("__schema") else {
            return Err(SchemaBuildError::MissingSchema);
        };
        let schema: IntrospectionSchema = serde_json::from_value(schema.take())?;

        let mut types = IndexMap::with_capacity(schema.types.len());
        for introspected in schema.types {
            let named_type = introspected.into_named_type();
            if types.contains_key(&named_type.name) {
                return Err(SchemaBuildError::DuplicateType {
                    type_name: named_type.name,
                });
            }
            types.insert(named_type.name.clone(), named_type);
        }

        let query_type = schema.query_type
            .map(|root| root.name)
            .filter(|name| types.contains_key(name))
            .ok_or(SchemaBuildError::NoQueryType)?;

        Ok(Self {
            query_type,
            mutation_type: schema.mutation_type.map(|root| root.name),
            subscription_type: schema.subscription_type.map(|root| root.name),
            types,
        })
    }
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionSchema {
    query_type: Option<RootTypeName>,
    mutation_type: Option<RootTypeName>,
    subscription_type: Option<RootTypeName>,
    types: Vec<IntrospectionType>,
}

#[derive(serde::Deserialize)]
struct RootTypeName {
    name: String,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionType {
    kind: TypeKind,
    name: String,
    description: Option<String>,
    fields: Option<Vec<IntrospectionField>>,
    input_fields: Option<Vec<IntrospectionInputValue>>,
    interfaces: Option<Vec<IntrospectionTypeRef>>,
    possible_types: Option<Vec<IntrospectionTypeRef>>,
    enum_values: Option<Vec<IntrospectionEnumValue>>,
}
impl IntrospectionType {
    fn into_named_type(self) -> NamedType {
        let type_names = |refs: Option<Vec<IntrospectionTypeRef>>| {
            refs.unwrap_or_default()
                .into_iter()
                .filter_map(|type_ref| type_ref.name)
                .collect::<Vec<_>>()
        };

        NamedType {
            name: self.name,
            kind: self.kind,
            description: self.description,
            fields: self.fields
                .unwrap_or_default()
                .into_iter()
                .map(|field| SchemaField {
                    name: field.name,
                    description: field.description,
                    args: field.args.into_iter().map(IntrospectionInputValue::into_input_value).collect(),
                    field_type: field.field_type.into_type_ref(),
                })
                .collect(),
            input_fields: self.input_fields
                .unwrap_or_default()
                .into_iter()
                .map(IntrospectionInputValue::into_input_value)
                .collect(),
            interfaces: type_names(self.interfaces),
            possible_types: type_names(self.possible_types),
            enum_values: self.enum_values
                .unwrap_or_default()
                .into_iter()
                .map(|value| value.name)
                .collect(),
        }
    }
}

#[derive(serde::Deserialize)]
struct IntrospectionField {
    name: String,
    description: Option<String>,
    #[serde(default)]
    args: Vec<IntrospectionInputValue>,
    #[serde(rename = "type")]
    field_type: IntrospectionTypeRef,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionInputValue {
    name: String,
    description: Option<String>,
    #[serde(rename = "type")]
    value_type: IntrospectionTypeRef,
    default_value: Option<String>,
}
impl IntrospectionInputValue {
    fn into_input_value(self) -> InputValue {
        InputValue {
            name: self.name,
            description: self.description,
            value_type: self.value_type.into_type_ref(),
            default_value: self.default_value,
        }
    }
}

#[derive(serde::Deserialize)]
struct IntrospectionEnumValue {
    name: String,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionTypeRef {
    kind: TypeKind,
    name: Option<String>,
    of_type: Option<Box<IntrospectionTypeRef>>,
}
impl IntrospectionTypeRef {
    fn into_type_ref(self) -> TypeRef {
        match (self.kind, self.of_type) {
            (TypeKind::List, Some(inner)) => TypeRef::List(Box::new(inner.into_type_ref())),
            (TypeKind::NonNull, Some(inner)) => TypeRef::NonNull(Box::new(inner.into_type_ref())),
            (_, _) => TypeRef::Named(self.name.unwrap_or_default()),
        }
    }
}
