use crate::operation::OperationKind;
use crate::schema::TypeRef;
use indexmap::IndexMap;

/// The parts of a server's schema the playground needs: root operation
/// types and every named type with its fields and arguments.
#[derive(Clone, Debug, PartialEq)]
pub struct Schema {
    pub(super) query_type: String,
    pub(super) mutation_type: Option<String>,
    pub(super) subscription_type: Option<String>,
    pub(super) types: IndexMap<String, NamedType>,
}
impl Schema {
    pub fn query_type(&self) -> &NamedType {
        // Both builders refuse to produce a schema without its query type.
        &self.types[self.query_type.as_str()]
    }

    pub fn mutation_type(&self) -> Option<&NamedType> {
        self.types.get(self.mutation_type.as_deref()?)
    }

    pub fn subscription_type(&self) -> Option<&NamedType> {
        self.types.get(self.subscription_type.as_deref()?)
    }

    pub fn root_type(&self, kind: OperationKind) -> Option<&NamedType> {
        match kind {
            OperationKind::Mutation => self.mutation_type(),
            OperationKind::Query => Some(self.query_type()),
            OperationKind::Subscription => self.subscription_type(),
        }
    }

    pub fn named_type(&self, name: &str) -> Option<&NamedType> {
        self.types.get(name)
    }

    pub fn types(&self) -> impl Iterator<Item = &NamedType> {
        self.types.values()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Enum,
    InputObject,
    Interface,
    List,
    NonNull,
    Object,
    Scalar,
    Union,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NamedType {
    pub name: String,
    pub kind: TypeKind,
    pub description: Option<String>,
    pub fields: Vec<SchemaField>,
    pub input_fields: Vec<InputValue>,
    pub interfaces: Vec<String>,
    pub possible_types: Vec<String>,
    pub enum_values: Vec<String>,
}
impl NamedType {
    pub(super) fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            description: None,
            fields: vec![],
            input_fields: vec![],
            interfaces: vec![],
            possible_types: vec![],
            enum_values: vec![],
        }
    }

    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// The field named `name` if this is an object type. Path resolution
    /// only descends through object types.
    pub fn object_field(&self, name: &str) -> Option<&SchemaField> {
        match self.kind {
            TypeKind::Object => self.field(name),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SchemaField {
    pub name: String,
    pub description: Option<String>,
    pub args: Vec<InputValue>,
    pub field_type: TypeRef,
}
impl SchemaField {
    pub fn argument(&self, name: &str) -> Option<&InputValue> {
        self.args.iter().find(|arg| arg.name == name)
    }
}

/// An argument or input-object field.
#[derive(Clone, Debug, PartialEq)]
pub struct InputValue {
    pub name: String,
    pub description: Option<String>,
    pub value_type: TypeRef,
    /// The default as GraphQL value text, e.g. `10` or `"asc"`.
    pub default_value: Option<String>,
}
