use crate::ast;
use crate::schema::InputValue;
use crate::schema::NamedType;
use crate::schema::Schema;
use crate::schema::SchemaBuildError;
use crate::schema::SchemaField;
use crate::schema::TypeKind;
use crate::schema::TypeRef;
use indexmap::IndexMap;

type Result<T> = std::result::Result<T, SchemaBuildError>;

const BUILTIN_SCALARS: [&str; 5] = ["Boolean", "Float", "ID", "Int", "String"];

impl Schema {
    /// Builds a schema from SDL text. Root types come from an explicit
    /// `schema { .. }` definition when there is one, and otherwise from
    /// types named `Query`, `Mutation` and `Subscription`. Type extensions
    /// are merged into the type they extend.
    pub fn from_sdl(text: &str) -> Result<Self> {
        let doc = graphql_parser::schema::parse_schema::<String>(text)?.into_static();

        let mut types = IndexMap::<String, NamedType>::new();
        for scalar in BUILTIN_SCALARS {
            types.insert(scalar.to_string(), NamedType::new(scalar, TypeKind::Scalar));
        }

        let mut schema_def = None;
        let mut extensions = vec![];
        for def in doc.definitions {
            match def {
                ast::schema::Definition::SchemaDefinition(def) => schema_def = Some(def),
                ast::schema::Definition::TypeDefinition(def) => {
                    let named_type = named_type_from_definition(def);
                    let is_builtin = BUILTIN_SCALARS.contains(&named_type.name.as_str());
                    if types.contains_key(&named_type.name) && !is_builtin {
                        return Err(SchemaBuildError::DuplicateType {
                            type_name: named_type.name,
                        });
                    }
                    types.insert(named_type.name.clone(), named_type);
                },
                ast::schema::Definition::TypeExtension(ext) => extensions.push(ext),
                ast::schema::Definition::DirectiveDefinition(_) => (),
            }
        }

        for ext in extensions {
            apply_extension(&mut types, ext);
        }
        fill_possible_types(&mut types);

        let root_name = |explicit: Option<String>, conventional: &str| {
            explicit.or_else(|| {
                types.contains_key(conventional).then(|| conventional.to_string())
            })
        };
        let (query, mutation, subscription) = match schema_def {
            Some(def) => (def.query, def.mutation, def.subscription),
            None => (None, None, None),
        };
        let query_type = root_name(query, "Query")
            .filter(|name| types.contains_key(name))
            .ok_or(SchemaBuildError::NoQueryType)?;
        let mutation_type = root_name(mutation, "Mutation");
        let subscription_type = root_name(subscription, "Subscription");

        Ok(Self {
            query_type,
            mutation_type,
            subscription_type,
            types,
        })
    }
}

fn named_type_from_definition(def: ast::schema::TypeDefinition) -> NamedType {
    use graphql_parser::schema::TypeDefinition as TypeDef;

    match def {
        TypeDef::Enum(enum_type) => NamedType {
            description: enum_type.description,
            enum_values: enum_type.values.into_iter().map(|value| value.name).collect(),
            ..NamedType::new(enum_type.name, TypeKind::Enum)
        },
        TypeDef::InputObject(input) => NamedType {
            description: input.description,
            input_fields: input.fields.iter().map(input_value).collect(),
            ..NamedType::new(input.name, TypeKind::InputObject)
        },
        TypeDef::Interface(iface) => NamedType {
            description: iface.description,
            fields: iface.fields.iter().map(schema_field).collect(),
            interfaces: iface.implements_interfaces,
            ..NamedType::new(iface.name, TypeKind::Interface)
        },
        TypeDef::Object(object) => NamedType {
            description: object.description,
            fields: object.fields.iter().map(schema_field).collect(),
            interfaces: object.implements_interfaces,
            ..NamedType::new(object.name, TypeKind::Object)
        },
        TypeDef::Scalar(scalar) => NamedType {
            description: scalar.description,
            ..NamedType::new(scalar.name, TypeKind::Scalar)
        },
        TypeDef::Union(union_type) => NamedType {
            description: union_type.description,
            possible_types: union_type.types,
            ..NamedType::new(union_type.name, TypeKind::Union)
        },
    }
}

fn apply_extension(types: &mut IndexMap<String, NamedType>, ext: ast::schema::TypeExtension) {
    use graphql_parser::schema::TypeExtension as TypeExt;

    let name = match &ext {
        TypeExt::Enum(e) => &e.name,
        TypeExt::InputObject(e) => &e.name,
        TypeExt::Interface(e) => &e.name,
        TypeExt::Object(e) => &e.name,
        TypeExt::Scalar(e) => &e.name,
        TypeExt::Union(e) => &e.name,
    };
    let Some(target) = types.get_mut(name) else {
        tracing::warn!("Ignoring extension of undefined type `{name}`.");
        return;
    };

    match ext {
        TypeExt::Enum(e) =>
            target.enum_values.extend(e.values.into_iter().map(|value| value.name)),
        TypeExt::InputObject(e) =>
            target.input_fields.extend(e.fields.iter().map(input_value)),
        TypeExt::Interface(e) => {
            target.fields.extend(e.fields.iter().map(schema_field));
            target.interfaces.extend(e.implements_interfaces);
        },
        TypeExt::Object(e) => {
            target.fields.extend(e.fields.iter().map(schema_field));
            target.interfaces.extend(e.implements_interfaces);
        },
        TypeExt::Scalar(_) => (),
        TypeExt::Union(e) => target.possible_types.extend(e.types),
    }
}

/// Interfaces list their implementors as possible types, the way an
/// introspection result reports them.
fn fill_possible_types(types: &mut IndexMap<String, NamedType>) {
    let implementations = types
        .values()
        .filter(|ty| ty.kind == TypeKind::Object)
        .flat_map(|ty| ty.interfaces.iter().map(|iface| (iface.clone(), ty.name.clone())))
        .collect::<Vec<_>>();
    for (iface, implementor) in implementations {
        if let Some(iface_type) = types.get_mut(&iface)
            && iface_type.kind == TypeKind::Interface {
            iface_type.possible_types.push(implementor);
        }
    }
}

fn schema_field(field: &ast::schema::Field) -> SchemaField {
    SchemaField {
        name: field.name.clone(),
        description: field.description.clone(),
        args: field.arguments.iter().map(input_value).collect(),
        field_type: TypeRef::from_ast_type(&field.field_type),
    }
}

fn input_value(value: &ast::schema::InputValue) -> InputValue {
    InputValue {
        name: value.name.clone(),
        description: value.description.clone(),
        value_type: TypeRef::from_ast_type(&value.value_type),
        default_value: value.default_value.as_ref().map(ToString::to_string),
    }
}
