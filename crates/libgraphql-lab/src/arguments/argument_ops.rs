use crate::ast;
use crate::document::OperationDefinitionExt;
use crate::document::QueryDocument;
use crate::path;
use crate::path::FieldPath;
use crate::schema::Schema;

/// Whether the field addressed by `path` (first match at each level) carries
/// an argument named `arg_name`.
pub fn is_argument_present(
    query: &str,
    path: &str,
    arg_name: &str,
    operation_name: Option<&str>,
) -> bool {
    let Ok(path) = path.parse::<FieldPath>() else {
        return false;
    };
    let Some(doc) = QueryDocument::parse(query) else {
        return false;
    };

    doc.find_operation(path.kind(), operation_name)
        .and_then(|index| doc.operation(index))
        .and_then(|op| path::find_field(op.selection_set(), path.segments()))
        .is_some_and(|field| field.arguments.iter().any(|(name, _)| name == arg_name))
}

/// Adds `arg_name: $var` to the field addressed by `path` and declares
/// `$var` on the operation with the argument's type from `schema`.
///
/// `$var` is `arg_name` if no variable of that name is declared yet, and
/// otherwise the first free `arg_name2`, `arg_name3`, ... Each call adds one
/// variable and one argument, even when the field already has `arg_name`.
///
/// The field chain is created first when missing. When the path does not
/// lead to a schema field that declares `arg_name`, `query` is returned
/// unchanged.
pub fn add_argument(
    query: &str,
    path: &str,
    arg_name: &str,
    schema: &Schema,
    operation_name: Option<&str>,
) -> String {
    let Ok(field_path) = path.parse::<FieldPath>() else {
        return query.to_string();
    };
    let Some(schema_arg) = schema
        .resolve_field(&field_path)
        .and_then(|field| field.argument(arg_name))
    else {
        tracing::debug!("No argument `{arg_name}` on schema field `{field_path}`; nothing to add.");
        return query.to_string();
    };
    let var_type = schema_arg.value_type.to_ast_type();

    let query = if path::is_path_present(query, path, operation_name) {
        query.to_string()
    } else {
        path::add_path(query, path, operation_name)
    };

    let Some(mut doc) = QueryDocument::parse(&query) else {
        return query;
    };
    let Some(op) = doc
        .find_operation(field_path.kind(), operation_name)
        .and_then(|index| doc.operation_mut(index))
    else {
        return query;
    };

    let var_name = unique_variable_name(op.variable_definitions(), arg_name);
    let Some(field) = path::find_field_mut(op.selection_set_mut(), field_path.segments()) else {
        return query;
    };
    field.arguments.push((
        arg_name.to_string(),
        ast::operation::Value::Variable(var_name.clone()),
    ));

    op.variable_definitions_mut().push(ast::operation::VariableDefinition {
        position: ast::synthetic_pos(),
        name: var_name.clone(),
        var_type,
        default_value: None,
    });

    tracing::debug!("Added `{arg_name}: ${var_name}` to `{field_path}`.");
    doc.print()
}

/// Removes every `arg_name` argument from the field addressed by `path`.
///
/// The variable that backed the argument stays declared on the operation.
/// If the field or the argument is absent, `query` is returned unchanged.
pub fn remove_argument(
    query: &str,
    path: &str,
    arg_name: &str,
    operation_name: Option<&str>,
) -> String {
    let Ok(field_path) = path.parse::<FieldPath>() else {
        return query.to_string();
    };
    let Some(mut doc) = QueryDocument::parse(query) else {
        return query.to_string();
    };
    let Some(field) = doc
        .find_operation(field_path.kind(), operation_name)
        .and_then(|index| doc.operation_mut(index))
        .and_then(|op| path::find_field_mut(op.selection_set_mut(), field_path.segments()))
    else {
        return query.to_string();
    };

    let before = field.arguments.len();
    field.arguments.retain(|(name, _)| name != arg_name);
    if field.arguments.len() == before {
        return query.to_string();
    }

    doc.print()
}

fn unique_variable_name(
    definitions: &[ast::operation::VariableDefinition],
    arg_name: &str,
) -> String {
    let is_taken = |candidate: &str| definitions.iter().any(|def| def.name == candidate);
    if !is_taken(arg_name) {
        return arg_name.to_string();
    }
    (2..)
        .map(|suffix| format!("{arg_name}{suffix}"))
        .find(|candidate| !is_taken(candidate))
        .unwrap_or_else(|| arg_name.to_string())
}
