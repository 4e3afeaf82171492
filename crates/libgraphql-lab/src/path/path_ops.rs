use crate::ast;
use crate::document::OperationDefinitionExt;
use crate::document::QueryDocument;
use crate::path::FieldPath;
use indexmap::IndexSet;

fn parse_path(path: &str) -> Option<FieldPath> {
    match path.parse::<FieldPath>() {
        Ok(path) => Some(path),
        Err(err) => {
            tracing::debug!(error = %err, "Ignoring malformed field path.");
            None
        },
    }
}

/// Whether the field chain addressed by `path` exists in the matching
/// operation of `query`. A bare operation-kind path only asks whether such
/// an operation exists.
pub fn is_path_present(query: &str, path: &str, operation_name: Option<&str>) -> bool {
    let Some(path) = parse_path(path) else {
        return false;
    };
    let Some(doc) = QueryDocument::parse(query) else {
        return false;
    };
    let Some(op) = doc
        .find_operation(path.kind(), operation_name)
        .and_then(|index| doc.operation(index))
    else {
        return false;
    };

    chain_exists(op.selection_set(), path.segments())
}

/// Inline fragments are transparent: a field selected under `... on T`
/// counts as a child of the fragment's enclosing field.
fn chain_exists(selection_set: &ast::operation::SelectionSet, segments: &[String]) -> bool {
    let Some((head, tail)) = segments.split_first() else {
        return true;
    };
    selection_set.items.iter().any(|selection| match selection {
        ast::operation::Selection::Field(field) if field.name == *head =>
            chain_exists(&field.selection_set, tail),
        ast::operation::Selection::InlineFragment(fragment) =>
            chain_exists(&fragment.selection_set, segments),
        _ => false,
    })
}

/// Ensures the field chain addressed by `path` exists, creating the
/// operation and any missing fields along the way, and returns the printed
/// document.
///
/// Text that does not parse is replaced by a fresh document holding only the
/// addressed chain. A missing operation is named `operation_name` when one
/// is given, and `Untitled` only otherwise.
pub fn add_path(query: &str, path: &str, operation_name: Option<&str>) -> String {
    let Some(path) = parse_path(path) else {
        return query.to_string();
    };

    let mut doc = QueryDocument::parse(query).unwrap_or_else(QueryDocument::empty);
    let index = doc.find_or_insert_operation(path.kind(), operation_name);
    if let Some(op) = doc.operation_mut(index) {
        ensure_chain(op.selection_set_mut(), path.segments());
    }

    tracing::debug!("Added `{path}` to the operation.");
    doc.print()
}

fn ensure_chain(selection_set: &mut ast::operation::SelectionSet, segments: &[String]) {
    let Some((head, tail)) = segments.split_first() else {
        return;
    };

    let existing = selection_set.items.iter().position(|selection| matches!(
        selection,
        ast::operation::Selection::Field(field) if field.name == *head,
    ));
    let index = existing.unwrap_or_else(|| {
        selection_set.items.push(ast::operation::Selection::Field(ast::new_field(head)));
        selection_set.items.len() - 1
    });

    if let ast::operation::Selection::Field(field) = &mut selection_set.items[index] {
        ensure_chain(&mut field.selection_set, tail);
    }
}

/// Removes the field named by the last segment of `path` from its parent's
/// selection set and returns the printed document.
///
/// When that empties the operation, the operation is kept as `kind Name {}`
/// (without its variable definitions) next to any other definitions. If the
/// text does not parse, or any segment of the path is missing, `query` is
/// returned as-is.
pub fn remove_path(query: &str, path: &str, operation_name: Option<&str>) -> String {
    let Some(path) = parse_path(path) else {
        return query.to_string();
    };
    let Some((leaf, parents)) = path.segments().split_last() else {
        return query.to_string();
    };
    let Some(mut doc) = QueryDocument::parse(query) else {
        return query.to_string();
    };
    let Some(op) = doc
        .find_operation(path.kind(), operation_name)
        .and_then(|index| doc.operation_mut(index))
    else {
        return query.to_string();
    };

    if !remove_leaf(op.selection_set_mut(), parents, leaf) {
        return query.to_string();
    }

    if op.selection_set().items.is_empty() {
        tracing::debug!("Removing `{path}` emptied the operation; collapsing its body.");
        op.clear_header();
    }

    doc.print()
}

fn remove_leaf(
    selection_set: &mut ast::operation::SelectionSet,
    parents: &[String],
    leaf: &str,
) -> bool {
    match parents.split_first() {
        None => {
            let before = selection_set.items.len();
            selection_set.items.retain(|selection| !matches!(
                selection,
                ast::operation::Selection::Field(field) if field.name == leaf,
            ));
            selection_set.items.len() != before
        },

        Some((head, tail)) => {
            let mut removed = false;
            for selection in selection_set.items.iter_mut() {
                if let ast::operation::Selection::Field(field) = selection
                    && field.name == *head {
                    removed |= remove_leaf(&mut field.selection_set, tail, leaf);
                }
            }
            removed
        },
    }
}

/// The first field along `segments`, taking the first same-named field at
/// each level.
pub(crate) fn find_field<'a>(
    selection_set: &'a ast::operation::SelectionSet,
    segments: &[String],
) -> Option<&'a ast::operation::Field> {
    let (head, tail) = segments.split_first()?;
    let field = selection_set.items.iter().find_map(|selection| match selection {
        ast::operation::Selection::Field(field) if field.name == *head => Some(field),
        _ => None,
    })?;

    if tail.is_empty() {
        Some(field)
    } else {
        find_field(&field.selection_set, tail)
    }
}

pub(crate) fn find_field_mut<'a>(
    selection_set: &'a mut ast::operation::SelectionSet,
    segments: &[String],
) -> Option<&'a mut ast::operation::Field> {
    let (head, tail) = segments.split_first()?;
    let field = selection_set.items.iter_mut().find_map(|selection| match selection {
        ast::operation::Selection::Field(field) if field.name == *head => Some(field),
        _ => None,
    })?;

    if tail.is_empty() {
        Some(field)
    } else {
        find_field_mut(&mut field.selection_set, tail)
    }
}

/// Every field path in `query`, in document order, each operation's bare
/// kind path listed before its fields. The builder expands exactly these
/// tree nodes. Empty when the text does not parse.
pub fn open_paths(query: &str) -> Vec<String> {
    let Some(doc) = QueryDocument::parse(query) else {
        return vec![];
    };

    let mut paths = IndexSet::new();
    for def in doc.definitions() {
        if let ast::operation::Definition::Operation(op) = def {
            let root = FieldPath::new(op.kind(), vec![]);
            paths.insert(root.to_string());
            collect_paths(op.selection_set(), &root, &mut paths);
        }
    }
    paths.into_iter().collect()
}

fn collect_paths(
    selection_set: &ast::operation::SelectionSet,
    parent: &FieldPath,
    paths: &mut IndexSet<String>,
) {
    for selection in &selection_set.items {
        if let ast::operation::Selection::Field(field) = selection {
            let path = parent.child(&field.name);
            paths.insert(path.to_string());
            collect_paths(&field.selection_set, &path, paths);
        }
    }
}
