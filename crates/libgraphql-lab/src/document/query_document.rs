use crate::ast;
use crate::document::OperationDefinitionExt;
use crate::document::heal::EMPTY_BODY_PLACEHOLDER;
use crate::document::heal::heal;
use crate::document::operation_definition_ext::new_operation;
use crate::operation::OperationKind;

/// Name given to operations the builder has to create from scratch.
pub const DEFAULT_OPERATION_NAME: &str = "Untitled";

/// An ephemeral parsed form of operation text.
///
/// Nothing holds on to a `QueryDocument` between edits: callers parse the
/// stored text, edit, [`print`](Self::print) and throw the tree away.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryDocument {
    ast: ast::operation::Document,
}
impl QueryDocument {
    /// A document with no definitions, used when the stored text is empty or
    /// does not parse.
    pub fn empty() -> Self {
        Self {
            ast: ast::operation::Document {
                definitions: vec![],
            },
        }
    }

    /// Heals and parses `text`. Returns `None` when the text is blank or is
    /// not valid GraphQL; the syntax error is logged, never returned.
    pub fn parse(text: &str) -> Option<Self> {
        if text.trim().is_empty() {
            return None;
        }

        let healed = heal(text);
        match graphql_parser::query::parse_query::<String>(&healed) {
            Ok(doc) => {
                let mut ast = doc.into_static();
                strip_empty_body_placeholders(&mut ast);
                Some(Self { ast })
            },

            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "Operation text does not parse; treating the document as absent.",
                );
                None
            },
        }
    }

    pub fn ast(&self) -> &ast::operation::Document {
        &self.ast
    }

    pub fn definitions(&self) -> &[ast::operation::Definition] {
        &self.ast.definitions
    }

    /// Prints the canonical text form. Operations whose body is empty print
    /// as `kind Name {}` so the text stays parseable.
    pub fn print(&self) -> String {
        collapse_empty_bodies(&self.ast.to_string())
    }

    /// Index of the operation definition of `kind`, matched by
    /// `operation_name` when given and otherwise the first one of that kind
    /// in document order.
    pub(crate) fn find_operation(
        &self,
        kind: OperationKind,
        operation_name: Option<&str>,
    ) -> Option<usize> {
        self.ast.definitions.iter().position(|def| match def {
            ast::operation::Definition::Operation(op) => {
                op.kind() == kind
                    && operation_name.is_none_or(|name| op.name() == Some(name))
            },
            ast::operation::Definition::Fragment(_) => false,
        })
    }

    /// Like [`find_operation`](Self::find_operation), but appends a new empty
    /// operation when none matches. It is named `operation_name` when one
    /// was asked for and [`DEFAULT_OPERATION_NAME`] otherwise.
    pub(crate) fn find_or_insert_operation(
        &mut self,
        kind: OperationKind,
        operation_name: Option<&str>,
    ) -> usize {
        if let Some(index) = self.find_operation(kind, operation_name) {
            return index;
        }

        let name = operation_name.unwrap_or(DEFAULT_OPERATION_NAME);
        tracing::debug!("Creating missing `{kind} {name}` operation.");
        self.ast.definitions.push(ast::operation::Definition::Operation(
            new_operation(kind, name),
        ));
        self.ast.definitions.len() - 1
    }

    pub(crate) fn operation(&self, index: usize) -> Option<&ast::operation::OperationDefinition> {
        match self.ast.definitions.get(index)? {
            ast::operation::Definition::Operation(op) => Some(op),
            ast::operation::Definition::Fragment(_) => None,
        }
    }

    pub(crate) fn operation_mut(
        &mut self,
        index: usize,
    ) -> Option<&mut ast::operation::OperationDefinition> {
        match self.ast.definitions.get_mut(index)? {
            ast::operation::Definition::Operation(op) => Some(op),
            ast::operation::Definition::Fragment(_) => None,
        }
    }
}

fn strip_empty_body_placeholders(doc: &mut ast::operation::Document) {
    let is_placeholder = |selection: &ast::operation::Selection| matches!(
        selection,
        ast::operation::Selection::Field(field) if field.name == EMPTY_BODY_PLACEHOLDER
    );

    for def in doc.definitions.iter_mut() {
        let selection_set = match def {
            ast::operation::Definition::Operation(op) => op.selection_set_mut(),
            ast::operation::Definition::Fragment(frag) => &mut frag.selection_set,
        };
        selection_set.items.retain(|selection| !is_placeholder(selection));
    }
}

/// The printer renders an empty top-level body as `{` and `}` on two lines.
/// Fold those into `{}`.
fn collapse_empty_bodies(printed: &str) -> String {
    let mut collapsed = String::with_capacity(printed.len());
    let mut lines = printed.lines().peekable();
    while let Some(line) = lines.next() {
        collapsed.push_str(line);
        let is_top_level_open = line.ends_with('{')
            && !line.starts_with(char::is_whitespace);
        if is_top_level_open && lines.peek() == Some(&"}") {
            lines.next();
            collapsed.push('}');
        }
        collapsed.push('\n');
    }
    collapsed
}
