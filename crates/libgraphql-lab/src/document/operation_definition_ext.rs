use crate::ast;
use crate::operation::OperationKind;
use ast::operation::OperationDefinition as OpDef;

/// Uniform access to the four shapes an operation definition can take in the
/// AST. The `{ ... }` shorthand counts as an anonymous query.
pub(crate) trait OperationDefinitionExt {
    fn kind(&self) -> OperationKind;
    fn name(&self) -> Option<&str>;
    fn selection_set(&self) -> &ast::operation::SelectionSet;
    fn selection_set_mut(&mut self) -> &mut ast::operation::SelectionSet;
    fn variable_definitions(&self) -> &[ast::operation::VariableDefinition];

    /// Promotes the shorthand form to a full `query` first, since only a full
    /// definition can declare variables.
    fn variable_definitions_mut(&mut self) -> &mut Vec<ast::operation::VariableDefinition>;

    /// Drops variable definitions and directives, leaving the bare
    /// `kind Name` header in front of the (empty) body.
    fn clear_header(&mut self);
}

impl OperationDefinitionExt for ast::operation::OperationDefinition {
    fn kind(&self) -> OperationKind {
        match self {
            OpDef::SelectionSet(_) | OpDef::Query(_) => OperationKind::Query,
            OpDef::Mutation(_) => OperationKind::Mutation,
            OpDef::Subscription(_) => OperationKind::Subscription,
        }
    }

    fn name(&self) -> Option<&str> {
        match self {
            OpDef::SelectionSet(_) => None,
            OpDef::Query(q) => q.name.as_deref(),
            OpDef::Mutation(m) => m.name.as_deref(),
            OpDef::Subscription(s) => s.name.as_deref(),
        }
    }

    fn selection_set(&self) -> &ast::operation::SelectionSet {
        match self {
            OpDef::SelectionSet(set) => set,
            OpDef::Query(q) => &q.selection_set,
            OpDef::Mutation(m) => &m.selection_set,
            OpDef::Subscription(s) => &s.selection_set,
        }
    }

    fn selection_set_mut(&mut self) -> &mut ast::operation::SelectionSet {
        match self {
            OpDef::SelectionSet(set) => set,
            OpDef::Query(q) => &mut q.selection_set,
            OpDef::Mutation(m) => &mut m.selection_set,
            OpDef::Subscription(s) => &mut s.selection_set,
        }
    }

    fn variable_definitions(&self) -> &[ast::operation::VariableDefinition] {
        match self {
            OpDef::SelectionSet(_) => &[],
            OpDef::Query(q) => &q.variable_definitions,
            OpDef::Mutation(m) => &m.variable_definitions,
            OpDef::Subscription(s) => &s.variable_definitions,
        }
    }

    fn variable_definitions_mut(&mut self) -> &mut Vec<ast::operation::VariableDefinition> {
        if let OpDef::SelectionSet(set) = self {
            let selection_set = std::mem::replace(set, ast::empty_selection_set());
            *self = OpDef::Query(ast::operation::Query {
                position: selection_set.span.0,
                name: None,
                variable_definitions: vec![],
                directives: vec![],
                selection_set,
            });
        }

        match self {
            OpDef::Query(q) => &mut q.variable_definitions,
            OpDef::Mutation(m) => &mut m.variable_definitions,
            OpDef::Subscription(s) => &mut s.variable_definitions,
            OpDef::SelectionSet(_) => unreachable!("shorthand promoted to a query above"),
        }
    }

    fn clear_header(&mut self) {
        match self {
            OpDef::SelectionSet(_) => (),
            OpDef::Query(q) => {
                q.variable_definitions.clear();
                q.directives.clear();
            },
            OpDef::Mutation(m) => {
                m.variable_definitions.clear();
                m.directives.clear();
            },
            OpDef::Subscription(s) => {
                s.variable_definitions.clear();
                s.directives.clear();
            },
        }
    }
}

/// Builds an empty named operation of the given kind.
pub(crate) fn new_operation(kind: OperationKind, name: &str) -> ast::operation::OperationDefinition {
    let position = ast::synthetic_pos();
    let name = Some(name.to_string());
    match kind {
        OperationKind::Query => OpDef::Query(ast::operation::Query {
            position,
            name,
            variable_definitions: vec![],
            directives: vec![],
            selection_set: ast::empty_selection_set(),
        }),
        OperationKind::Mutation => OpDef::Mutation(ast::operation::Mutation {
            position,
            name,
            variable_definitions: vec![],
            directives: vec![],
            selection_set: ast::empty_selection_set(),
        }),
        OperationKind::Subscription => OpDef::Subscription(ast::operation::Subscription {
            position,
            name,
            variable_definitions: vec![],
            directives: vec![],
            selection_set: ast::empty_selection_set(),
        }),
    }
}
