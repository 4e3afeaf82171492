use crate::arguments;
use crate::document;
use crate::operation::Operation;
use crate::path;
use crate::schema::Schema;
use uuid::Uuid;

/// The session's list of open operations.
///
/// Builder toggles are applied as a transform-and-replace on one operation's
/// text: the whole text is read, the new text is computed, and it replaces
/// the old one in a single step. Two toggles on the same operation therefore
/// always see each other's output.
#[derive(Clone, Debug, Default)]
pub struct OperationStore {
    operations: Vec<Operation>,
}
impl OperationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_operations(operations: Vec<Operation>) -> Self {
        Self { operations }
    }

    pub fn add(&mut self, operation: Operation) -> &Operation {
        self.operations.push(operation);
        let last = self.operations.len() - 1;
        &self.operations[last]
    }

    pub fn get(&self, id: Uuid) -> Option<&Operation> {
        self.operations.iter().find(|op| op.id == id)
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn remove(&mut self, id: Uuid) -> Option<Operation> {
        let index = self.operations.iter().position(|op| op.id == id)?;
        Some(self.operations.remove(index))
    }

    /// Replaces the operation's text. When a name can be read out of the new
    /// text it becomes the operation's name.
    pub fn update_query(&mut self, id: Uuid, query: String) -> Option<&Operation> {
        let operation = self.operations.iter_mut().find(|op| op.id == id)?;
        if let Some(name) = document::operation_name(&query) {
            operation.name = name;
        }
        operation.query = query;
        Some(operation)
    }

    pub fn add_path(&mut self, id: Uuid, field_path: &str) -> Option<&Operation> {
        self.transform(id, |query| Some(path::add_path(query, field_path, None)))
    }

    pub fn remove_path(&mut self, id: Uuid, field_path: &str) -> Option<&Operation> {
        self.transform(id, |query| {
            non_empty(query).map(|query| path::remove_path(query, field_path, None))
        })
    }

    pub fn add_argument(
        &mut self,
        id: Uuid,
        field_path: &str,
        arg_name: &str,
        schema: &Schema,
    ) -> Option<&Operation> {
        self.transform(id, |query| {
            non_empty(query).map(|query| {
                arguments::add_argument(query, field_path, arg_name, schema, None)
            })
        })
    }

    pub fn remove_argument(
        &mut self,
        id: Uuid,
        field_path: &str,
        arg_name: &str,
    ) -> Option<&Operation> {
        self.transform(id, |query| {
            non_empty(query).map(|query| {
                arguments::remove_argument(query, field_path, arg_name, None)
            })
        })
    }

    fn transform(
        &mut self,
        id: Uuid,
        edit: impl FnOnce(&str) -> Option<String>,
    ) -> Option<&Operation> {
        let current = self.get(id)?.query.clone();
        match edit(&current) {
            Some(next) if next != current => self.update_query(id, next),
            _ => self.get(id),
        }
    }
}

fn non_empty(query: &str) -> Option<&str> {
    if query.is_empty() {
        None
    } else {
        Some(query)
    }
}
