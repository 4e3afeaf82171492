use crate::path::FieldPath;
use crate::schema::Schema;
use crate::schema::SchemaField;

impl Schema {
    /// Walks the object types along `path`, starting at the root type for
    /// the path's operation kind, and returns the definition of the last
    /// field. List and non-null wrappers are looked through at every hop.
    ///
    /// Returns `None` for a bare operation-kind path, for a missing field,
    /// or as soon as a hop lands on a type that is not an object type.
    pub fn resolve_field(&self, path: &FieldPath) -> Option<&SchemaField> {
        let (leaf, parents) = path.segments().split_last()?;
        let mut current = self.root_type(path.kind())?;
        for segment in parents {
            let field = current.object_field(segment)?;
            current = self.named_type(field.field_type.named_type())?;
        }
        current.object_field(leaf)
    }

    /// [`resolve_field`](Self::resolve_field) for a dotted path string.
    pub fn find_field(&self, path: &str) -> Option<&SchemaField> {
        self.resolve_field(&path.parse::<FieldPath>().ok()?)
    }
}
