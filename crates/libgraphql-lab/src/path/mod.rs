//! Dot-delimited field paths (`query.user.posts`) and the field mutators
//! that the field-tree builder drives with them.
//!
//! Paths address fields by name only. Aliased copies of one field share a
//! path, and selections inside fragments are not addressed.

mod field_path;
mod path_ops;

pub use field_path::FieldPath;
pub use field_path::FieldPathParseError;
pub use path_ops::add_path;
pub use path_ops::is_path_present;
pub use path_ops::open_paths;
pub use path_ops::remove_path;
pub(crate) use path_ops::find_field;
pub(crate) use path_ops::find_field_mut;

#[cfg(test)]
mod tests;
