//! Argument toggles for the field-tree builder. Every argument added here is
//! backed by a freshly synthesized operation variable.

mod argument_ops;

pub use argument_ops::add_argument;
pub use argument_ops::is_argument_present;
pub use argument_ops::remove_argument;

#[cfg(test)]
mod tests;
