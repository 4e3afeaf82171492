//! The engine behind the `graphql-lab` playground.
//!
//! Operation text is the single source of truth: every builder toggle parses
//! the text, edits an ephemeral AST and prints it back (see [`document`],
//! [`path`] and [`arguments`]). Running an operation goes through
//! [`env`] templating, an optional [`preflight`] script and the
//! [`execution`] protocol, which records results into [`history`].

pub mod arguments;
pub mod ast;
pub mod document;
pub mod env;
pub mod execution;
pub mod history;
pub mod operation;
pub mod path;
pub mod preflight;
pub mod schema;
pub mod share;

pub use arguments::add_argument;
pub use arguments::is_argument_present;
pub use arguments::remove_argument;
pub use document::QueryDocument;
pub use env::Environment;
pub use env::interpolate;
pub use execution::OperationRunner;
pub use execution::RunOutcome;
pub use history::HistoryStore;
pub use operation::Operation;
pub use operation::OperationKind;
pub use path::FieldPath;
pub use path::add_path;
pub use path::is_path_present;
pub use path::open_paths;
pub use path::remove_path;
pub use schema::Schema;
