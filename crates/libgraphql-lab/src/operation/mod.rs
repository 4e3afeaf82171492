#[allow(clippy::module_inception)]
mod operation;
mod operation_kind;
mod operation_store;

pub use operation::Operation;
pub use operation_kind::OperationKind;
pub use operation_kind::UnknownOperationKind;
pub use operation_store::OperationStore;

#[cfg(test)]
mod tests;
