//! Running operations: one HTTP request/response cycle for queries and
//! mutations, a graphql-ws subscription for subscriptions. Results are
//! recorded into the [`HistoryStore`](crate::history::HistoryStore).

mod execution_error;
mod graphql_ws;
mod operation_runner;
mod request_parts;
mod run_outcome;
mod run_registry;

pub use execution_error::ExecutionError;
pub use graphql_ws::GRAPHQL_WS_PROTOCOL;
pub use graphql_ws::SubscriptionEvent;
pub use graphql_ws::TransportError;
pub use operation_runner::OperationRunner;
pub use operation_runner::RunnerConfig;
pub use operation_runner::websocket_url;
pub use request_parts::RequestParts;
pub use run_outcome::RunOutcome;
pub use run_registry::RunRegistry;
pub use run_registry::RunTicket;

#[cfg(test)]
mod tests;
