use crate::preflight::PreflightError;

/// Problems with the inputs of a run, reported before anything is sent.
/// Failures on the wire are not errors; they end up in history or in a
/// [`RunOutcome`](crate::execution::RunOutcome).
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("failed to build the HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("operation {field} must be a JSON object")]
    NotAnObject {
        field: &'static str,
    },

    #[error("operation {field} are not valid JSON: {source}")]
    InvalidJson {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Preflight(#[from] PreflightError),
}
