use crate::history::HistoryRequest;
use crate::preflight::PreflightResult;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq)]
pub enum RunOutcome {
    /// The request finished (or failed on the wire) and was recorded.
    Completed(HistoryRequest),

    /// A subscription is live. Messages are appended to the history record
    /// `history_id` until the subscription ends or is stopped. Should the
    /// transport fail before any message arrives, the record is removed
    /// again.
    Subscribed {
        history_id: Uuid,
    },

    /// Stopped before a response arrived. Nothing was recorded.
    Aborted,

    /// The operation was already running; this run did not start.
    AlreadyRunning,

    /// The run could not start (no query text, or the subscription
    /// transport never came up). Nothing was recorded.
    Failed {
        reason: String,
    },

    /// The preflight script failed, so the operation was not sent.
    PreflightFailed(PreflightResult),
}
