use crate::operation::Operation;
use crate::preflight::PreflightLog;
use std::time::Duration;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum HistoryRecord {
    Request(HistoryRequest),
    Subscription(HistorySubscription),
}
impl HistoryRecord {
    pub fn id(&self) -> Uuid {
        match self {
            Self::Request(req) => req.id,
            Self::Subscription(sub) => sub.id,
        }
    }

    pub fn operation(&self) -> &Operation {
        match self {
            Self::Request(req) => &req.operation,
            Self::Subscription(sub) => &sub.operation,
        }
    }

    pub fn created_at(&self) -> OffsetDateTime {
        match self {
            Self::Request(req) => req.created_at,
            Self::Subscription(sub) => sub.created_at,
        }
    }

    pub fn preflight_logs(&self) -> &[PreflightLog] {
        match self {
            Self::Request(req) => &req.preflight_logs,
            Self::Subscription(sub) => &sub.preflight_logs,
        }
    }

    pub fn as_request(&self) -> Option<&HistoryRequest> {
        match self {
            Self::Request(req) => Some(req),
            Self::Subscription(_) => None,
        }
    }

    pub fn as_subscription(&self) -> Option<&HistorySubscription> {
        match self {
            Self::Request(_) => None,
            Self::Subscription(sub) => Some(sub),
        }
    }
}

/// The outcome of one HTTP request/response cycle.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRequest {
    pub id: Uuid,
    /// Raw HTTP status. `0` when no response arrived at all.
    pub status: u16,
    /// From sending the request until the body was fully read.
    pub duration: Duration,
    /// Byte length of the response body.
    pub size: usize,
    pub response: String,
    /// Response headers as pretty-printed JSON object text.
    pub headers: String,
    pub operation: Operation,
    #[serde(default)]
    pub preflight_logs: Vec<PreflightLog>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
impl HistoryRequest {
    /// Non-2xx statuses and bodies with a top-level `errors` member both
    /// count as errors.
    pub fn is_error(&self) -> bool {
        if !(200..300).contains(&self.status) {
            return true;
        }
        serde_json::from_str::<serde_json::Value>(&self.response)
            .is_ok_and(|body| body.get("errors").is_some())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySubscription {
    pub id: Uuid,
    /// In arrival order, with strictly increasing `created_at`.
    pub responses: Vec<SubscriptionResponse>,
    pub operation: Operation,
    #[serde(default)]
    pub preflight_logs: Vec<PreflightLog>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResponse {
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// The message payload as JSON text.
    pub data: String,
}
