use crate::env::Environment;
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Log,
    Warn,
}

/// One log call made by a script. `message` holds the logged values.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreflightLog {
    pub level: LogLevel,
    pub message: Vec<serde_json::Value>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PreflightStatus {
    Error,
    Success,
}

/// What a preflight run hands back. On error `env` is the environment the
/// run started from, untouched.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct PreflightResult {
    pub status: PreflightStatus,
    pub env: Environment,
    pub logs: Vec<PreflightLog>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
impl PreflightResult {
    pub fn is_success(&self) -> bool {
        self.status == PreflightStatus::Success
    }
}

/// Sent by the interpreter thread. Any number of `log` and `prompt` messages
/// are followed by exactly one `result`.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkerMessage {
    Log {
        level: LogLevel,
        message: Vec<serde_json::Value>,
    },

    /// The interpreter is blocked until the host answers with
    /// [`HostMessage::PromptResult`].
    Prompt {
        placeholder: String,
        #[serde(rename = "defaultValue")]
        default_value: Option<String>,
    },

    Result {
        status: PreflightStatus,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        env: Option<Environment>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

/// Sent by the host to the interpreter thread.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "type")]
pub enum HostMessage {
    /// `None` when the user dismissed the prompt.
    #[serde(rename = "prompt:result")]
    PromptResult {
        value: Option<String>,
    },
}
