use crate::env::Environment;
use crate::preflight::HostMessage;
use crate::preflight::LogLevel;
use crate::preflight::PreflightLog;
use crate::preflight::PreflightResult;
use crate::preflight::WorkerMessage;
use crate::preflight::sandbox::Worker;
use std::future::Future;
use time::OffsetDateTime;

type Result<T> = std::result::Result<T, PreflightError>;

/// Limits placed on every script.
#[derive(Clone, Debug, PartialEq)]
pub struct PreflightConfig {
    /// Interpreter operations a script may perform before it is stopped.
    pub max_operations: u64,
    pub max_call_levels: usize,
}
impl Default for PreflightConfig {
    fn default() -> Self {
        Self {
            max_operations: 1_000_000,
            max_call_levels: 64,
        }
    }
}

/// Answers the `prompt(..)` calls a script makes. `None` means the user
/// dismissed the prompt.
pub trait PromptHandler {
    fn prompt(
        &self,
        placeholder: &str,
        default_value: Option<&str>,
    ) -> impl Future<Output = Option<String>> + Send;
}

/// Accepts every prompt's default without asking anyone.
#[derive(Clone, Copy, Debug, Default)]
pub struct NonInteractive;
impl PromptHandler for NonInteractive {
    async fn prompt(&self, _placeholder: &str, default_value: Option<&str>) -> Option<String> {
        default_value.map(str::to_string)
    }
}

/// Failures of the sandbox itself. A script that throws is not one of
/// these; it yields a [`PreflightResult`] with an error status.
#[derive(Debug, thiserror::Error)]
pub enum PreflightError {
    #[error("failed to start the preflight interpreter thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("preflight interpreter exited without reporting a result")]
    WorkerExited,
}

#[derive(Clone, Debug, Default)]
pub struct PreflightRunner {
    config: PreflightConfig,
}
impl PreflightRunner {
    pub fn new(config: PreflightConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PreflightConfig {
        &self.config
    }

    /// Runs `script` against a copy of `env` and waits for its result. Log
    /// messages are collected in arrival order and mirrored to `tracing`.
    /// Dropping the returned future stops the script.
    pub async fn run<P: PromptHandler>(
        &self,
        script: &str,
        env: &Environment,
        prompts: &P,
    ) -> Result<PreflightResult> {
        let mut worker = Worker::spawn(script.to_string(), env.clone(), self.config.clone())?;
        let mut logs = vec![];

        while let Some(message) = worker.recv().await {
            match message {
                WorkerMessage::Log { level, message } => {
                    let log = PreflightLog {
                        level,
                        message,
                        created_at: OffsetDateTime::now_utc(),
                    };
                    mirror_to_tracing(&log);
                    logs.push(log);
                },

                WorkerMessage::Prompt { placeholder, default_value } => {
                    let value = prompts.prompt(&placeholder, default_value.as_deref()).await;
                    if !worker.reply(HostMessage::PromptResult { value }) {
                        return Err(PreflightError::WorkerExited);
                    }
                },

                WorkerMessage::Result { status, env: script_env, error } => {
                    if let Some(error) = &error {
                        tracing::warn!(%error, "Preflight script failed.");
                    }
                    return Ok(PreflightResult {
                        status,
                        env: script_env.unwrap_or_else(|| env.clone()),
                        logs,
                        error,
                    });
                },
            }
        }

        Err(PreflightError::WorkerExited)
    }
}

fn mirror_to_tracing(log: &PreflightLog) {
    let message = log.message
        .iter()
        .map(|value| match value {
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ");
    match log.level {
        LogLevel::Error => tracing::error!(target: "preflight", "{message}"),
        LogLevel::Log => tracing::info!(target: "preflight", "{message}"),
        LogLevel::Warn => tracing::warn!(target: "preflight", "{message}"),
    }
}
