use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use crate::commands::input;
use crate::commands::input::OperationFiles;
use crate::output_utils;
use anyhow::Context;
use libgraphql_lab::Environment;
use libgraphql_lab::HistoryStore;
use libgraphql_lab::OperationRunner;
use libgraphql_lab::RunOutcome;
use libgraphql_lab::execution::RunnerConfig;
use libgraphql_lab::history::HistoryRequest;
use libgraphql_lab::preflight::NonInteractive;
use libgraphql_lab::preflight::PreflightRunner;
use libgraphql_lab::preflight::PromptHandler;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, clap::Args)]
pub(crate) struct RunCmd {
    #[arg(help="HTTP(S) URL of the GraphQL endpoint.", long, short='e')]
    endpoint: String,

    #[command(flatten)]
    operation: OperationFiles,

    #[arg(
        help="JSON environment file interpolated into `{{key}}` placeholders. \
             Updated in place when a preflight script changes it.",
        long,
    )]
    env: Option<PathBuf>,

    #[arg(help="Rhai script to run before the operation.", long)]
    preflight: Option<PathBuf>,

    #[arg(
        help="Answer preflight prompts with their default values instead of \
             asking on the terminal.",
        long,
    )]
    non_interactive: bool,

    #[arg(
        default_value_t=5,
        help="Seconds a subscription server gets to acknowledge the \
             connection.",
        long,
    )]
    ack_timeout_secs: u64,
}

#[inherent::inherent]
impl RunnableCommand for RunCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        match self.execute().await {
            Ok(result) => result,
            Err(e) => CommandResult::from_error(e),
        }
    }
}

impl RunCmd {
    async fn execute(&self) -> anyhow::Result<CommandResult> {
        let operation = self.operation.load()?;
        let mut env = match &self.env {
            Some(path) => load_env(path)?,
            None => Environment::new(),
        };
        let script = self.preflight
            .as_deref()
            .map(|path| input::read_source(Some(path)))
            .transpose()?;

        let config = RunnerConfig {
            connection_ack_timeout: Duration::from_secs(self.ack_timeout_secs),
            ..RunnerConfig::default()
        };
        let runner = OperationRunner::new(config, HistoryStore::new())?;
        let preflight_runner = PreflightRunner::default();
        let preflight = script
            .as_deref()
            .map(|script| (&preflight_runner, script));

        log::debug!("Running `{}` against {}.", operation.name, self.endpoint);
        let env_before = env.clone();
        let outcome = if self.non_interactive {
            runner
                .run_with_preflight(&operation, &self.endpoint, &mut env, preflight, &NonInteractive)
                .await?
        } else {
            runner
                .run_with_preflight(&operation, &self.endpoint, &mut env, preflight, &TerminalPrompt)
                .await?
        };

        if let Some(path) = &self.env
            && env != env_before {
            std::fs::write(path, serde_json::to_string_pretty(&env)?)
                .with_context(|| format!("Failed to save the environment to {}", path.display()))?;
            log::info!("Saved the updated environment to {path:#?}.");
        }

        Ok(match outcome {
            RunOutcome::Completed(record) => request_report(&record),

            RunOutcome::Subscribed { history_id } => {
                let received = stream_subscription(&runner, operation.id, history_id).await;
                if runner.history().get(history_id).is_none() {
                    CommandResult::stderr(format_args!(
                        "{} Subscription closed before its first message.",
                        output_utils::RED_X,
                    ))
                } else {
                    log::info!("Subscription ended after {received} messages.");
                    CommandResult::done()
                }
            },

            RunOutcome::Aborted => CommandResult::stderr(format_args!(
                "{} Request aborted.",
                output_utils::RED_X,
            )),

            RunOutcome::AlreadyRunning => CommandResult::stderr(format_args!(
                "{} `{}` is already running.",
                output_utils::RED_X,
                operation.name,
            )),

            RunOutcome::Failed { reason } => CommandResult::stderr(format_args!(
                "{} {reason}",
                output_utils::RED_X,
            )),

            RunOutcome::PreflightFailed(result) => CommandResult::stderr(format_args!(
                "{} Preflight script failed: {}",
                output_utils::RED_X,
                result.error.as_deref().unwrap_or("unknown error"),
            )),
        })
    }
}

fn load_env(path: &Path) -> anyhow::Result<Environment> {
    if !path.exists() {
        log::debug!("No environment at {path:#?} yet; starting empty.");
        return Ok(Environment::new());
    }
    let text = input::read_source(Some(path))?;
    serde_json::from_str(&text)
        .with_context(|| format!("{} is not an environment file", path.display()))
}

fn request_report(record: &HistoryRequest) -> CommandResult {
    let body = serde_json::from_str::<serde_json::Value>(&record.response)
        .ok()
        .and_then(|json| serde_json::to_string_pretty(&json).ok())
        .unwrap_or_else(|| record.response.clone());
    let (mark, exit_code) =
        if record.is_error() {
            (output_utils::RED_X, ExitCode::FAILURE)
        } else {
            (output_utils::GREEN_CHECK, ExitCode::SUCCESS)
        };

    CommandResult {
        exit_code,
        stderr: None,
        stdout: Some(format!(
            "{mark} {} in {} ms, {} bytes\n{body}",
            record.status,
            record.duration.as_millis(),
            record.size,
        )),
    }
}

/// Prints subscription messages as they are recorded until the
/// subscription ends or Ctrl-C stops it. Returns how many were printed.
async fn stream_subscription(runner: &OperationRunner, operation_id: Uuid, history_id: Uuid) -> usize {
    let mut printed = 0;
    let mut poll = tokio::time::interval(Duration::from_millis(100));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                log::info!("Stopping subscription.");
                runner.stop(operation_id);
            },
            _ = poll.tick() => {},
        }

        let responses = runner.history()
            .get(history_id)
            .and_then(|record| record.as_subscription().map(|sub| sub.responses.clone()))
            .unwrap_or_default();
        for response in responses.iter().skip(printed) {
            println!("{}", response.data);
        }
        printed = printed.max(responses.len());

        if !runner.is_running(operation_id) {
            return printed;
        }
    }
}

/// Asks preflight prompts on the terminal. An empty answer takes the
/// default.
#[derive(Debug)]
struct TerminalPrompt;
impl PromptHandler for TerminalPrompt {
    async fn prompt(&self, placeholder: &str, default_value: Option<&str>) -> Option<String> {
        let question = match default_value {
            Some(default_value) => format!("{placeholder} [{default_value}]: "),
            None => format!("{placeholder}: "),
        };
        let answer = tokio::task::spawn_blocking(move || {
            eprint!("{question}");
            let _ = std::io::stderr().flush();
            let mut line = String::new();
            match std::io::stdin().read_line(&mut line) {
                Ok(0) | Err(_) => None,
                Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            }
        })
        .await
        .ok()
        .flatten();

        answer
            .filter(|answer| !answer.is_empty())
            .or_else(|| default_value.map(str::to_string))
    }
}
