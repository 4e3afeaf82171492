mod cli;
mod command;
mod command_result;
mod commands;
mod output_utils;

use clap::Parser;
pub(crate) use cli::Cli;
pub(crate) use command::RunnableCommand;
pub(crate) use command_result::CommandResult;

/// Target of the binary's own log lines, next to the library's
/// `libgraphql_lab::*` and `preflight` targets.
const LOG_TARGET: &str = "graphql_lab";
const DEFAULT_LOG_LEVEL: tracing::Level = tracing::Level::INFO;

#[tokio::main(flavor = "multi_thread", worker_threads = 10)]
async fn main() -> std::process::ExitCode {
    let mut cli = Cli::parse();
    setup_logger(&cli);

    let Some(command) = cli.cmd.take() else {
        return match cli.run_default().await {
            Ok(()) => std::process::ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{e:#}");
                std::process::ExitCode::FAILURE
            },
        };
    };

    let result = command.run(cli).await;
    if let Some(stdout) = result.stdout {
        println!("{stdout}");
    }
    if let Some(stderr) = result.stderr {
        eprintln!("{stderr}")
    }
    result.exit_code
}

/// Maps a `LOG_LEVEL` value to a level. `verbose` is an alias of `debug`.
fn parse_log_level(value: &str) -> Option<tracing::Level> {
    match value.trim().to_ascii_lowercase().as_str() {
        "trace" => Some(tracing::Level::TRACE),
        "debug" | "verbose" => Some(tracing::Level::DEBUG),
        "info" => Some(tracing::Level::INFO),
        "warn" => Some(tracing::Level::WARN),
        "error" => Some(tracing::Level::ERROR),
        _ => None,
    }
}

/// Installs the stderr subscriber. `--verbose` wins over `LOG_LEVEL`; an
/// unreadable `LOG_LEVEL` is reported once the subscriber is up.
fn setup_logger(cli: &Cli) {
    let env_level = std::env::var("LOG_LEVEL").ok();
    let (log_level, rejected) = match (cli.verbose, env_level.as_deref()) {
        (true, _) => (tracing::Level::DEBUG, None),
        (false, None) => (DEFAULT_LOG_LEVEL, None),
        (false, Some(value)) => match parse_log_level(value) {
            Some(level) => (level, None),
            None => (DEFAULT_LOG_LEVEL, Some(value)),
        },
    };

    // Stdout stays reserved for documents and responses.
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();
    log::trace!(target: LOG_TARGET, "Logging at `{log_level}`.");

    if let Some(value) = rejected {
        log::warn!(
            target: LOG_TARGET,
            "Ignoring `LOG_LEVEL={value}`; expected trace, debug, verbose, \
            info, warn or error.",
        );
    }
}

#[cfg(test)]
mod tests;
