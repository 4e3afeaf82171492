use crate::Cli;
use crate::CommandResult;

/// One `graphql-lab` subcommand. Failures are reported through the
/// returned [`CommandResult`], never by panicking.
pub(crate) trait RunnableCommand: std::fmt::Debug {
    async fn run(self, cli: Cli) -> CommandResult;
}
