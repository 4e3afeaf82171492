use clap::CommandFactory;
use crate::commands;

/// Builds GraphQL operations by field path, runs them against an endpoint,
/// and shares them as URL-safe tokens.
#[derive(clap::Parser, Debug)]
#[command(name = "graphql-lab", version, about)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) cmd: Option<commands::CommandEnum>,

    #[arg(
        help="Log at debug level (overrides LOG_LEVEL).",
        long,
        short='v',
    )]
    pub verbose: bool,
}
impl Cli {
    /// Without a subcommand there is nothing to do but explain the tool.
    pub(crate) async fn run_default(self) -> anyhow::Result<()> {
        Self::command().print_long_help()?;
        Ok(())
    }
}
