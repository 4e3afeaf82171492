mod add_arg;
mod add_path;
mod input;
mod introspect;
mod paths;
mod remove_arg;
mod remove_path;
mod run;
mod share;

use crate::Cli;
use crate::CommandResult;
use add_arg::AddArgCmd;
use add_path::AddPathCmd;
use introspect::IntrospectCmd;
use paths::PathsCmd;
use remove_arg::RemoveArgCmd;
use remove_path::RemovePathCmd;
use run::RunCmd;
use share::ShareCmd;

#[derive(Debug, clap::Parser)]
#[command(name = "graphql-lab")]
pub(crate) enum CommandEnum {
    /// Add the field addressed by a path, creating missing parents.
    AddPath(Box<AddPathCmd>),
    /// Remove the field addressed by a path.
    RemovePath(Box<RemovePathCmd>),
    /// Add an argument to a field, backed by a new operation variable.
    AddArg(Box<AddArgCmd>),
    /// Remove an argument from a field.
    RemoveArg(Box<RemoveArgCmd>),
    /// List every field path of a document.
    Paths(Box<PathsCmd>),
    /// Run an operation against an endpoint.
    Run(Box<RunCmd>),
    /// Fetch an endpoint's schema through introspection.
    Introspect(Box<IntrospectCmd>),
    /// Encode or decode share tokens.
    Share(Box<ShareCmd>),
}
impl CommandEnum {
    pub(crate) async fn run(self, cli: Cli) -> CommandResult {
        match self {
            Self::AddPath(cmd) => cmd.run(cli).await,
            Self::RemovePath(cmd) => cmd.run(cli).await,
            Self::AddArg(cmd) => cmd.run(cli).await,
            Self::RemoveArg(cmd) => cmd.run(cli).await,
            Self::Paths(cmd) => cmd.run(cli).await,
            Self::Run(cmd) => cmd.run(cli).await,
            Self::Introspect(cmd) => cmd.run(cli).await,
            Self::Share(cmd) => cmd.run(cli).await,
        }
    }
}
