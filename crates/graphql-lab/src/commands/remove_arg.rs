use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use crate::commands::input::DocumentArgs;

#[derive(Debug, clap::Args)]
pub(crate) struct RemoveArgCmd {
    #[arg(help="Dot-joined path of the field.", name="PATH")]
    path: String,

    #[arg(
        help="Argument to remove. The variable backing it is kept.",
        name="ARG",
    )]
    arg_name: String,

    #[command(flatten)]
    document: DocumentArgs,
}

#[inherent::inherent]
impl RunnableCommand for RemoveArgCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        self.document.apply(|query| {
            libgraphql_lab::remove_argument(
                query,
                &self.path,
                &self.arg_name,
                self.document.operation_name(),
            )
        })
    }
}
