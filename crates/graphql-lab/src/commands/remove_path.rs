use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use crate::commands::input::DocumentArgs;

#[derive(Debug, clap::Args)]
pub(crate) struct RemovePathCmd {
    #[arg(
        help="Dot-joined path of the field to remove. An operation left \
             without fields keeps an empty body.",
        name="PATH",
    )]
    path: String,

    #[command(flatten)]
    document: DocumentArgs,
}

#[inherent::inherent]
impl RunnableCommand for RemovePathCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        self.document.apply(|query| {
            libgraphql_lab::remove_path(query, &self.path, self.document.operation_name())
        })
    }
}
