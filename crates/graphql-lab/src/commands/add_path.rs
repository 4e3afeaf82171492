use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use crate::commands::input::DocumentArgs;

#[derive(Debug, clap::Args)]
pub(crate) struct AddPathCmd {
    #[arg(
        help="Dot-joined field path rooted at the operation kind, e.g. \
             `query.user.id`.",
        name="PATH",
    )]
    path: String,

    #[command(flatten)]
    document: DocumentArgs,
}

#[inherent::inherent]
impl RunnableCommand for AddPathCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        self.document.apply(|query| {
            libgraphql_lab::add_path(query, &self.path, self.document.operation_name())
        })
    }
}
