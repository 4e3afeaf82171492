use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use crate::commands::input;
use crate::commands::input::DocumentArgs;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub(crate) struct AddArgCmd {
    #[arg(help="Dot-joined path of the field.", name="PATH")]
    path: String,

    #[arg(help="Name of the argument as the schema declares it.", name="ARG")]
    arg_name: String,

    #[arg(
        help="Schema to read the argument's type from: an introspection \
             result (`.json`) or SDL.",
        long,
        short='s',
    )]
    schema: PathBuf,

    #[command(flatten)]
    document: DocumentArgs,
}

#[inherent::inherent]
impl RunnableCommand for AddArgCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let schema = match input::load_schema(&self.schema) {
            Ok(schema) => schema,
            Err(e) => return CommandResult::from_error(e),
        };

        self.document.apply(|query| {
            libgraphql_lab::add_argument(
                query,
                &self.path,
                &self.arg_name,
                &schema,
                self.document.operation_name(),
            )
        })
    }
}
