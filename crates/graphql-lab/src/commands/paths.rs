use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use crate::commands::input;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub(crate) struct PathsCmd {
    #[arg(
        help="File holding the operation text. Read from stdin when omitted.",
        long,
        short='f',
    )]
    file: Option<PathBuf>,
}

#[inherent::inherent]
impl RunnableCommand for PathsCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let query = match input::read_source(self.file.as_deref()) {
            Ok(query) => query,
            Err(e) => return CommandResult::from_error(e),
        };

        let paths = libgraphql_lab::open_paths(&query);
        if paths.is_empty() && !query.trim().is_empty() {
            return CommandResult::stderr(format_args!(
                "{} The document does not parse.",
                crate::output_utils::RED_X,
            ));
        }
        CommandResult::stdout(format_args!("{}", paths.join("\n")))
    }
}
