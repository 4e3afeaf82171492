use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use crate::commands::input::OperationFiles;
use libgraphql_lab::share;

#[derive(Debug, clap::Args)]
pub(crate) struct ShareCmd {
    #[command(subcommand)]
    action: ShareAction,
}

#[derive(Debug, clap::Subcommand)]
enum ShareAction {
    /// Print the share token (or URL) of an operation.
    Encode {
        #[command(flatten)]
        operation: OperationFiles,

        #[arg(
            help="Render a full URL carrying the token in its `share` query \
                 parameter.",
            long,
        )]
        base_url: Option<String>,
    },

    /// Print the operation held by a share token or share URL as JSON.
    Decode {
        #[arg(name="TOKEN_OR_URL")]
        token: String,
    },
}

#[inherent::inherent]
impl RunnableCommand for ShareCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        match self.action.execute() {
            Ok(output) => CommandResult::stdout(format_args!("{output}")),
            Err(e) => CommandResult::from_error(e),
        }
    }
}

impl ShareAction {
    fn execute(self) -> anyhow::Result<String> {
        match self {
            Self::Encode { operation, base_url } => {
                let operation = operation.load()?;
                Ok(match base_url {
                    Some(base_url) => share::share_url(&base_url, &operation)?.to_string(),
                    None => share::encode_share(&operation)?,
                })
            },

            Self::Decode { token } => {
                let shared =
                    if token.starts_with("http://") || token.starts_with("https://") {
                        share::shared_operation_from_url(&token)?
                    } else {
                        share::decode_share(&token)?
                    };
                Ok(serde_json::to_string_pretty(&shared.into_operation())?)
            },
        }
    }
}
