use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use crate::output_utils;
use indexmap::IndexMap;
use libgraphql_lab::HistoryStore;
use libgraphql_lab::OperationRunner;
use libgraphql_lab::Schema;
use libgraphql_lab::execution::RunnerConfig;
use libgraphql_lab::schema::NamedType;
use serde_json::json;

#[derive(Debug, clap::Args)]
pub(crate) struct IntrospectCmd {
    #[arg(help="HTTP(S) URL of the GraphQL endpoint.", long, short='e')]
    endpoint: String,

    #[arg(
        help="Request header as `Name: value`. May be repeated.",
        long="header",
        short='H',
        value_parser=parse_header,
    )]
    headers: Vec<(String, String)>,

    #[arg(help="Print the schema's types as JSON.", long)]
    json: bool,
}

#[inherent::inherent]
impl RunnableCommand for IntrospectCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let runner = match OperationRunner::new(RunnerConfig::default(), HistoryStore::new()) {
            Ok(runner) => runner,
            Err(e) => return CommandResult::from_error(e.into()),
        };
        let headers = self.headers.into_iter().collect::<IndexMap<_, _>>();
        let schema = match runner.fetch_schema(&self.endpoint, &headers).await {
            Ok(schema) => schema,
            Err(e) => return CommandResult::from_error(e.into()),
        };

        if self.json {
            return match serde_json::to_string_pretty(&schema_json(&schema)) {
                Ok(json) => CommandResult::stdout(format_args!("{json}")),
                Err(e) => CommandResult::from_error(e.into()),
            };
        }

        let root = |named: Option<&NamedType>| match named {
            Some(named) => format!("{} ({} fields)", named.name, named.fields.len()),
            None => "none".to_string(),
        };
        CommandResult::stdout(format_args!(
            concat!(
                "{} Introspected {}:\n",
                "  * Query root: {}\n",
                "  * Mutation root: {}\n",
                "  * Subscription root: {}\n",
                "  * {} named types.",
            ),
            output_utils::GREEN_CHECK,
            self.endpoint,
            root(Some(schema.query_type())),
            root(schema.mutation_type()),
            root(schema.subscription_type()),
            schema.types().count(),
        ))
    }
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    match raw.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        },
        _ => Err(format!("expected `Name: value`, got `{raw}`")),
    }
}

fn schema_json(schema: &Schema) -> serde_json::Value {
    let types = schema.types()
        .map(|named| {
            let fields = named.fields
                .iter()
                .map(|field| json!({
                    "name": field.name,
                    "type": field.field_type.to_string(),
                    "args": field.args
                        .iter()
                        .map(|arg| json!({
                            "name": arg.name,
                            "type": arg.value_type.to_string(),
                        }))
                        .collect::<Vec<_>>(),
                }))
                .collect::<Vec<_>>();
            json!({
                "name": named.name,
                "kind": named.kind,
                "fields": fields,
            })
        })
        .collect::<Vec<_>>();

    json!({
        "queryType": schema.query_type().name,
        "mutationType": schema.mutation_type().map(|named| &named.name),
        "subscriptionType": schema.subscription_type().map(|named| &named.name),
        "types": types,
    })
}
