use crate::CommandResult;
use anyhow::Context;
use libgraphql_lab::Operation;
use libgraphql_lab::Schema;
use libgraphql_lab::document;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

/// Reads `path`, or all of stdin when there is none.
pub(super) fn read_source(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),

        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read the operation from stdin")?;
            Ok(text)
        },
    }
}

fn read_optional(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => read_source(Some(path)),
        None => Ok(String::new()),
    }
}

/// Loads a schema from an introspection result (`.json`) or SDL (anything
/// else).
pub(super) fn load_schema(path: &Path) -> anyhow::Result<Schema> {
    let text = read_source(Some(path))?;
    let schema = if path.extension().is_some_and(|ext| ext == "json") {
        let json = serde_json::from_str(&text)
            .with_context(|| format!("{} is not JSON", path.display()))?;
        Schema::from_introspection(json)?
    } else {
        Schema::from_sdl(&text)?
    };
    log::debug!("Loaded schema from {path:#?}.");
    Ok(schema)
}

/// The operation text a builder command edits.
#[derive(Debug, clap::Args)]
pub(super) struct DocumentArgs {
    #[arg(
        help="File holding the operation text. Read from stdin when omitted.",
        long,
        short='f',
    )]
    file: Option<PathBuf>,

    #[arg(
        help="Name of the operation to edit when several share a kind.",
        long,
    )]
    operation_name: Option<String>,

    #[arg(
        help="Write the result back into --file instead of printing it.",
        long,
        requires="file",
    )]
    write: bool,
}
impl DocumentArgs {
    pub fn operation_name(&self) -> Option<&str> {
        self.operation_name.as_deref()
    }

    /// Reads the document, applies `edit` and prints or writes the result.
    pub fn apply(&self, edit: impl FnOnce(&str) -> String) -> CommandResult {
        let query = match read_source(self.file.as_deref()) {
            Ok(query) => query,
            Err(e) => return CommandResult::from_error(e),
        };
        let edited = edit(&query);
        if edited == query {
            log::debug!("Document unchanged.");
        }

        match (&self.file, self.write) {
            (Some(path), true) => match std::fs::write(path, &edited) {
                Ok(()) => {
                    log::info!("Wrote {path:#?}.");
                    CommandResult::done()
                },
                Err(e) => CommandResult::stderr(format_args!(
                    "{} Failed to write {path:#?}: {e}",
                    crate::output_utils::RED_X,
                )),
            },

            _ => CommandResult::stdout(format_args!("{}", edited.trim_end_matches('\n'))),
        }
    }
}

/// An operation assembled from files: the GraphQL text plus optional JSON
/// files for its variables, headers and extensions.
#[derive(Debug, clap::Args)]
pub(super) struct OperationFiles {
    #[arg(
        help="File holding the operation text. Read from stdin when omitted.",
        long,
        short='f',
    )]
    file: Option<PathBuf>,

    #[arg(help="JSON file with the operation's variables.", long)]
    variables: Option<PathBuf>,

    #[arg(help="JSON file with the operation's request headers.", long)]
    headers: Option<PathBuf>,

    #[arg(help="JSON file with the operation's extensions.", long)]
    extensions: Option<PathBuf>,
}
impl OperationFiles {
    pub fn load(&self) -> anyhow::Result<Operation> {
        let query = read_source(self.file.as_deref())?;
        let name = document::operation_name(&query).unwrap_or_else(|| "Untitled".to_string());
        Ok(Operation {
            variables: read_optional(self.variables.as_deref())?,
            headers: read_optional(self.headers.as_deref())?,
            extensions: read_optional(self.extensions.as_deref())?,
            ..Operation::new(name, query)
        })
    }
}
