//! hrctl - command-line front-end for the HR sheet workflows

pub mod cli;
pub mod commands;
pub mod logger;
pub mod render;

use shared::ErrorCategory;
use sheet_client::{ClientConfig, ClientError, SheetContext};

use cli::Cli;

/// Resolve configuration, connect and run the parsed command
pub async fn run(cli: Cli) -> anyhow::Result<String> {
    let mut config = ClientConfig::from_env_with_endpoint(cli.endpoint)?;
    if let Some(operator) = cli.operator {
        config = config.with_operator(operator);
    }
    let ctx = SheetContext::connect(config)?;
    commands::execute(ctx, cli.command, cli.json).await
}

/// Category of the client error behind `err`, if there is one
pub fn error_category(err: &anyhow::Error) -> Option<ErrorCategory> {
    err.downcast_ref::<ClientError>().map(ClientError::category)
}

/// One-line message for the terminal
pub fn describe_error(err: &anyhow::Error) -> String {
    match error_category(err) {
        Some(category) => format!("{} error: {err:#}", category.name()),
        None => format!("error: {err:#}"),
    }
}
