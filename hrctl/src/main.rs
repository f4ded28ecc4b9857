use std::process::ExitCode;

use clap::Parser;
use hrctl::cli::Cli;
use hrctl::logger;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    if let Err(e) =
        logger::init_logger_with_file(cli.log_level.as_deref(), cli.log_json, cli.log_dir.as_deref())
    {
        eprintln!("Logging disabled: {e:#}");
    }

    match hrctl::run(cli).await {
        Ok(output) => {
            println!("{}", output.trim_end());
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("{}", hrctl::describe_error(&e));
            match hrctl::error_category(&e) {
                Some(category) if category.is_user_error() => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}
