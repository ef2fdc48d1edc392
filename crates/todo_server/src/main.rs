use clap::Parser;
use todo_core::config::{self, ServerConfig};
use todo_core::error::AppError;
use todo_server::app;
use todo_server::cli::{Cli, Command, collect_overrides};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info,todo_server=debug,todo_core=debug";

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(cli: &Cli) -> Result<ServerConfig, AppError> {
    let loaded = config::load_config_with_fallback();
    if let Some(err) = loaded.error.as_ref() {
        tracing::warn!(error = %err, "falling back to default configuration");
    }

    let overrides = collect_overrides(&cli.config_override).map_err(AppError::invalid_input)?;
    Ok(config::merge_overrides(&loaded.config, &overrides))
}

async fn run_command(cli: Cli) -> Result<(), AppError> {
    let config = resolve_config(&cli)?;

    match cli.command {
        Command::Serve => app::serve(&config).await?,
        Command::Purge => {
            let report = app::purge_once(&config).await?;
            if cli.json {
                println!("{}", serde_json::json!({ "deleted": report.deleted }));
            } else {
                println!("Deleted {} completed todos", report.deleted);
            }
        }
    }

    Ok(())
}

fn normalize_parse_error(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string()
}

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(&err));
            std::process::exit(1);
        }
    };

    init_tracing();

    if let Err(err) = run_command(cli).await {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
