//! toread CLI
//!
//! Save links, let an LLM summarize and tag them, and digest whole reading lists.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use toread_core::error::exit_codes;
use toread_core::{CollectionService, Config, ContentProcessor, Database, ToReadError};

mod app;
mod commands;
mod output;

use app::{Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            let code = e
                .downcast_ref::<ToReadError>()
                .map(ToReadError::exit_code)
                .unwrap_or(exit_codes::GENERAL_ERROR);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_directives = if verbose {
        "warn,toread=debug,toread_core=debug"
    } else {
        "warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directives));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let config = Config::load_from(&config_path)?;
    let (owner, format) = (cli.owner, cli.format);

    match cli.command {
        Commands::Config(args) => commands::config::run(args, &config, &config_path, format),
        Commands::Classify(args) => commands::classify::run(args, format),
        Commands::Add(args) => {
            let service = open_service(config)?;
            commands::add::run(args, &service, owner, format).await
        }
        Commands::List(args) => commands::list::run(args, &open_service(config)?, owner, format),
        Commands::Summary(args) => {
            let service = open_service(config)?;
            commands::summary::run(args, &service, owner, format).await
        }
        Commands::Tags => commands::tags::run(&open_service(config)?, owner, format),
        Commands::Remove(args) => commands::remove::run(args, &open_service(config)?, owner, format),
    }
}

fn open_service(config: Config) -> Result<CollectionService> {
    // TOREAD_DB wins over the config file, which wins over the cache dir
    let db_path = std::env::var("TOREAD_DB")
        .map(PathBuf::from)
        .ok()
        .or_else(|| config.database_path.clone())
        .unwrap_or_else(Database::default_path);
    tracing::debug!("Using database at {}", db_path.display());

    let db = Database::open(&db_path)?;
    db.initialize()?;

    let processor = ContentProcessor::new(Arc::new(config))?;
    Ok(CollectionService::new(db, processor))
}
