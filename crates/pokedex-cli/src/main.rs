//! Pokédex - a terminal client for the PokeAPI creature catalog.
//!
//! Pages, random starts and details are served through the catalog cache,
//! which falls back to entries saved by earlier sessions when the API cannot
//! be reached.

mod cli;
mod output;

use std::io;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pokedex_core::api::PokeApiClient;
use pokedex_core::store::MemoryStore;
use pokedex_core::views::{Details, OverviewController};
use pokedex_core::{CatalogCache, Config, Mode};

use cli::{Cli, Command};

/// Log file name prefix inside the configured log directory
const LOG_FILE_PREFIX: &str = "pokedex.log";

/// Initialize the tracing subscriber for logging.
///
/// Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug).
/// The returned guard must be held until exit so buffered file logs are flushed.
fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

fn open_catalog(config: &Config, ephemeral: bool) -> Result<CatalogCache> {
    if !ephemeral {
        return config.open_catalog();
    }
    let client = PokeApiClient::with_base_url(config.api_base_url(), config.request_timeout())
        .context("Failed to create API client")?;
    Ok(CatalogCache::new(
        Arc::new(client),
        Arc::new(MemoryStore::new()),
        config.page_size(),
    ))
}

async fn run(cli: Cli, config: Config) -> Result<()> {
    let catalog = Arc::new(open_catalog(&config, cli.ephemeral)?);

    if catalog.mode().await == Mode::Offline {
        eprintln!("PokeAPI is unreachable - showing entries saved on this device.");
    }

    match cli.command {
        Command::List {
            page,
            offset,
            pages,
            sort,
        } => {
            let mut overview = OverviewController::new(catalog);
            overview.sort_by(sort.map(Into::into));
            overview.load_from(page, offset).await?;
            for _ in 1..pages {
                if overview.state().is_end_reached {
                    break;
                }
                overview.load_next_page().await?;
            }
            println!("{}", output::render_overview(overview.state()));
        }
        Command::Random { sort } => {
            let mut overview = OverviewController::new(catalog);
            overview.sort_by(sort.map(Into::into));
            overview.reload_from_random_page().await?;
            println!("{}", output::render_overview(overview.state()));
        }
        Command::Show { name } => {
            let entry = catalog.get_by_name(&name).await?;
            println!("{}", output::render_details(&Details::from(entry.as_ref())));
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    config.apply_env();

    let _log_guard = init_tracing(config.log_dir.as_deref());
    info!("Pokedex starting");

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %format!("{:#}", e), "Command failed");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
