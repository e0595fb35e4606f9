use std::sync::Arc;
use std::time::Duration;

/// Reset SIGPIPE to default behavior so piping (e.g. `cosmonav search | head`)
/// exits cleanly instead of panicking on broken pipe.
#[cfg(unix)]
fn reset_sigpipe() {
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::io::AsyncBufReadExt;
use tracing_subscriber::EnvFilter;

mod config;
mod index;
mod output;
mod palette;
mod rank;
mod source;

use config::loader;
use config::types::{BackendConfig, NavConfig};
use index::backend::IndexBackend;
use index::memory::MemoryBackend;
use index::sqlite::SqliteBackend;
use palette::controller::{PaletteContext, PaletteController, PaletteSession};
use source::file::JsonFileSource;
use source::ResourceSource;

const DEFAULT_INVENTORY: &str = "inventory.json";

/// cosmonav - local search index and command palette for Cosmos DB resources
#[derive(Parser)]
#[command(name = "cosmonav", version, about, long_about = None)]
struct Cli {
    /// Path to config file or directory containing cosmonav.yaml
    #[arg(short, long, default_value = loader::DEFAULT_CONFIG_PATH)]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Working directory for the index cache (overrides config)
    #[arg(short, long)]
    working_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the search index from the configured inventory
    Index {
        /// Inventory file to crawl (overrides config)
        #[arg(short, long)]
        inventory: Option<String>,
    },

    /// Search the index once and print grouped results
    Search {
        /// Free-text query; whitespace-separated terms are ANDed
        query: String,

        /// Maximum results per group
        #[arg(short, long)]
        limit: Option<usize>,

        /// Scope the "containers here" group to an account
        #[arg(long)]
        account: Option<String>,

        /// Scope the "containers here" group to a database
        #[arg(long)]
        database: Option<String>,
    },

    /// Interactive palette: one debounced search per input line
    Palette,

    /// Show index freshness and entity counts
    Status,

    /// Drop the cached snapshot
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    #[cfg(unix)]
    reset_sigpipe();

    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let mut config = loader::load_config(&cli.config)?;
    if let Some(dir) = &cli.working_dir {
        config.settings.working_dir = dir.clone();
    }

    match cli.command {
        Commands::Index { ref inventory } => cmd_index(&config, inventory.as_deref()).await,
        Commands::Search {
            ref query,
            limit,
            ref account,
            ref database,
        } => cmd_search(&config, query, limit, account.clone(), database.clone()).await,
        Commands::Palette => cmd_palette(&config).await,
        Commands::Status => cmd_status(&config).await,
        Commands::Clear => cmd_clear(&config).await,
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn open_backend(config: &NavConfig) -> Result<Arc<dyn IndexBackend>> {
    match config.settings.backend {
        BackendConfig::Sqlite => {
            let db_path = format!("{}/index.db", config.settings.working_dir);
            Ok(Arc::new(SqliteBackend::open(&db_path)?))
        }
        BackendConfig::Memory => Ok(Arc::new(MemoryBackend::new())),
    }
}

fn open_source(config: &NavConfig, inventory_override: Option<&str>) -> Arc<dyn ResourceSource> {
    let path = inventory_override
        .map(str::to_string)
        .or_else(|| config.inventory.clone())
        .unwrap_or_else(|| DEFAULT_INVENTORY.to_string());
    Arc::new(JsonFileSource::new(path))
}

// ─── Commands ────────────────────────────────────────────────────────────────

async fn cmd_index(config: &NavConfig, inventory: Option<&str>) -> Result<()> {
    let backend = open_backend(config)?;
    backend.initialize().await?;

    let source = open_source(config, inventory);
    let snapshot = source.crawl().await?;

    tracing::info!(
        accounts = snapshot.accounts.len(),
        databases = snapshot.databases.len(),
        containers = snapshot.containers.len(),
        "Crawled inventory"
    );

    backend.save_snapshot(&snapshot).await?;

    output::formatter::print_success(&format!(
        "Indexed {} accounts, {} databases, {} containers.",
        snapshot.accounts.len(),
        snapshot.databases.len(),
        snapshot.containers.len()
    ));
    Ok(())
}

async fn cmd_search(
    config: &NavConfig,
    query: &str,
    limit: Option<usize>,
    account: Option<String>,
    database: Option<String>,
) -> Result<()> {
    let backend = open_backend(config)?;
    backend.initialize().await?;

    let limit = limit.unwrap_or(config.settings.result_limit);
    let controller = PaletteController::new(backend, open_source(config, None), limit);
    let context = PaletteContext {
        account_name: account,
        database_name: database,
    };

    let results = controller.search(query, &context).await?;
    output::formatter::print_results(&results, query);
    Ok(())
}

async fn cmd_palette(config: &NavConfig) -> Result<()> {
    let backend = open_backend(config)?;
    backend.initialize().await?;

    let controller = PaletteController::new(
        backend,
        open_source(config, None),
        config.settings.result_limit,
    );
    let session = Arc::new(PaletteSession::new(
        controller,
        Duration::from_millis(config.settings.debounce_ms),
    ));

    println!("Type a query and press enter (blank line lists everything, ctrl-d exits).");

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    let context = PaletteContext::default();
    while let Some(line) = lines.next_line().await? {
        let session = Arc::clone(&session);
        let context = context.clone();
        // Each line supersedes the previous one; a superseded pass returns
        // None and prints nothing.
        tokio::spawn(async move {
            match session.on_input(&line, &context).await {
                Ok(Some(results)) => output::formatter::print_results(&results, &line),
                Ok(None) => {}
                Err(e) => output::formatter::print_error(&format!("search failed: {e:#}")),
            }
        });
    }
    Ok(())
}

async fn cmd_status(config: &NavConfig) -> Result<()> {
    let backend = open_backend(config)?;
    backend.initialize().await?;

    let metadata = backend.get_metadata().await?;
    output::formatter::print_status(metadata.as_ref());
    Ok(())
}

async fn cmd_clear(config: &NavConfig) -> Result<()> {
    let backend = open_backend(config)?;
    backend.initialize().await?;

    backend.clear_snapshot().await?;
    output::formatter::print_success("Index cleared.");
    Ok(())
}
