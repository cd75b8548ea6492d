mod config;
mod sync;

pub use config::*;
pub use sync::SyncCommand;

use anyhow::Result;
use clap::Parser;
use quarry::Db;
use tracing_subscriber::EnvFilter;

/// Quarry CLI library for building custom command-line tools
///
/// Entities are registered by the application when it builds its [`Db`];
/// the CLI only drives operations over that handle.
pub struct QuarryCli {
    db: Db,
    config: Config,
}

impl QuarryCli {
    /// Create a new QuarryCli instance with the given database handle
    pub fn new(db: Db) -> Self {
        Self {
            db,
            config: Config::default(),
        }
    }

    /// Create a new QuarryCli instance with a custom configuration
    pub fn with_config(db: Db, config: Config) -> Self {
        Self { db, config }
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse and execute CLI commands from command-line arguments
    pub async fn parse_and_run(&self) -> Result<()> {
        let cli = Cli::parse();
        self.run(cli).await
    }

    /// Parse and execute CLI commands from an iterator of arguments
    pub async fn parse_from<I, T>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args)?;
        self.run(cli).await
    }

    async fn run(&self, cli: Cli) -> Result<()> {
        init_tracing(cli.verbose);

        match cli.command {
            Command::Sync(cmd) => cmd.run(&self.db, &self.config).await,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "quarry")]
#[command(about = "Quarry CLI - Schema synchronization tool")]
#[command(version)]
struct Cli {
    /// Log every statement executed
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// Bring the database schema in line with the registered entities
    Sync(SyncCommand),
}

/// Installs a subscriber once. `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "quarry=debug" } else { "quarry=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // Another subscriber may already be installed by the host application.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
