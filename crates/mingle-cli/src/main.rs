//! Mingle CLI - Console client for the social network

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod export;
mod prompt;
mod session;

use mingle_core::SocialNetwork;
use mingle_storage::{FlatFileStorage, StorageBackend};
use session::Session;

#[derive(Parser)]
#[command(name = "mingle")]
#[command(author, version, about = "Console social network with friendships and feeds")]
pub struct Cli {
    /// Data directory for the flat file stores
    #[arg(short, long, global = true, env = "MINGLE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Without a subcommand, an interactive session starts
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Get the data directory path
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("mingle")
        })
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Export the network as JSON (passwords omitted)
    Export(export::ExportArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // Diagnostics go to stderr; stdout belongs to the session
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting mingle CLI");

    let data_dir = cli.data_dir();
    std::fs::create_dir_all(&data_dir)?;
    tracing::debug!("Using data directory at: {:?}", data_dir);

    let mut storage = FlatFileStorage::new(&data_dir);
    let mut network = SocialNetwork::from_snapshot(storage.load()?);

    match &cli.command {
        Some(Commands::Export(args)) => export::run(args, &network)?,
        None => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            let mut session = Session::new(&mut network, stdin.lock(), stdout.lock());
            session.run()?;
            storage.save(&network.snapshot())?;
        }
    }

    Ok(())
}
