//! Lumen Command Line Interface
//!
//! Usage:
//!   lumen init            - Initialize the datastore schema
//!   lumen start           - Start the API server
//!   lumen import          - Import on-disk boards and firmware (first run)

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod import;

use config::Config;

#[derive(Parser)]
#[command(name = "lumen")]
#[command(about = "Lumen UI content server")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "lumen.toml")]
    config: PathBuf,

    /// Datastore endpoint (mem://, rocksdb://path, ws://host)
    #[arg(long)]
    db_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the datastore schema
    Init,

    /// Start the API server (runs a first-run import on an empty store)
    Start {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "0.0.0.0")]
        host: String,
        /// Port to listen on; overrides the config file
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Import existing board directories and firmware into an empty store
    Import {
        /// Override the firmware directory
        #[arg(long)]
        firmware_dir: Option<String>,
        /// Override the firmware digest key
        #[arg(long)]
        secret_key: Option<String>,
        /// Override the firmware version string
        #[arg(long)]
        fw_version: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_tracing();

    let cli = Cli::parse();
    let mut config = Config::load(&cli.config)?;
    if let Some(db_url) = cli.db_url {
        config.db_url = db_url;
    }

    match cli.command {
        Commands::Init => commands::init(&config).await,
        Commands::Start { host, port } => {
            if let Some(port) = port {
                config.port = port;
            }
            commands::start(&config, host).await
        }
        Commands::Import {
            firmware_dir,
            secret_key,
            fw_version,
        } => {
            if let Some(dir) = firmware_dir {
                config.firmware_dir = dir;
            }
            if let Some(key) = secret_key {
                config.secret_key = key;
            }
            if let Some(version) = fw_version {
                config.version = version;
            }
            commands::import(&config).await
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
