use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod algorithm;
mod decode;
mod encode;
mod error;
mod output;
mod store;
mod utils;

use error::Result;

use store::StoreCommands;

#[derive(Parser)]
#[command(name = "secpref")]
#[command(about = "Encrypted values for string key-value preference files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serialize, encrypt and base64 encode a JSON value
    Encode {
        #[command(flatten)]
        config: encode::Config,
    },
    /// Decode a string produced by `encode`
    Decode {
        #[command(flatten)]
        config: decode::Config,
    },
    /// Encrypted preference file operations
    Store {
        #[command(subcommand)]
        command: StoreCommands,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("SECPREF_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode { config } => {
            encode::execute(config)?;
        }
        Commands::Decode { config } => {
            decode::execute(config)?;
        }
        Commands::Store { command } => match command {
            StoreCommands::Put { config } => {
                store::put::execute(config)?;
            }
            StoreCommands::Get { config } => {
                store::get::execute(config)?;
            }
            StoreCommands::Remove { config } => {
                store::remove::execute(config)?;
            }
            StoreCommands::Keys { config } => {
                store::keys::execute(config)?;
            }
        },
    }

    Ok(())
}
