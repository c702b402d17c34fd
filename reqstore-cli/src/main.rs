//! reqstore CLI - operate the request body store from scripts
//!
//! Thin wrapper over `reqstore-core`: reads `MONGO_*` configuration from
//! the environment (a `.env` file is honored), connects, runs one
//! operation, and disconnects. Payloads and ids travel over stdout so the
//! commands compose in pipelines.

use std::io::Read;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use reqstore_core::{ConnectionState, DocumentStore};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "reqstore",
    version,
    about = "Save, fetch, and delete request body payloads in the document store"
)]
struct Cli {
    /// Only log warnings and errors (for script consumption)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Persist a payload and print its store-assigned id
    Save(SaveArgs),
    /// Print the payload stored under an id
    Get {
        /// Public id returned by `save`
        id: String,
    },
    /// Delete stored payloads by id (whole batch succeeds or fails)
    Delete {
        /// One or more public ids
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Attempt a best-effort connect and report connection state
    Status,
}

#[derive(Args, Debug)]
struct SaveArgs {
    /// Payload to persist (omit to read from stdin)
    payload: Option<String>,
}

fn init_tracing(quiet: bool) -> Result<()> {
    let default = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

fn read_payload(args: SaveArgs) -> Result<String> {
    match args.payload {
        Some(payload) => Ok(payload),
        None => {
            let mut payload = String::new();
            std::io::stdin()
                .read_to_string(&mut payload)
                .context("failed to read payload from stdin")?;
            Ok(payload)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.quiet)?;

    let store = DocumentStore::from_env();

    match cli.command {
        Commands::Save(args) => {
            let payload = read_payload(args)?;
            store.try_connect().await?;
            let id = store.save(payload).await?;
            println!("{id}");
        }
        Commands::Get { id } => {
            store.try_connect().await?;
            let payload = store.get(&id).await?;
            println!("{payload}");
        }
        Commands::Delete { ids } => {
            store.try_connect().await?;
            if !store.delete_many(&ids).await {
                bail!("failed to delete request bodies");
            }
        }
        Commands::Status => {
            store.connect().await;
            match store.state().await {
                ConnectionState::Connected => println!("connected"),
                ConnectionState::Disconnected => println!("disconnected"),
            }
        }
    }

    store.close().await?;
    Ok(())
}
