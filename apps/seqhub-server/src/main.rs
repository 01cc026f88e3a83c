use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use seqhub_bootstrap::{AppConfig, wait_for_shutdown};
use seqhub_directory::{Directory, DirectoryConfig, LocalBroker, ServiceName};
use sequences::catalog;
use sequences_sdk::{SequenceDirectory, SequenceInfo};

const DELIMITER: &str = "--------------------------------------------------";

/// SeqHub Server - hosts integer sequence services
#[derive(Parser)]
#[command(name = "seqhub-server")]
#[command(about = "SeqHub Server - hosts integer sequence services")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// List implementations hosted by this server and exit
    #[arg(long)]
    list: bool,
}

fn print_info(name: &ServiceName, info: &SequenceInfo) {
    println!("Sequence ID: {}, kind: {}", name.id(), name.kind());
    println!("Name: {}", info.display_name);
    println!("Maximal supported index: {}", info.max_index);
    println!("Description:\n{}", info.description);
}

fn list_implementations() -> Result<()> {
    println!("List of implementations hosted by this server:");
    for (name, service) in catalog::builtin_services()? {
        println!("{DELIMITER}");
        print_info(&name, service.info());
    }
    Ok(())
}

async fn host_implementations(config: &AppConfig) -> Result<()> {
    let broker = Arc::new(LocalBroker::new());
    let directory: SequenceDirectory = Directory::new(
        broker,
        DirectoryConfig {
            // The hosting side owns the namespace and creates it on demand.
            create_if_absent: true,
            ..config.directory.clone()
        },
    );

    let bindings = catalog::host_builtins(&directory).await?;
    tracing::info!(count = bindings.len(), "catalog is hosted");
    println!("Ready for incoming requests...");

    wait_for_shutdown().await?;

    // Dropping the guards marks the registrations unreachable; the names
    // stay on record and are purged on the next start.
    drop(bindings);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    seqhub_bootstrap::logging::init(cli.verbose, &config.logging);

    if cli.list {
        return list_implementations();
    }
    host_implementations(&config).await
}
