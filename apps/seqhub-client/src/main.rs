use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result, anyhow};
use clap::Parser;

use seqhub_bootstrap::AppConfig;
use seqhub_directory::{Directory, DirectoryConfig, LocalBroker, ServiceBinding, ServiceName};
use sequences::catalog;
use sequences_sdk::{SequenceClient, SequenceDirectory, SequenceInfo};

const DELIMITER: &str = "--------------------------------------------------";

const AFTER_HELP: &str = "Sequence ID is the identifier of an integer sequence, e.g. 'fib' \
(Fibonacci numbers).\nService ID is the identifier of a particular implementation of a \
sequence,\nwhich consists of a sequence ID, dot '.', and a kind, e.g. 'fac.naive-core'.\n\n\
Indexing starts with zero; e.g., fib(0) = 0 and fib(1) = 1.\n\n\
Examples:\n    seqhub-client fib 5 6 7\n    seqhub-client --seq --short primes.core 10000 20000";

/// SeqHub Client - retrieves members of integer sequences
#[derive(Parser)]
#[command(name = "seqhub-client")]
#[command(about = "SeqHub Client - retrieves members of integer sequences")]
#[command(version)]
#[command(after_help = AFTER_HELP)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Perform a separate request for each index
    #[arg(long, conflicts_with = "batch")]
    seq: bool,

    /// Perform a batch request for all indices (default)
    #[arg(long)]
    batch: bool,

    /// Print only the 20 first and 20 last digits of received integers
    #[arg(long)]
    short: bool,

    /// Print the list of registered implementations and exit
    #[arg(long)]
    list: bool,

    /// Sequence ID (e.g. 'fib') or service ID (e.g. 'fac.naive-core')
    #[arg(required_unless_present = "list", conflicts_with = "list")]
    name: Option<String>,

    /// Indices of sequence members to get
    #[arg(allow_negative_numbers = true, conflicts_with = "list")]
    indices: Vec<i32>,
}

fn print_info(name: &ServiceName, info: &SequenceInfo) {
    println!("Sequence ID: {}, kind: {}", name.id(), name.kind());
    println!("Name: {}", info.display_name);
    println!("Maximal supported index: {}", info.max_index);
    println!("Description:\n{}", info.description);
}

/// Host the builtin catalog on an embedded broker and open a querying
/// directory over it.
///
/// The returned guards keep the hosted services reachable; they must
/// outlive every request made through the directory.
async fn connect(config: &AppConfig) -> Result<(Vec<ServiceBinding>, SequenceDirectory)> {
    let broker = Arc::new(LocalBroker::new());
    let hosting: SequenceDirectory = Directory::new(
        broker.clone(),
        DirectoryConfig {
            create_if_absent: true,
            ..config.directory.clone()
        },
    );
    let bindings = catalog::host_builtins(&hosting).await?;
    let directory = Directory::new(broker, config.directory.clone());
    Ok((bindings, directory))
}

async fn list_services(directory: &SequenceDirectory) -> Result<()> {
    let names = directory.list().await?;
    println!("Registered sequence implementations:");
    for name in names {
        println!("{DELIMITER}");
        match directory.resolve(&name).await {
            Ok(service) => {
                let info = service.info().await?;
                print_info(&name, &info);
            }
            Err(error) => {
                println!("Sequence ID: {}, kind: {}", name.id(), name.kind());
                println!("{error}");
            }
        }
    }
    Ok(())
}

async fn query_sequence(cli: &Cli, directory: &SequenceDirectory, query: &str) -> Result<()> {
    println!("Getting service by sequence name '{query}'...");

    let mut client = None;
    for name in directory.list().await? {
        if name.id() != query && name.to_string() != query {
            continue;
        }
        match directory.resolve(&name).await {
            Ok(service) => {
                client = Some(SequenceClient::new(service, name, cli.short));
                break;
            }
            Err(error) => {
                eprintln!("Error accessing service {name}");
                tracing::warn!(name = %name, error = %error, "candidate did not resolve");
            }
        }
    }
    let client = client
        .ok_or_else(|| anyhow!("no available services match the name '{query}'"))?;

    let info = client
        .info()
        .await
        .context("error requesting service identity")?;
    println!("Connected to service '{}' (name: {})", info.display_name, client.name());

    // Batching is the default; --seq and --batch are mutually exclusive.
    if cli.batch || !cli.seq {
        let responses = client
            .numbers(&cli.indices)
            .await
            .context("error processing response")?;
        for (&index, response) in cli.indices.iter().zip(&responses) {
            println!("{}", client.render(index, response));
        }
    } else {
        for &index in &cli.indices {
            let response = client
                .number(index)
                .await
                .context("error processing response")?;
            println!("{}", client.render(index, &response));
        }
    }
    Ok(())
}

fn usage_error(message: &str) -> ! {
    eprintln!("{message}\nInvoke with `--help` to get help.");
    std::process::exit(2);
}

fn service_error(error: &anyhow::Error) -> ! {
    eprintln!("Error: {error:#}");
    std::process::exit(1);
}

async fn run(cli: &Cli, config: &AppConfig) -> Result<()> {
    let (bindings, directory) = connect(config).await?;
    if cli.list {
        list_services(&directory).await?;
    } else if let Some(query) = cli.name.as_deref() {
        query_sequence(cli, &directory, query).await?;
    }
    drop(bindings);
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(error) => service_error(&error),
    };
    seqhub_bootstrap::logging::init(cli.verbose, &config.logging);

    if cli.indices.len() > config.client.max_batch {
        usage_error(&format!(
            "Too many indices specified. Specify no more than {}.",
            config.client.max_batch
        ));
    }

    if let Err(error) = run(&cli, &config).await {
        service_error(&error);
    }
}
