//! Command-line interface for pii-datagen
//!
//! # Usage Examples
//!
//! ## Publish records (default command)
//! ```bash
//! BOOTSTRAP_SERVERS=localhost:9092 KAFKA_TOPIC=pii \
//! SASL_USERNAME=bobjones SASL_PASSWORD=secret \
//!   pii-datagen
//!
//! # Faster, reproducible run
//! pii-datagen produce --interval 500ms --seed 42
//! ```
//!
//! ## Show records owned by the SASL user
//! ```bash
//! pii-datagen consume --group-id pii-owner-filter
//! ```
//!
//! Logging is controlled with `RUST_LOG` (default: `info` for this tool's crates).

use anyhow::Context;
use clap::{Parser, Subcommand};
use pii_datagen::shutdown::setup_shutdown_handler;
use pii_datagen::{consume, produce, ConsumeArgs, ProduceArgs};
use pii_kafka::PiiProducer;
use tracing::error;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "pii_datagen=info,pii_kafka=info,pii_generator=info";

#[derive(Parser)]
#[command(name = "pii-datagen")]
#[command(about = "Publish mock PII records to a Kafka topic")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Arguments for `produce` when no subcommand is given
    #[command(flatten)]
    produce: ProduceArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish a generated record on every interval until interrupted
    Produce(ProduceArgs),

    /// Log records owned by the SASL user until interrupted
    Consume(ConsumeArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .init();

    if let Err(e) = run(Cli::parse()).await {
        error!("{e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Produce(cli.produce)) {
        Commands::Produce(args) => {
            let shutdown = setup_shutdown_handler();
            // The loop sleeps and polls the producer synchronously.
            tokio::task::spawn_blocking(move || produce(&args, PiiProducer::new, shutdown))
                .await
                .context("Publish loop panicked")??;
        }
        Commands::Consume(args) => {
            let shutdown = setup_shutdown_handler();
            consume(&args, shutdown).await?;
        }
    }

    Ok(())
}
