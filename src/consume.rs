//! The `consume` command: run the owner filter until interrupted.

use anyhow::Context;
use clap::{ArgAction, Args};
use pii_kafka::config::DEFAULT_GROUP_ID;
use pii_kafka::{FilterSummary, KafkaArgs, OwnerFilter};
use tokio::sync::broadcast;
use tracing::info;

/// Arguments for the `consume` command.
#[derive(Args, Clone, Debug)]
pub struct ConsumeArgs {
    #[command(flatten)]
    pub kafka: KafkaArgs,

    /// Consumer group ID
    #[arg(long, env = "APPLICATION_ID", default_value = DEFAULT_GROUP_ID)]
    pub group_id: String,

    /// Authenticate with SASL/PLAIN (set to false for a plaintext listener)
    #[arg(long, env = "KAFKA_SASL_ENABLED", default_value_t = true, action = ArgAction::Set)]
    pub sasl_enabled: bool,
}

/// Validate configuration, subscribe, and log owned records until shutdown.
pub async fn consume(
    args: &ConsumeArgs,
    shutdown: broadcast::Receiver<()>,
) -> anyhow::Result<FilterSummary> {
    let settings = args.kafka.resolve()?;
    if !args.sasl_enabled {
        info!("SASL disabled for the owner filter");
    }
    let filter = OwnerFilter::new(&settings, &args.group_id, args.sasl_enabled)
        .context("Failed to create Kafka consumer")?;

    Ok(filter.run(shutdown).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct ConsumeCli {
        #[command(flatten)]
        args: ConsumeArgs,
    }

    #[test]
    fn test_sasl_enabled_by_default() {
        let cli = ConsumeCli::try_parse_from(["consume"]).unwrap();
        assert!(cli.args.sasl_enabled);
        assert_eq!(cli.args.group_id, DEFAULT_GROUP_ID);
    }

    #[test]
    fn test_sasl_can_be_disabled() {
        let cli = ConsumeCli::try_parse_from(["consume", "--sasl-enabled", "false"]).unwrap();
        assert!(!cli.args.sasl_enabled);
    }
}
