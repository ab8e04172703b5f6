//! CLI argument definitions shared by the producer and the consumer.

use crate::config::{KafkaSettings, SaslCredentials};
use crate::error::ConfigError;
use clap::Args;

pub const BOOTSTRAP_SERVERS_ENV: &str = "BOOTSTRAP_SERVERS";
pub const KAFKA_TOPIC_ENV: &str = "KAFKA_TOPIC";
pub const SASL_USERNAME_ENV: &str = "SASL_USERNAME";
pub const SASL_PASSWORD_ENV: &str = "SASL_PASSWORD";

/// Broker connection arguments.
///
/// All four are required, but they are declared optional so a missing value is
/// reported through [`KafkaArgs::resolve`] instead of clap's usage error.
#[derive(Args, Clone, Debug, Default)]
pub struct KafkaArgs {
    /// Kafka bootstrap servers (comma-separated, e.g., "localhost:9092")
    #[arg(long, env = BOOTSTRAP_SERVERS_ENV)]
    pub bootstrap_servers: Option<String>,

    /// Topic records are published to and consumed from
    #[arg(long, env = KAFKA_TOPIC_ENV)]
    pub topic: Option<String>,

    /// SASL/PLAIN username
    #[arg(long, env = SASL_USERNAME_ENV)]
    pub sasl_username: Option<String>,

    /// SASL/PLAIN password
    #[arg(long, env = SASL_PASSWORD_ENV, hide_env_values = true)]
    pub sasl_password: Option<String>,
}

impl KafkaArgs {
    /// Validate that every required value is present.
    ///
    /// Empty strings count as missing.
    pub fn resolve(&self) -> Result<KafkaSettings, ConfigError> {
        let mut missing = Vec::new();
        let mut require = |value: &Option<String>, name: &'static str| match value {
            Some(v) if !v.is_empty() => Some(v.clone()),
            _ => {
                missing.push(name);
                None
            }
        };

        let bootstrap_servers = require(&self.bootstrap_servers, BOOTSTRAP_SERVERS_ENV);
        let topic = require(&self.topic, KAFKA_TOPIC_ENV);
        let username = require(&self.sasl_username, SASL_USERNAME_ENV);
        let password = require(&self.sasl_password, SASL_PASSWORD_ENV);

        match (bootstrap_servers, topic, username, password) {
            (Some(bootstrap_servers), Some(topic), Some(username), Some(password)) => {
                Ok(KafkaSettings {
                    bootstrap_servers,
                    topic,
                    credentials: SaslCredentials { username, password },
                })
            }
            _ => Err(ConfigError::Missing(missing)),
        }
    }
}
