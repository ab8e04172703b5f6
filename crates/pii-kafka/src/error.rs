//! Error types for the Kafka layer.

use thiserror::Error;

/// Errors raised while talking to Kafka.
#[derive(Error, Debug)]
pub enum KafkaPiiError {
    #[error("Kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Startup configuration problems.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Names of the environment variables that were unset or empty.
    #[error("Please configure the following environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
}

pub type Result<T> = std::result::Result<T, KafkaPiiError>;
