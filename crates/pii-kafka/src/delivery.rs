//! Delivery reports.
//!
//! librdkafka invokes [`DeliveryLogger::delivery`] from inside
//! `BaseProducer::poll` (and `flush`), on the polling thread. Outcomes are only
//! logged: failed messages are never retried and never stop the producer.

use rdkafka::client::ClientContext;
use rdkafka::error::{KafkaError, RDKafkaErrorCode};
use rdkafka::message::Message;
use rdkafka::producer::{DeliveryResult, ProducerContext};
use std::fmt;
use tracing::{error, info};

/// Broker-supplied details of a failed delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryError {
    pub name: String,
    pub code: i32,
    pub message: String,
}

impl DeliveryError {
    pub fn from_kafka(err: &KafkaError) -> Self {
        match err.rdkafka_error_code() {
            Some(code) => Self {
                name: format!("{code:?}"),
                code: code as i32,
                message: describe(code),
            },
            None => Self {
                name: format!("{:?}", RDKafkaErrorCode::Unknown),
                code: RDKafkaErrorCode::Unknown as i32,
                message: err.to_string(),
            },
        }
    }
}

/// librdkafka's description of `code`, without the variant name that
/// `RDKafkaErrorCode`'s `Display` puts in front of it.
fn describe(code: RDKafkaErrorCode) -> String {
    let rendered = code.to_string();
    let prefix = format!("{code:?} (");
    match rendered
        .strip_prefix(prefix.as_str())
        .and_then(|rest| rest.strip_suffix(')'))
    {
        Some(description) => description.to_string(),
        None => rendered,
    }
}

/// Result of one delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered {
        topic: String,
        partition: i32,
        offset: i64,
    },
    Failed {
        topic: String,
        error: DeliveryError,
    },
}

impl DeliveryOutcome {
    pub fn from_result(result: &DeliveryResult<'_>) -> Self {
        match result {
            Ok(message) => DeliveryOutcome::Delivered {
                topic: message.topic().to_string(),
                partition: message.partition(),
                offset: message.offset(),
            },
            Err((err, message)) => DeliveryOutcome::Failed {
                topic: message.topic().to_string(),
                error: DeliveryError::from_kafka(err),
            },
        }
    }

    /// Successes at info, failures at error.
    pub fn log(&self) {
        match self {
            DeliveryOutcome::Delivered { .. } => info!("{self}"),
            DeliveryOutcome::Failed { .. } => error!("{self}"),
        }
    }
}

impl fmt::Display for DeliveryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryOutcome::Delivered { topic, offset, .. } => {
                write!(f, "Message produced - Topic: {topic}, Offset: {offset}")
            }
            DeliveryOutcome::Failed { topic, error } => write!(
                f,
                "Failed to deliver message - Topic: {topic}, Error Name: {}, Error Code: {}, Error Message: {}",
                error.name, error.code, error.message
            ),
        }
    }
}

/// Producer context that logs every delivery report.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeliveryLogger;

impl ClientContext for DeliveryLogger {}

impl ProducerContext for DeliveryLogger {
    type DeliveryOpaque = ();

    fn delivery(&self, delivery_result: &DeliveryResult<'_>, _delivery_opaque: ()) {
        DeliveryOutcome::from_result(delivery_result).log();
    }
}
