//! Publishing serialized records.

use crate::config::KafkaSettings;
use crate::delivery::DeliveryLogger;
use crate::error::{KafkaPiiError, Result};
use rdkafka::producer::{BaseProducer, BaseRecord, Producer};
use rdkafka::util::Timeout;
use std::time::Duration;
use tracing::{debug, info};

/// Where the publish loop hands its payloads.
///
/// Implementations deliver asynchronously: `submit` only enqueues, and
/// delivery outcomes surface while `poll` or `flush` run.
pub trait MessageSink {
    /// Enqueue `payload` for `topic`, with no key and no headers.
    fn submit(&self, topic: &str, payload: &[u8]) -> Result<()>;

    /// Serve queued delivery callbacks for up to `timeout`.
    fn poll(&self, timeout: Duration);

    /// Block until everything enqueued has been delivered or has failed.
    ///
    /// `None` waits without a deadline.
    fn flush(&self, timeout: Option<Duration>) -> Result<()>;
}

/// [`MessageSink`] over an rdkafka `BaseProducer` that logs delivery reports.
pub struct PiiProducer {
    producer: BaseProducer<DeliveryLogger>,
}

impl PiiProducer {
    /// Create a SASL/PLAIN producer for the configured brokers.
    pub fn new(settings: &KafkaSettings) -> Result<Self> {
        let producer: BaseProducer<DeliveryLogger> = settings
            .producer_config()
            .create_with_context(DeliveryLogger)?;

        debug!(
            "Created Kafka producer for {} as '{}'",
            settings.bootstrap_servers, settings.credentials.username
        );
        Ok(Self { producer })
    }
}

impl MessageSink for PiiProducer {
    fn submit(&self, topic: &str, payload: &[u8]) -> Result<()> {
        let record: BaseRecord<'_, (), [u8]> = BaseRecord::to(topic).payload(payload);
        self.producer
            .send(record)
            .map_err(|(err, _)| KafkaPiiError::Kafka(err))
    }

    fn poll(&self, timeout: Duration) {
        self.producer.poll(timeout);
    }

    fn flush(&self, timeout: Option<Duration>) -> Result<()> {
        info!(
            "Flushing {} in-flight messages",
            self.producer.in_flight_count()
        );
        let timeout = match timeout {
            Some(duration) => Timeout::After(duration),
            None => Timeout::Never,
        };
        self.producer.flush(timeout)?;
        Ok(())
    }
}
