//! The publish loop.
//!
//! Each iteration generates one record, submits it, sleeps for the configured
//! interval and then polls the producer so delivery reports are logged. The
//! loop only checks for shutdown at the top of an iteration; once it stops, the
//! producer is flushed before returning.

use crate::config::parse_duration;
use anyhow::Context;
use clap::Args;
use pii_generator::{FakeDataSource, RecordGenerator};
use pii_kafka::{KafkaArgs, KafkaSettings, MessageSink};
use std::time::Duration;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{error, info, warn};

/// Arguments for the `produce` command.
#[derive(Args, Clone, Debug)]
pub struct ProduceArgs {
    #[command(flatten)]
    pub kafka: KafkaArgs,

    /// Pause after submitting each record (e.g. "2s", "500ms")
    #[arg(long, env = "PII_INTERVAL", default_value = "2s", value_parser = parse_duration)]
    pub interval: Duration,

    /// How long to serve delivery reports after each pause
    #[arg(long, env = "PII_POLL_TIMEOUT", default_value = "1s", value_parser = parse_duration)]
    pub poll_timeout: Duration,

    /// Upper bound for the final flush (waits indefinitely when unset)
    #[arg(long, env = "PII_FLUSH_TIMEOUT", value_parser = parse_duration)]
    pub flush_timeout: Option<Duration>,

    /// Random seed for reproducible records (random when unset)
    #[arg(long, env = "PII_SEED")]
    pub seed: Option<u64>,
}

/// Timing of the publish loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishSchedule {
    pub interval: Duration,
    pub poll_timeout: Duration,
    pub flush_timeout: Option<Duration>,
}

impl Default for PublishSchedule {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            poll_timeout: Duration::from_secs(1),
            flush_timeout: None,
        }
    }
}

impl From<&ProduceArgs> for PublishSchedule {
    fn from(args: &ProduceArgs) -> Self {
        Self {
            interval: args.interval,
            poll_timeout: args.poll_timeout,
            flush_timeout: args.flush_timeout,
        }
    }
}

/// What the loop did before it stopped.
///
/// Delivery failures are reported by the producer's callback and are not
/// counted here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishSummary {
    /// Records handed to the sink.
    pub submitted: u64,
    /// Records the sink refused to enqueue.
    pub submit_failures: u64,
}

/// Validate configuration, connect, and run the publish loop until shutdown.
///
/// `connect` is only called once the configuration is complete; on a
/// configuration error nothing is created and no record is generated.
pub fn produce<S, C>(
    args: &ProduceArgs,
    connect: C,
    shutdown: broadcast::Receiver<()>,
) -> anyhow::Result<PublishSummary>
where
    S: MessageSink,
    C: FnOnce(&KafkaSettings) -> pii_kafka::Result<S>,
{
    let settings = args.kafka.resolve()?;
    let sink = connect(&settings).context("Failed to create Kafka producer")?;

    let mut generator = match args.seed {
        Some(seed) => {
            info!("Generating records with seed {seed}");
            RecordGenerator::seeded(seed)
        }
        None => RecordGenerator::from_entropy(),
    };

    let schedule = PublishSchedule::from(args);
    info!(
        "Publishing to topic '{}' on {} every {:?} (Press Ctrl+C to stop)",
        settings.topic, settings.bootstrap_servers, schedule.interval
    );

    Ok(run_publish_loop(
        &sink,
        &mut generator,
        &settings.topic,
        &schedule,
        shutdown,
    ))
}

/// Publish records until `shutdown` fires, then flush `sink`.
///
/// Blocks the calling thread. Neither submit failures nor a failed flush stop
/// or fail the loop; they are logged.
pub fn run_publish_loop<S, F>(
    sink: &S,
    generator: &mut RecordGenerator<F>,
    topic: &str,
    schedule: &PublishSchedule,
    mut shutdown: broadcast::Receiver<()>,
) -> PublishSummary
where
    S: MessageSink + ?Sized,
    F: FakeDataSource,
{
    let mut summary = PublishSummary::default();

    loop {
        match shutdown.try_recv() {
            Err(TryRecvError::Empty) => {}
            Ok(()) | Err(TryRecvError::Lagged(_)) => {
                info!("Interrupted - stopping publish loop");
                break;
            }
            Err(TryRecvError::Closed) => {
                warn!("Shutdown channel closed - stopping publish loop");
                break;
            }
        }

        let record = generator.next_record();
        match record.to_json_bytes() {
            Ok(payload) => match sink.submit(topic, &payload) {
                Ok(()) => summary.submitted += 1,
                Err(e) => {
                    summary.submit_failures += 1;
                    error!("Failed to enqueue message for topic {topic}: {e}");
                }
            },
            Err(e) => {
                summary.submit_failures += 1;
                error!("Failed to serialize record: {e}");
            }
        }

        std::thread::sleep(schedule.interval);
        sink.poll(schedule.poll_timeout);
    }

    info!("Closing Kafka producer");
    if let Err(e) = sink.flush(schedule.flush_timeout) {
        error!("Failed to flush Kafka producer: {e}");
    }

    info!(
        "Publish loop finished: {} submitted, {} failed to enqueue",
        summary.submitted, summary.submit_failures
    );
    summary
}
