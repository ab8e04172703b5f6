//! pii-datagen
//!
//! Publishes mock PII records to a Kafka topic at a fixed interval, for
//! exercising downstream masking and compliance pipelines.
//!
//! # Components
//!
//! - `produce`: the publish loop (generate, serialize, submit, sleep, poll)
//! - `consume`: owner filter that logs the records belonging to the
//!   authenticated SASL user
//! - `shutdown`: Ctrl+C handling shared by both
//!
//! Record generation lives in the `pii-generator` crate and Kafka plumbing in
//! `pii-kafka`.

pub mod config;
pub mod consume;
pub mod produce;
pub mod shutdown;

pub use consume::{consume, ConsumeArgs};
pub use produce::{produce, run_publish_loop, ProduceArgs, PublishSchedule, PublishSummary};
