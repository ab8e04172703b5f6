//! Kafka plumbing for pii-datagen.
//!
//! - [`PiiProducer`]: SASL/PLAIN `BaseProducer` whose delivery reports are
//!   logged by [`DeliveryLogger`] while the caller polls.
//! - [`OwnerFilter`]: `StreamConsumer` that reports only the records owned by
//!   the authenticated principal.
//! - [`KafkaArgs`]: clap arguments with environment fallbacks, resolved into
//!   [`KafkaSettings`].

pub mod args;
pub mod config;
pub mod consumer;
pub mod delivery;
pub mod error;
pub mod producer;

pub use args::KafkaArgs;
pub use config::{KafkaSettings, SaslCredentials};
pub use consumer::{classify, FilterDecision, FilterSummary, OwnerFilter};
pub use delivery::{DeliveryError, DeliveryLogger, DeliveryOutcome};
pub use error::{ConfigError, KafkaPiiError, Result};
pub use producer::{MessageSink, PiiProducer};
