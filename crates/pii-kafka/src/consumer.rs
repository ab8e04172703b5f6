//! Owner filter: a consumer that only reports records belonging to the
//! authenticated SASL principal.

use crate::config::KafkaSettings;
use crate::error::{KafkaPiiError, Result};
use pii_generator::PiiRecord;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::message::Message;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// What to do with one consumed payload.
#[derive(Debug)]
pub enum FilterDecision {
    /// The record belongs to the principal.
    Owned(PiiRecord),
    /// A valid record owned by someone else.
    NotOwned,
    /// No payload at all (tombstone).
    Empty,
    /// Not a valid record.
    Malformed(serde_json::Error),
}

/// Decode `payload` and compare its owner with `principal`.
pub fn classify(payload: Option<&[u8]>, principal: &str) -> FilterDecision {
    let Some(bytes) = payload else {
        return FilterDecision::Empty;
    };
    match PiiRecord::from_json_bytes(bytes) {
        Ok(record) if record.owner_principal() == principal => FilterDecision::Owned(record),
        Ok(_) => FilterDecision::NotOwned,
        Err(e) => FilterDecision::Malformed(e),
    }
}

/// Counters reported when the filter stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSummary {
    pub consumed: u64,
    pub owned: u64,
    pub skipped: u64,
}

impl FilterSummary {
    fn record(&mut self, decision: &FilterDecision) {
        self.consumed += 1;
        match decision {
            FilterDecision::Owned(_) => self.owned += 1,
            FilterDecision::Malformed(_) | FilterDecision::Empty => self.skipped += 1,
            FilterDecision::NotOwned => {}
        }
    }
}

/// Consumer subscribed to the configured topic.
pub struct OwnerFilter {
    consumer: StreamConsumer,
    principal: String,
    topic: String,
}

impl OwnerFilter {
    pub fn new(settings: &KafkaSettings, group_id: &str, sasl_enabled: bool) -> Result<Self> {
        let consumer: StreamConsumer = settings
            .consumer_config(group_id, sasl_enabled)
            .create()?;
        consumer.subscribe(&[settings.topic.as_str()])?;

        Ok(Self {
            consumer,
            principal: settings.credentials.username.clone(),
            topic: settings.topic.clone(),
        })
    }

    /// Consume until `shutdown` fires, logging records owned by the principal.
    ///
    /// Malformed messages are logged and skipped.
    pub async fn run(&self, mut shutdown: broadcast::Receiver<()>) -> Result<FilterSummary> {
        info!(
            "Filtering topic '{}' for records owned by '{}'",
            self.topic, self.principal
        );
        let mut summary = FilterSummary::default();

        loop {
            tokio::select! {
                _ = shutdown.recv() => {
                    info!("Received shutdown signal");
                    break;
                }
                message = self.consumer.recv() => {
                    let message = match message {
                        Ok(message) => message,
                        Err(e) => {
                            warn!("Error receiving message: {e}");
                            continue;
                        }
                    };

                    let decision = classify(message.payload(), &self.principal);
                    summary.record(&decision);
                    match decision {
                        FilterDecision::Owned(record) => {
                            let json = serde_json::to_string(&record)
                                .map_err(KafkaPiiError::Serialization)?;
                            info!(
                                "Record for '{}' at offset {}: {json}",
                                self.principal,
                                message.offset()
                            );
                        }
                        FilterDecision::NotOwned => {
                            debug!("Skipping record at offset {}", message.offset());
                        }
                        FilterDecision::Empty => {
                            warn!("Skipping empty message at offset {}", message.offset());
                        }
                        FilterDecision::Malformed(e) => {
                            warn!(
                                "Skipping malformed message at offset {}: {e}",
                                message.offset()
                            );
                        }
                    }
                }
            }
        }

        info!(
            "Owner filter stopped: {} consumed, {} owned, {} skipped",
            summary.consumed, summary.owned, summary.skipped
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pii_generator::{CreditCard, Identity};

    fn payload_for(identity: Identity) -> Vec<u8> {
        let (first, last) = identity.name_parts();
        PiiRecord {
            full_name: identity.full_name().to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{first}{last}@yahoo.com"),
            ssn: identity.ssn().to_string(),
            address: "1 Road Town, ST 00000".to_string(),
            credit_card: CreditCard {
                provider: "Discover".to_string(),
                number: "6011000990139424".to_string(),
                expiration_date: "01/30".to_string(),
                security_code: "321".to_string(),
            },
        }
        .to_json_bytes()
        .unwrap()
    }

    #[test]
    fn test_owned_record() {
        let payload = payload_for(Identity::JohnHernandez);
        match classify(Some(&payload), "johnhernandez") {
            FilterDecision::Owned(record) => assert_eq!(record.ssn, "333-33-3333"),
            other => panic!("expected Owned, got {other:?}"),
        }
    }

    #[test]
    fn test_other_owner_is_skipped() {
        let payload = payload_for(Identity::BobJones);
        assert!(matches!(
            classify(Some(&payload), "alicesmith"),
            FilterDecision::NotOwned
        ));
    }

    #[test]
    fn test_malformed_and_empty() {
        assert!(matches!(
            classify(Some(b"not json"), "bobjones"),
            FilterDecision::Malformed(_)
        ));
        assert!(matches!(classify(None, "bobjones"), FilterDecision::Empty));
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = FilterSummary::default();
        let owned = payload_for(Identity::AliceSmith);
        let other = payload_for(Identity::BobJones);

        for payload in [Some(owned.as_slice()), Some(other.as_slice()), Some(b"{".as_slice()), None] {
            summary.record(&classify(payload, "alicesmith"));
        }

        assert_eq!(
            summary,
            FilterSummary {
                consumed: 4,
                owned: 1,
                skipped: 2,
            }
        );
    }
}
