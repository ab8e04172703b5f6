//! Resolved broker settings and the client configurations built from them.

use rdkafka::ClientConfig;
use std::fmt;

/// Client identifier reported to the broker.
pub const CLIENT_ID: &str = "pii_data_generator";
/// SASL over an unencrypted transport.
pub const SECURITY_PROTOCOL: &str = "sasl_plaintext";
pub const SASL_MECHANISM: &str = "PLAIN";
/// Consumer group used by the owner filter unless overridden.
pub const DEFAULT_GROUP_ID: &str = "kafka-streams-filter";

/// Username/password pair for SASL/PLAIN.
#[derive(Clone, PartialEq, Eq)]
pub struct SaslCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for SaslCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaslCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Validated connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KafkaSettings {
    pub bootstrap_servers: String,
    pub topic: String,
    pub credentials: SaslCredentials,
}

impl KafkaSettings {
    fn base_config(&self, sasl_enabled: bool) -> ClientConfig {
        let mut config = ClientConfig::new();
        config
            .set("bootstrap.servers", &self.bootstrap_servers)
            .set("client.id", CLIENT_ID);
        if sasl_enabled {
            config
                .set("security.protocol", SECURITY_PROTOCOL)
                .set("sasl.mechanism", SASL_MECHANISM)
                .set("sasl.username", &self.credentials.username)
                .set("sasl.password", &self.credentials.password);
        }
        config
    }

    /// Producer configuration. The producer always authenticates.
    pub fn producer_config(&self) -> ClientConfig {
        self.base_config(true)
    }

    /// Consumer configuration for the given group.
    ///
    /// Starts from the earliest offset when the group has nothing committed.
    /// With `sasl_enabled` false the consumer connects over plaintext without
    /// credentials; the username is still the principal records are matched
    /// against.
    pub fn consumer_config(&self, group_id: &str, sasl_enabled: bool) -> ClientConfig {
        let mut config = self.base_config(sasl_enabled);
        config
            .set("group.id", group_id)
            .set("auto.offset.reset", "earliest")
            .set("enable.auto.commit", "true")
            .set("enable.partition.eof", "false");
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> KafkaSettings {
        KafkaSettings {
            bootstrap_servers: "broker:9092".to_string(),
            topic: "pii".to_string(),
            credentials: SaslCredentials {
                username: "alicesmith".to_string(),
                password: "hunter2".to_string(),
            },
        }
    }

    #[test]
    fn test_producer_config() {
        let config = settings().producer_config();
        assert_eq!(config.get("bootstrap.servers"), Some("broker:9092"));
        assert_eq!(config.get("client.id"), Some("pii_data_generator"));
        assert_eq!(config.get("security.protocol"), Some("sasl_plaintext"));
        assert_eq!(config.get("sasl.mechanism"), Some("PLAIN"));
        assert_eq!(config.get("sasl.username"), Some("alicesmith"));
        assert_eq!(config.get("sasl.password"), Some("hunter2"));
        assert_eq!(config.get("group.id"), None);
    }

    #[test]
    fn test_consumer_config() {
        let config = settings().consumer_config(DEFAULT_GROUP_ID, true);
        assert_eq!(config.get("group.id"), Some("kafka-streams-filter"));
        assert_eq!(config.get("auto.offset.reset"), Some("earliest"));
        assert_eq!(config.get("security.protocol"), Some("sasl_plaintext"));
        assert_eq!(config.get("sasl.mechanism"), Some("PLAIN"));
    }

    #[test]
    fn test_consumer_config_without_sasl() {
        let config = settings().consumer_config(DEFAULT_GROUP_ID, false);
        assert_eq!(config.get("bootstrap.servers"), Some("broker:9092"));
        assert_eq!(config.get("group.id"), Some("kafka-streams-filter"));
        assert_eq!(config.get("security.protocol"), None);
        assert_eq!(config.get("sasl.mechanism"), None);
        assert_eq!(config.get("sasl.username"), None);
        assert_eq!(config.get("sasl.password"), None);
    }

    #[test]
    fn test_debug_hides_password() {
        let rendered = format!("{:?}", settings());
        assert!(rendered.contains("alicesmith"));
        assert!(!rendered.contains("hunter2"));
    }
}
