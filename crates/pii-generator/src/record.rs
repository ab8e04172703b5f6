//! The record published for every cycle.

use serde::{Deserialize, Serialize};

/// Domain appended to every synthesized email address.
pub const EMAIL_DOMAIN: &str = "yahoo.com";

/// Payment card details, unrelated to the identity the record belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCard {
    pub provider: String,
    pub number: String,
    pub expiration_date: String,
    pub security_code: String,
}

/// A single mock PII record.
///
/// Field order matches the JSON payload consumers expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiiRecord {
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub ssn: String,
    pub address: String,
    pub credit_card: CreditCard,
}

impl PiiRecord {
    /// The SASL principal this record belongs to (`first_name` + `last_name`).
    pub fn owner_principal(&self) -> String {
        format!("{}{}", self.first_name, self.last_name)
    }

    /// Encode as the JSON message value.
    pub fn to_json_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// Decode a JSON message value.
    pub fn from_json_bytes(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}

/// `{first}{last}@yahoo.com`, with no separator or case normalization.
pub fn email_for(first_name: &str, last_name: &str) -> String {
    format!("{first_name}{last_name}@{EMAIL_DOMAIN}")
}
