//! Record generation.

use crate::fake_source::{FakeDataSource, FakerSource};
use crate::identity::Identity;
use crate::record::{email_for, CreditCard, PiiRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Build one record for a uniformly chosen identity.
///
/// The identity is drawn from `rng`; every other field comes from `source`.
/// Newlines in the address are replaced with single spaces.
pub fn generate_record<R, S>(rng: &mut R, source: &mut S) -> PiiRecord
where
    R: Rng + ?Sized,
    S: FakeDataSource + ?Sized,
{
    let identity: Identity = rng.random();
    record_for(identity, source)
}

/// Build a record for a specific identity.
pub fn record_for<S>(identity: Identity, source: &mut S) -> PiiRecord
where
    S: FakeDataSource + ?Sized,
{
    let (first_name, last_name) = identity.name_parts();

    PiiRecord {
        full_name: identity.full_name().to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: email_for(first_name, last_name),
        ssn: identity.ssn().to_string(),
        address: source.address().replace('\n', " "),
        credit_card: CreditCard {
            provider: source.credit_card_provider(),
            number: source.credit_card_number(),
            expiration_date: source.credit_card_expire(),
            security_code: source.credit_card_security_code(),
        },
    }
}

/// Stateful generator owning its RNG and fake-data source.
pub struct RecordGenerator<S = FakerSource> {
    rng: StdRng,
    source: S,
    generated: u64,
}

impl RecordGenerator<FakerSource> {
    /// Generator whose output is fully determined by `seed`.
    pub fn seeded(seed: u64) -> Self {
        // Keep the identity and faker streams independent.
        let faker_seed = seed.wrapping_add(0x9E3779B97F4A7C15);
        Self::with_source(StdRng::seed_from_u64(seed), FakerSource::new(faker_seed))
    }

    /// Generator seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::with_source(StdRng::from_os_rng(), FakerSource::from_entropy())
    }
}

impl<S: FakeDataSource> RecordGenerator<S> {
    pub fn with_source(rng: StdRng, source: S) -> Self {
        Self {
            rng,
            source,
            generated: 0,
        }
    }

    /// Generate the next record.
    pub fn next_record(&mut self) -> PiiRecord {
        self.generated += 1;
        generate_record(&mut self.rng, &mut self.source)
    }

    /// Number of records generated so far.
    pub fn generated(&self) -> u64 {
        self.generated
    }
}

impl<S: FakeDataSource> Iterator for RecordGenerator<S> {
    type Item = PiiRecord;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_record())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    /// Returns the same canned values on every call.
    struct FixedSource;

    impl FakeDataSource for FixedSource {
        fn address(&mut self) -> String {
            "123 Main St\nAnytown".to_string()
        }
        fn credit_card_provider(&mut self) -> String {
            "Visa".to_string()
        }
        fn credit_card_number(&mut self) -> String {
            "4111111111111111".to_string()
        }
        fn credit_card_expire(&mut self) -> String {
            "04/29".to_string()
        }
        fn credit_card_security_code(&mut self) -> String {
            "123".to_string()
        }
    }

    #[test]
    fn test_bob_jones_record() {
        let record = record_for(Identity::BobJones, &mut FixedSource);

        assert_eq!(
            record,
            PiiRecord {
                full_name: "bob jones".to_string(),
                first_name: "bob".to_string(),
                last_name: "jones".to_string(),
                email: "bobjones@yahoo.com".to_string(),
                ssn: "111-11-1111".to_string(),
                address: "123 Main St Anytown".to_string(),
                credit_card: CreditCard {
                    provider: "Visa".to_string(),
                    number: "4111111111111111".to_string(),
                    expiration_date: "04/29".to_string(),
                    security_code: "123".to_string(),
                },
            }
        );
    }

    #[test]
    fn test_generated_records_match_an_identity() {
        let mut generator = RecordGenerator::seeded(42);

        for record in generator.by_ref().take(500) {
            let identity = Identity::ALL
                .into_iter()
                .find(|i| i.full_name() == record.full_name)
                .unwrap_or_else(|| panic!("unknown identity {}", record.full_name));

            assert_eq!(
                format!("{} {}", record.first_name, record.last_name),
                identity.full_name()
            );
            assert_eq!(record.ssn, identity.ssn());
            assert_eq!(
                record.email,
                format!("{}{}@yahoo.com", record.first_name, record.last_name)
            );
            assert!(!record.address.contains('\n'), "{}", record.address);
        }

        assert_eq!(generator.generated(), 500);
    }

    #[test]
    fn test_identity_frequency_is_uniform() {
        let mut rng = StdRng::seed_from_u64(1234);
        let draws = 10_000;
        let mut counts: HashMap<String, usize> = HashMap::new();

        for _ in 0..draws {
            let record = generate_record(&mut rng, &mut FixedSource);
            *counts.entry(record.full_name).or_default() += 1;
        }

        assert_eq!(counts.len(), 3);
        for (name, count) in counts {
            let frequency = count as f64 / draws as f64;
            assert!(
                (frequency - 1.0 / 3.0).abs() < 0.05,
                "{name} drawn with frequency {frequency}"
            );
        }
    }

    #[test]
    fn test_deterministic_generation() {
        let mut gen1 = RecordGenerator::seeded(42);
        let mut gen2 = RecordGenerator::seeded(42);

        // Expiry depends on the current month, which is shared by both.
        for _ in 0..10 {
            assert_eq!(gen1.next_record(), gen2.next_record());
        }
    }

    #[test]
    fn test_card_is_independent_of_identity() {
        let mut generator = RecordGenerator::seeded(9);
        let numbers: Vec<String> = generator
            .by_ref()
            .filter(|r| r.first_name == "bob")
            .take(5)
            .map(|r| r.credit_card.number)
            .collect();

        let distinct: std::collections::HashSet<_> = numbers.iter().collect();
        assert!(distinct.len() > 1, "bob always got {numbers:?}");
    }
}
