//! Sources of random non-identity values.

use chrono::{Datelike, NaiveDate, Utc};
use fake::faker::address::en::{BuildingNumber, CityName, StateAbbr, StreetName, ZipCode};
use fake::faker::creditcard::en::CreditCardNumber;
use fake::Fake;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Card provider names, as reported by common fake-data libraries.
pub const CARD_PROVIDERS: [&str; 10] = [
    "VISA 16 digit",
    "VISA 13 digit",
    "VISA 19 digit",
    "Mastercard",
    "American Express",
    "Discover",
    "JCB 16 digit",
    "JCB 15 digit",
    "Diners Club / Carte Blanche",
    "Maestro",
];

/// How far ahead a generated expiry date may be.
const MAX_EXPIRY_MONTHS: i32 = 120;

/// Provides the randomly generated parts of a record.
///
/// Implementations are free to return multi-line addresses; the generator
/// flattens them.
pub trait FakeDataSource {
    fn address(&mut self) -> String;
    fn credit_card_provider(&mut self) -> String;
    fn credit_card_number(&mut self) -> String;
    fn credit_card_expire(&mut self) -> String;
    fn credit_card_security_code(&mut self) -> String;
}

/// [`FakeDataSource`] backed by the `fake` crate and a seeded RNG.
pub struct FakerSource {
    rng: StdRng,
    reference_date: Option<NaiveDate>,
}

impl FakerSource {
    /// Create a source whose output is fully determined by `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            reference_date: None,
        }
    }

    /// Create a source seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            reference_date: None,
        }
    }

    /// Pin the date expiry dates are computed from (defaults to today, UTC).
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Utc::now().date_naive())
    }
}

impl FakeDataSource for FakerSource {
    fn address(&mut self) -> String {
        let building: String = BuildingNumber().fake_with_rng(&mut self.rng);
        let street: String = StreetName().fake_with_rng(&mut self.rng);
        let city: String = CityName().fake_with_rng(&mut self.rng);
        let state: String = StateAbbr().fake_with_rng(&mut self.rng);
        let zip: String = ZipCode().fake_with_rng(&mut self.rng);
        format!("{building} {street}\n{city}, {state} {zip}")
    }

    fn credit_card_provider(&mut self) -> String {
        let idx = self.rng.random_range(0..CARD_PROVIDERS.len());
        CARD_PROVIDERS[idx].to_string()
    }

    fn credit_card_number(&mut self) -> String {
        CreditCardNumber().fake_with_rng(&mut self.rng)
    }

    /// `MM/YY`, from this month up to ten years ahead.
    fn credit_card_expire(&mut self) -> String {
        let today = self.today();
        let months_ahead = self.rng.random_range(0..=MAX_EXPIRY_MONTHS);
        let total = today.year() * 12 + today.month0() as i32 + months_ahead;
        let (year, month) = (total / 12, total % 12 + 1);
        format!("{month:02}/{:02}", year % 100)
    }

    fn credit_card_security_code(&mut self) -> String {
        format!("{:03}", self.rng.random_range(0..1000))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> FakerSource {
        FakerSource::new(42).with_reference_date(NaiveDate::from_ymd_opt(2026, 11, 3).unwrap())
    }

    #[test]
    fn test_address_is_two_lines() {
        let mut source = source();
        for _ in 0..20 {
            let address = source.address();
            assert_eq!(address.lines().count(), 2, "unexpected address {address:?}");
        }
    }

    #[test]
    fn test_provider_from_known_list() {
        let mut source = source();
        for _ in 0..50 {
            let provider = source.credit_card_provider();
            assert!(CARD_PROVIDERS.contains(&provider.as_str()));
        }
    }

    #[test]
    fn test_card_number_is_digits() {
        let mut source = source();
        let number = source.credit_card_number();
        assert!(number.chars().filter(char::is_ascii_digit).count() >= 12, "{number}");
        assert!(
            number.chars().all(|c| c.is_ascii_digit() || c == '-' || c == ' '),
            "{number}"
        );
    }

    #[test]
    fn test_expiry_within_ten_years() {
        let mut source = source();
        for _ in 0..200 {
            let expiry = source.credit_card_expire();
            let (month, year) = expiry.split_once('/').unwrap();
            let month: u32 = month.parse().unwrap();
            let year: i32 = year.parse().unwrap();
            assert!((1..=12).contains(&month), "{expiry}");

            // Reference is 11/26, so anything between 11/26 and 11/36.
            let offset = (year - 26) * 12 + month as i32 - 11;
            assert!((0..=MAX_EXPIRY_MONTHS).contains(&offset), "{expiry}");
        }
    }

    #[test]
    fn test_security_code_is_three_digits() {
        let mut source = source();
        for _ in 0..100 {
            let code = source.credit_card_security_code();
            assert_eq!(code.len(), 3);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_same_seed_same_values() {
        let mut a = source();
        let mut b = source();
        assert_eq!(a.address(), b.address());
        assert_eq!(a.credit_card_number(), b.credit_card_number());
        assert_eq!(a.credit_card_expire(), b.credit_card_expire());
    }
}
