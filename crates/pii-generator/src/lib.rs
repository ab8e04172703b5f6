//! Synthetic PII record generation.
//!
//! Every record belongs to one of a fixed set of [`Identity`] values, chosen
//! uniformly at random. Address and payment card fields are freshly generated
//! for each record by a [`FakeDataSource`] and carry no link to the identity.
//!
//! ```text
//! ┌──────────────┐   random()   ┌─────────────────┐
//! │   StdRng     │ ───────────▶ │    Identity     │──┐
//! └──────────────┘              └─────────────────┘  │
//! ┌──────────────┐  address(), credit_card_*()       ▼
//! │ FakerSource  │ ─────────────────────────────▶ PiiRecord
//! └──────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use pii_generator::RecordGenerator;
//!
//! let mut generator = RecordGenerator::seeded(42);
//! let record = generator.next_record();
//! assert!(record.email.ends_with("@yahoo.com"));
//! assert!(!record.address.contains('\n'));
//! ```

pub mod fake_source;
pub mod generator;
pub mod identity;
pub mod record;

pub use fake_source::{FakeDataSource, FakerSource};
pub use generator::{generate_record, record_for, RecordGenerator};
pub use identity::Identity;
pub use record::{CreditCard, PiiRecord};
