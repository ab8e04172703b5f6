//! The fixed set of identities that generated records belong to.
//!
//! These mirror the SASL users provisioned on the target cluster, so every
//! record can be traced back to a principal a downstream consumer knows about.

use rand::distr::{Distribution, StandardUniform};
use rand::Rng;
use std::fmt;

/// One of the three identities a record can be generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Identity {
    BobJones,
    AliceSmith,
    JohnHernandez,
}

impl Identity {
    /// Every identity, in declaration order.
    pub const ALL: [Identity; 3] = [
        Identity::BobJones,
        Identity::AliceSmith,
        Identity::JohnHernandez,
    ];

    /// Full name as two space-separated tokens (first, last).
    pub const fn full_name(self) -> &'static str {
        match self {
            Identity::BobJones => "bob jones",
            Identity::AliceSmith => "alice smith",
            Identity::JohnHernandez => "john hernandez",
        }
    }

    /// Social security number in `NNN-NN-NNNN` form.
    pub const fn ssn(self) -> &'static str {
        match self {
            Identity::BobJones => "111-11-1111",
            Identity::AliceSmith => "222-22-2222",
            Identity::JohnHernandez => "333-33-3333",
        }
    }

    /// First and last name tokens of [`Identity::full_name`].
    pub fn name_parts(self) -> (&'static str, &'static str) {
        let mut tokens = self.full_name().split_whitespace();
        let first = tokens.next().unwrap_or_default();
        let last = tokens.next().unwrap_or_default();
        (first, last)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.full_name())
    }
}

/// Uniform choice over [`Identity::ALL`], with replacement.
impl Distribution<Identity> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Identity {
        match rng.random_range(0..3u8) {
            0 => Identity::BobJones,
            1 => Identity::AliceSmith,
            _ => Identity::JohnHernandez,
        }
    }
}
