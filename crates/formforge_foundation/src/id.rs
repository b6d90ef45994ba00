//! Field and rule identifiers, and the generators that mint them.

use std::borrow::Borrow;
use std::fmt;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from any string.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:?})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of a field on the canvas. Unique within one canvas.
    FieldId
);

string_id!(
    /// Identifier of a conditional rule.
    RuleId
);

// =============================================================================
// Id Generation
// =============================================================================

/// Source of fresh identifiers for new fields and rules.
pub trait IdGenerator {
    /// Returns the next UUID.
    fn next_uuid(&mut self) -> Uuid;

    /// Returns a fresh field identifier.
    fn next_field_id(&mut self) -> FieldId {
        FieldId(self.next_uuid().to_string())
    }

    /// Returns a fresh rule identifier.
    fn next_rule_id(&mut self) -> RuleId {
        RuleId(self.next_uuid().to_string())
    }
}

/// Random v4 UUIDs from the operating system RNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_uuid(&mut self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Deterministic UUIDs from a seeded `ChaCha8` stream.
///
/// Two generators with the same seed produce the same sequence, which keeps
/// editing sessions reproducible in tests.
#[derive(Clone, Debug)]
pub struct SeededIds {
    rng: ChaCha8Rng,
}

impl SeededIds {
    /// Creates a generator from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl IdGenerator for SeededIds {
    fn next_uuid(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        uuid::Builder::from_random_bytes(bytes).into_uuid()
    }
}
