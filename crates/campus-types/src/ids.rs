//! Strongly typed entity identities.
//!
//! Identities are allocated by the store and are always positive. The value
//! `0` is what an absent payload field decodes to, and domain validation
//! rejects it as "unset".

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
            Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw identity value.
            #[must_use]
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Returns the raw identity value.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }

            /// Returns `true` when the identity is the unset value `0`.
            #[must_use]
            pub const fn is_unset(self) -> bool {
                self.0 == 0
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(formatter, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identity of a school.
    SchoolId
);
entity_id!(
    /// Identity of a person (teacher or student).
    PersonId
);
entity_id!(
    /// Identity of a class.
    ClassId
);
