//! Identifier newtypes used across layout migrations.
//!
//! Source rows, migrated entities and their revisions are all numbered, but
//! they live in different id spaces. Wrapping each in its own type keeps a
//! paragraph id from being handed to a block lookup by accident.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Create a new identifier from its numeric value.
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the numeric value of this identifier.
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id! {
    /// Identifier of an item in the legacy source (e.g. a paragraph id).
    SourceId
}

numeric_id! {
    /// Identifier of an entity created by an earlier migration (e.g. a block id).
    EntityId
}

numeric_id! {
    /// Identifier of a specific revision of a migrated entity.
    RevisionId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_numeric() {
        assert_eq!(SourceId::new(42).to_string(), "42");
        assert_eq!(EntityId::from(7).to_string(), "7");
        assert_eq!(RevisionId::new(0).to_string(), "0");
    }

    #[test]
    fn test_serde_transparent() {
        let id: SourceId = serde_json::from_str("12").expect("Failed to parse id");
        assert_eq!(id.get(), 12);
        assert_eq!(serde_json::to_string(&RevisionId::new(3)).unwrap(), "3");
    }
}
