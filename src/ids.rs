//! Identifiers

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an identifier issued by the catalog.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the raw identifier.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id! {
    /// Product Id
    ProductId
}

string_id! {
    /// Restaurant Id
    RestaurantId
}

/// Order Id
///
/// Generated client side when an order is placed, so a snapshot is identifiable before the
/// submission collaborator has assigned its own reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Generate a new, time ordered order id.
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    /// Wrap an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// The underlying UUID.
    #[must_use]
    pub const fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for OrderId {
    fn from(value: Uuid) -> Self {
        Self::from_uuid(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_ids_compare_by_value() {
        assert_eq!(ProductId::from("p1"), ProductId::new(String::from("p1")));
        assert_ne!(ProductId::from("p1"), ProductId::from("P1"));
    }

    #[test]
    fn string_ids_display_raw_value() {
        assert_eq!(RestaurantId::from("64f0c2").to_string(), "64f0c2");
    }

    #[test]
    fn generated_order_ids_are_distinct() {
        assert_ne!(OrderId::generate(), OrderId::generate());
    }
}
