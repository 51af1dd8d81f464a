//! Type-safe identifier wrappers around [`String`].
//!
//! Catalog entries are keyed by stable string ids that are written into the
//! persisted record, so the ids must never change between releases. Wrapping
//! them in newtypes prevents a food id from being passed where a pet id is
//! expected.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around [`String`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Create an identifier from any string-like value.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

define_id! {
    /// Stable identifier of a food item in the food catalog (e.g. `onigiri`).
    FoodId
}

define_id! {
    /// Stable identifier of a pet in the pet catalog (e.g. `pet_000`).
    PetId
}

define_id! {
    /// Calendar-local date formatted as `YYYYMMDD`.
    ///
    /// The day key is the sole signal for "is this a new day" comparisons.
    /// Build one with [`DayKey::from_date`] or
    /// [`Calendar::day_key`](crate::Calendar::day_key) rather than by hand.
    DayKey
}

impl DayKey {
    /// Format a calendar date as a `YYYYMMDD` day key.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format("%Y%m%d").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_key_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 3);
        assert!(date.is_some());
        let key = date.map(DayKey::from_date);
        assert_eq!(key, Some(DayKey::from("20260203")));
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let json = serde_json::to_string(&FoodId::from("onigiri")).ok();
        assert_eq!(json.as_deref(), Some("\"onigiri\""));
        let back: Option<PetId> = serde_json::from_str("\"pet_003\"").ok();
        assert_eq!(back, Some(PetId::from("pet_003")));
    }

    #[test]
    fn display_matches_inner_value() {
        assert_eq!(PetId::new("pet_001").to_string(), "pet_001");
        assert_eq!(FoodId::new("coke").as_str(), "coke");
    }
}
