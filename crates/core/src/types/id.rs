//! Newtype IDs for catalog entries.
//!
//! The catalog service hands out opaque identifiers (Mongo-style hex strings
//! in practice, but older records carry plain numbers). They are carried as
//! non-empty strings so the cart never has to care which one it got.

use serde::{Deserialize, Deserializer};

/// Errors that can occur when parsing an ID.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The input is empty or whitespace only.
    #[error("id cannot be empty")]
    Empty,
}

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize` as a bare string
/// - `Deserialize` from either a JSON string or a JSON number
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `parse()`, `as_str()`, `into_inner()`
///
/// # Example
///
/// ```rust
/// # use urvann_core::define_string_id;
/// define_string_id!(PlantId);
/// define_string_id!(CategoryId);
///
/// let plant = PlantId::parse("p1").unwrap();
/// assert_eq!(plant.as_str(), "p1");
///
/// // These are different types, so this won't compile:
/// // let _: CategoryId = plant;
/// ```
#[macro_export]
macro_rules! define_string_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, ::serde::Serialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Parse an ID, rejecting empty or whitespace-only input.
            ///
            /// # Errors
            ///
            /// Returns [`IdError::Empty`]($crate::IdError::Empty) if the
            /// trimmed input is empty.
            pub fn parse(id: &str) -> Result<Self, $crate::IdError> {
                let id = id.trim();
                if id.is_empty() {
                    return Err($crate::IdError::Empty);
                }
                Ok(Self(id.to_owned()))
            }

            /// Build an ID of the form `<prefix>-<suffix>`, for ids minted
            /// locally rather than received from the catalog.
            #[must_use]
            pub fn with_prefix(prefix: &str, suffix: impl ::core::fmt::Display) -> Self {
                Self(format!("{prefix}-{suffix}"))
            }

            /// Returns the ID as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the ID and returns its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let raw = $crate::types::id::deserialize_raw_id(deserializer)?;
                Self::parse(&raw).map_err(::serde::de::Error::custom)
            }
        }
    };
}

define_string_id!(ItemId);

/// Either shape an ID may arrive in.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

/// Deserialize a string or integer ID into its string form.
///
/// Used by [`define_string_id!`]; not part of the public API.
#[doc(hidden)]
pub fn deserialize_raw_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Unsigned(n) => n.to_string(),
        RawId::Signed(n) => n.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_whitespace() {
        let id = ItemId::parse("  p1 ").unwrap();
        assert_eq!(id.as_str(), "p1");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(ItemId::parse(""), Err(IdError::Empty));
        assert_eq!(ItemId::parse("   "), Err(IdError::Empty));
    }

    #[test]
    fn test_deserialize_string_and_number() {
        let from_str: ItemId = serde_json::from_str("\"64f1c0\"").unwrap();
        let from_num: ItemId = serde_json::from_str("42").unwrap();
        assert_eq!(from_str.as_str(), "64f1c0");
        assert_eq!(from_num.as_str(), "42");
    }

    #[test]
    fn test_deserialize_rejects_empty_and_null() {
        assert!(serde_json::from_str::<ItemId>("\"\"").is_err());
        assert!(serde_json::from_str::<ItemId>("null").is_err());
    }

    #[test]
    fn test_with_prefix() {
        assert_eq!(ItemId::with_prefix("temp", 7).as_str(), "temp-7");
    }

    #[test]
    fn test_serialize_transparent() {
        let id = ItemId::parse("p1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"p1\"");
    }
}
