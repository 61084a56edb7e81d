//! Domain model structs and form DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` form DTO used for both create and
//!   full-replace update (the API never applies partial patches)
//! - Joined read models where list/detail views need display references

pub mod deliverable;
pub mod invoice;
pub mod milestone;
pub mod project;
pub mod user;

/// Serde helpers normalizing form input before validation.
///
/// Browser forms submit empty strings for untouched optional fields; every
/// optional field is normalized to `None` here so mutation logic never sees
/// an empty-string sentinel.
pub(crate) mod de {
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::de::{DeserializeOwned, Error};
    use serde::{Deserialize, Deserializer};

    /// `Option<String>` where `""` (or whitespace-only) means absent.
    pub fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.filter(|s| !s.trim().is_empty()))
    }

    /// `Option<T>` accepting the typed value, its string form, or a blank
    /// string (treated as absent). Covers dates, decimals, and ids coming
    /// from form payloads.
    pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + FromStr,
        T::Err: Display,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw<T> {
            Typed(T),
            Text(String),
        }

        match Option::<Raw<T>>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Raw::Typed(value)) => Ok(Some(value)),
            Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
            Some(Raw::Text(s)) => s.trim().parse::<T>().map(Some).map_err(Error::custom),
        }
    }
}
