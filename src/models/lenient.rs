//! Forgiving field decoders for catalog rows.
//!
//! The remote table has no enforced schema, so a value of the wrong type in
//! one column must not reject the whole row. These decoders map any value
//! that doesn't fit to the field's empty state.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `None` for null, absent, or mistyped values.
pub(crate) fn option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Empty string for null or non-string values.
pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(option::<D, String>(deserializer)?.unwrap_or_default())
}
