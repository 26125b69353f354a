//! Null- and shape-tolerant field deserializers.
//!
//! The client only reads a few fields of each registry body. These helpers
//! keep a sparse or unexpected field from failing the whole response.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// `null` decodes as `T::default()`
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Any value that does not decode as `T` (including `null`) becomes `None`
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Maybe<T> {
        Value(T),
        Other(IgnoredAny),
    }

    Ok(match Maybe::<T>::deserialize(deserializer)? {
        Maybe::Value(value) => Some(value),
        Maybe::Other(_) => None,
    })
}

/// Like [`lenient`], falling back to `T::default()`
pub fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}
