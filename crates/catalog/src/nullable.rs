//! Field helpers for records whose attributes the backend may omit or null
//! out (field selection, drafts with unset attributes).

use serde::{Deserialize, Deserializer};

/// Reads `null` as `T::default()`. Pair with `#[serde(default)]` so a missing
/// key is accepted too.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
