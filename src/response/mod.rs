// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wire model of the vendor GraphQL responses.
//!
//! The upstream payload is loosely typed: every property object carries all
//! possible value fields, most of them `null`, and the same logical quantity
//! can appear under different feature names. These types deserialize
//! leniently and leave interpretation to the
//! [`extractor`](crate::extractor).

mod endpoint_state;
mod set_endpoint_features;

pub use endpoint_state::{EndpointStateResponse, RawFeature, RawProperty, property_keys};
pub use set_endpoint_features::{FeatureControlError, SetEndpointFeaturesResponse};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// An entry of a GraphQL `errors` array.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GraphQlError {
    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,
    /// Vendor extensions, usually carrying a `code`.
    #[serde(default)]
    pub extensions: Option<serde_json::Value>,
}

impl GraphQlError {
    /// Returns the most specific error code available.
    #[must_use]
    pub fn code(&self) -> String {
        self.extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .and_then(serde_json::Value::as_str)
            .or(self.message.as_deref())
            .unwrap_or("UNKNOWN")
            .to_string()
    }
}

/// Deserializes `null` as the type's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserializes a sequence, skipping the elements that do not parse.
///
/// `null` or a non-array value yields an empty vector.
pub(crate) fn skip_malformed<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Some(serde_json::Value::Array(items)) =
        Option::<serde_json::Value>::deserialize(deserializer)?
    else {
        return Ok(Vec::new());
    };
    let total = items.len();
    let parsed: Vec<T> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    if parsed.len() < total {
        tracing::trace!(skipped = total - parsed.len(), "Skipped malformed entries");
    }
    Ok(parsed)
}
