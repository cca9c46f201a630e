// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport to the vendor smart home API.
//!
//! The controller only depends on the [`Transport`] trait, which reads a
//! device's raw feature list and invokes one action on one feature. Timeouts
//! and retries are the transport's own business; the controller treats every
//! failure alike.
//!
//! # Implementations
//!
//! - [`HttpTransport`]: GraphQL over HTTP (requires the `http` feature)

#[cfg(feature = "http")]
mod graphql;
#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::{HttpConfig, HttpTransport};

use std::future::Future;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::TransportError;
use crate::response::RawFeature;
use crate::types::{ActionVerb, FeatureName};

/// Payload of a feature write, such as `{"percentage": "42"}`.
///
/// # Examples
///
/// ```
/// use alexa_hap_lib::protocol::ActionParameters;
///
/// let params = ActionParameters::new().with("brightness", "42");
/// assert_eq!(params.get("brightness").and_then(|v| v.as_str()), Some("42"));
/// assert!(ActionParameters::new().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ActionParameters(Map<String, Value>);

impl ActionParameters {
    /// Creates an empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// Returns a parameter value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns `true` if the payload has no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the parameters as a JSON map.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Access to device state and actions on the vendor API.
///
/// Futures must be `Send` so the controller can refresh a device on a
/// spawned task. Implementations may use `async fn` directly.
pub trait Transport: Send + Sync {
    /// Fetches the raw feature list of an endpoint.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the request fails or the response is
    /// malformed or reports an error.
    fn fetch_device_state(
        &self,
        endpoint_id: &str,
    ) -> impl Future<Output = Result<Vec<RawFeature>, TransportError>> + Send;

    /// Invokes an action on one feature of an endpoint.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the request fails or the API rejects the
    /// action.
    fn invoke_device_action(
        &self,
        endpoint_id: &str,
        feature: FeatureName,
        action: ActionVerb,
        parameters: ActionParameters,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;
}
