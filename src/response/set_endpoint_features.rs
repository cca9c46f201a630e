// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response of the `setEndpointFeatures` mutation.

use serde::Deserialize;

use super::{GraphQlError, null_as_default};
use crate::error::TransportError;

/// Response of a feature write.
///
/// A write succeeds only when neither the GraphQL envelope nor the
/// mutation payload report an error.
///
/// # Examples
///
/// ```
/// use alexa_hap_lib::response::SetEndpointFeaturesResponse;
///
/// let json = r#"{"data":{"setEndpointFeatures":{
///     "featureControlResponses":[{"endpointId":"amzn1.alexa.endpoint.1"}],
///     "errors":null
/// }}}"#;
/// let response: SetEndpointFeaturesResponse = serde_json::from_str(json).unwrap();
/// assert!(response.into_result().is_ok());
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetEndpointFeaturesResponse {
    #[serde(default)]
    data: Option<SetEndpointFeaturesData>,
    #[serde(default, deserialize_with = "null_as_default")]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetEndpointFeaturesData {
    #[serde(default)]
    set_endpoint_features: Option<SetEndpointFeaturesPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetEndpointFeaturesPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    feature_control_responses: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    errors: Vec<FeatureControlError>,
}

/// A per-endpoint error reported by the mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureControlError {
    /// The endpoint the error refers to.
    #[serde(default)]
    pub endpoint_id: Option<String>,
    /// Error code.
    #[serde(default)]
    pub code: Option<String>,
}

impl SetEndpointFeaturesResponse {
    /// Checks whether the write was accepted.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::RequestUnsuccessful` with the first reported
    /// error code, or `TransportError::InvalidResponse` if the payload is
    /// missing or acknowledges nothing.
    pub fn into_result(self) -> Result<(), TransportError> {
        if let Some(error) = self.errors.first() {
            return Err(TransportError::RequestUnsuccessful { code: error.code() });
        }
        let payload = self
            .data
            .and_then(|data| data.set_endpoint_features)
            .ok_or_else(|| {
                TransportError::InvalidResponse("missing setEndpointFeatures payload".to_string())
            })?;

        if let Some(error) = payload.errors.first() {
            return Err(TransportError::RequestUnsuccessful {
                code: error.code.clone().unwrap_or_else(|| "UNKNOWN".to_string()),
            });
        }
        if payload.feature_control_responses.is_empty() {
            return Err(TransportError::InvalidResponse(
                "no feature control response".to_string(),
            ));
        }
        Ok(())
    }
}
