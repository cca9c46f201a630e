// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! GraphQL documents and request bodies of the vendor API.

use serde::Serialize;

use super::ActionParameters;

/// Path of the GraphQL endpoint relative to the API base URL.
pub(super) const GRAPHQL_PATH: &str = "/nexus/v1/graphql";

/// Reads every state property the extractor understands.
pub(super) const ENDPOINT_STATE_QUERY: &str = r"query getEndpointState(
  $endpointId: String!
) {
  endpoint(id: $endpointId) {
    features {
      name
      instance
      properties {
        name
        ... on Power {
          powerStateValue
        }
        ... on Toggle {
          toggleStateValue
        }
        ... on Brightness {
          brightnessStateValue
        }
        ... on Color {
          colorStateValue {
            hue
            saturation
            brightness
          }
        }
        ... on ColorTemperature {
          colorTemperatureInKelvinStateValue
        }
        ... on Lock {
          lockState
        }
        ... on RangeValue {
          rangeValue {
            value
          }
        }
        ... on TemperatureSensor {
          value {
            value
            scale
          }
        }
        ... on ThermostatMode {
          thermostatModeValue
        }
        ... on Setpoint {
          value {
            value
            scale
          }
        }
      }
      configuration {
        ... on RangeConfiguration {
          friendlyName {
            value {
              text
            }
          }
        }
      }
    }
  }
}";

/// Invokes one feature operation on one endpoint.
pub(super) const SET_ENDPOINT_FEATURES_MUTATION: &str = r"mutation setEndpointFeatures(
  $featureControlRequests: [FeatureControlRequest!]!
) {
  setEndpointFeatures(
    setEndpointFeaturesInput: { featureControlRequests: $featureControlRequests }
  ) {
    featureControlResponses {
      endpointId
    }
    errors {
      endpointId
      code
    }
  }
}";

/// A GraphQL request body.
#[derive(Debug, Serialize)]
pub(super) struct GraphQlRequest<V> {
    pub query: &'static str,
    pub variables: V,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct EndpointStateVariables<'a> {
    pub endpoint_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SetEndpointFeaturesVariables<'a> {
    pub feature_control_requests: [FeatureControlRequest<'a>; 1],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct FeatureControlRequest<'a> {
    pub endpoint_id: &'a str,
    pub feature_name: &'static str,
    pub feature_operation_name: &'static str,
    #[serde(skip_serializing_if = "ActionParameters::is_empty")]
    pub payload: ActionParameters,
}
