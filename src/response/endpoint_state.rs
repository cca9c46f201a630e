// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Endpoint state query response.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::{GraphQlError, null_as_default, skip_malformed};
use crate::error::TransportError;
use crate::types::{ColorValue, Measurement, StateValue};

/// Property value keys used by the vendor.
pub mod property_keys {
    /// Light brightness number.
    pub const BRIGHTNESS: &str = "brightnessStateValue";
    /// `{hue, saturation, brightness}` object.
    pub const COLOR: &str = "colorStateValue";
    /// Color temperature number in Kelvin.
    pub const COLOR_TEMPERATURE: &str = "colorTemperatureInKelvinStateValue";
    /// Lock state string.
    pub const LOCK: &str = "lockState";
    /// Power state string.
    pub const POWER: &str = "powerStateValue";
    /// Toggle state string.
    pub const TOGGLE: &str = "toggleStateValue";
    /// `{value, scale}` reading.
    pub const VALUE: &str = "value";
    /// `{value}` object of a range control.
    pub const RANGE: &str = "rangeValue";
    /// Thermostat mode string.
    pub const THERMOSTAT_MODE: &str = "thermostatModeValue";
}

/// Response of the endpoint state query.
///
/// # Examples
///
/// ```
/// use alexa_hap_lib::response::EndpointStateResponse;
///
/// let json = r#"{"data":{"endpoint":{"features":[
///     {"name":"power","instance":null,"properties":[{"name":"powerState","powerStateValue":"ON"}]}
/// ]}}}"#;
/// let response: EndpointStateResponse = serde_json::from_str(json).unwrap();
/// let features = response.into_features().unwrap();
/// assert_eq!(features[0].name, "power");
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EndpointStateResponse {
    /// Query result, absent when the query failed.
    #[serde(default)]
    pub data: Option<EndpointStateData>,
    /// GraphQL errors.
    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: Vec<GraphQlError>,
}

/// The `data` member of [`EndpointStateResponse`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EndpointStateData {
    /// The queried endpoint, absent when unknown.
    #[serde(default)]
    pub endpoint: Option<EndpointFeatures>,
}

/// Feature list of one endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EndpointFeatures {
    /// Reported features. Entries that do not parse are skipped.
    #[serde(default, deserialize_with = "skip_malformed")]
    pub features: Vec<RawFeature>,
}

impl EndpointStateResponse {
    /// Unwraps the feature list.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::RequestUnsuccessful` if the response carries
    /// GraphQL errors, or `TransportError::InvalidResponse` if it has no
    /// endpoint data.
    pub fn into_features(self) -> Result<Vec<RawFeature>, TransportError> {
        if let Some(error) = self.errors.first() {
            return Err(TransportError::RequestUnsuccessful { code: error.code() });
        }
        self.data
            .and_then(|data| data.endpoint)
            .map(|endpoint| endpoint.features)
            .ok_or_else(|| TransportError::InvalidResponse("missing endpoint data".to_string()))
    }
}

/// One vendor feature with its properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFeature {
    /// Vendor feature name, such as `power` or `range`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Instance identifier of multi-instance features.
    #[serde(default, deserialize_with = "lenient_string")]
    pub instance: Option<String>,
    /// Reported properties. Entries that do not parse are skipped.
    #[serde(default, deserialize_with = "skip_malformed")]
    pub properties: Vec<RawProperty>,
    /// Feature configuration, carrying the label of range controls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<Value>,
}

impl RawFeature {
    /// Creates a feature without properties.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the instance identifier.
    #[must_use]
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    /// Appends a property.
    #[must_use]
    pub fn with_property(mut self, property: RawProperty) -> Self {
        self.properties.push(property);
        self
    }

    /// Sets the human-readable label of a range control.
    #[must_use]
    pub fn with_range_label(mut self, label: impl Into<String>) -> Self {
        self.configuration = Some(serde_json::json!({
            "friendlyName": { "value": { "text": label.into() } }
        }));
        self
    }

    /// Returns the label from `configuration.friendlyName.value.text`.
    #[must_use]
    pub fn range_label(&self) -> Option<&str> {
        self.configuration
            .as_ref()?
            .pointer("/friendlyName/value/text")?
            .as_str()
    }

    /// Splits a multi-property feature into one feature per property.
    ///
    /// Features with zero or one property are returned unchanged.
    #[must_use]
    pub fn split_properties(&self) -> Vec<Self> {
        if self.properties.len() <= 1 {
            return vec![self.clone()];
        }
        self.properties
            .iter()
            .map(|property| Self {
                properties: vec![property.clone()],
                ..self.clone()
            })
            .collect()
    }
}

/// One property of a feature.
///
/// Every known value field is kept in [`values`](Self::values) as raw JSON;
/// the typed accessors treat `null` and mistyped fields as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawProperty {
    /// Property identifier, such as `powerState` or `thermostatMode`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// All other fields.
    #[serde(flatten)]
    pub values: Map<String, Value>,
}

impl RawProperty {
    /// Creates a named property with no values.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            values: Map::new(),
        }
    }

    /// Adds a raw value field.
    #[must_use]
    pub fn with_value(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    /// Returns a finite number field.
    #[must_use]
    pub fn number(&self, key: &str) -> Option<f64> {
        self.values
            .get(key)?
            .as_f64()
            .filter(|value| value.is_finite())
    }

    /// Returns a string field.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        self.values.get(key)?.as_str()
    }

    /// Returns the `{hue, saturation, brightness}` color field.
    #[must_use]
    pub fn color(&self) -> Option<ColorValue> {
        self.typed(property_keys::COLOR)
    }

    /// Returns the `{value, scale}` reading field.
    #[must_use]
    pub fn measurement(&self) -> Option<Measurement> {
        self.typed(property_keys::VALUE)
    }

    /// Returns `rangeValue.value`.
    #[must_use]
    pub fn range_value(&self) -> Option<f64> {
        self.values
            .get(property_keys::RANGE)?
            .get("value")?
            .as_f64()
            .filter(|value| value.is_finite())
    }

    /// Returns any non-null field as a [`StateValue`].
    #[must_use]
    pub fn state_value(&self, key: &str) -> Option<StateValue> {
        self.typed(key)
    }

    fn typed<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.values.get(key)? {
            Value::Null => None,
            value => serde_json::from_value(value.clone()).ok(),
        }
    }
}

/// Accepts a string or a number, treating anything else as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RANGE_FEATURE: &str = r#"{
        "name": "range",
        "instance": "9",
        "operations": null,
        "properties": [{
            "name": "rangeValue",
            "rangeValue": { "value": 50 },
            "value": null,
            "toggleStateValue": null,
            "powerStateValue": null,
            "brightnessStateValue": null,
            "colorStateValue": null,
            "colorTemperatureInKelvinStateValue": null,
            "lockState": null,
            "thermostatModeValue": null
        }],
        "configuration": { "friendlyName": { "value": { "text": "Indoor Air Quality" } } }
    }"#;

    #[test]
    fn parse_range_feature_with_null_fields() {
        let feature: RawFeature = serde_json::from_str(RANGE_FEATURE).unwrap();

        assert_eq!(feature.name, "range");
        assert_eq!(feature.instance.as_deref(), Some("9"));
        assert_eq!(feature.range_label(), Some("Indoor Air Quality"));

        let property = &feature.properties[0];
        assert_eq!(property.name.as_deref(), Some("rangeValue"));
        assert_eq!(property.range_value(), Some(50.0));
        assert_eq!(property.number(property_keys::BRIGHTNESS), None);
        assert_eq!(property.text(property_keys::POWER), None);
        assert!(property.measurement().is_none());
    }

    #[test]
    fn malformed_entries_do_not_discard_valid_features() {
        let response: EndpointStateResponse = serde_json::from_str(
            r#"{"data":{"endpoint":{"features":[
                {"name":"power","properties":[{"name":"powerState","powerStateValue":"ON"}]},
                {"name":"brightness","properties":[null, 42]},
                "garbage",
                {"name":17}
            ]}}}"#,
        )
        .unwrap();

        let features = response.into_features().unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].properties[0].text(property_keys::POWER), Some("ON"));
        assert_eq!(features[1].name, "brightness");
        assert!(features[1].properties.is_empty());
    }

    #[test]
    fn numeric_instance_becomes_string() {
        let feature: RawFeature =
            serde_json::from_str(r#"{"name":"range","instance":4,"properties":null}"#).unwrap();
        assert_eq!(feature.instance.as_deref(), Some("4"));
        assert!(feature.properties.is_empty());
    }

    #[test]
    fn mistyped_fields_are_absent() {
        let property = RawProperty::new("brightness")
            .with_value(property_keys::BRIGHTNESS, "bright")
            .with_value(property_keys::COLOR, serde_json::json!({ "hue": "red" }));
        assert_eq!(property.number(property_keys::BRIGHTNESS), None);
        assert_eq!(property.color(), None);
    }

    #[test]
    fn split_multi_property_feature() {
        let feature = RawFeature::new("thermostat")
            .with_property(RawProperty::new("thermostatMode"))
            .with_property(RawProperty::new("targetSetpoint"));

        let split = feature.split_properties();
        assert_eq!(split.len(), 2);
        assert_eq!(split[0].properties[0].name.as_deref(), Some("thermostatMode"));
        assert_eq!(split[1].properties[0].name.as_deref(), Some("targetSetpoint"));
        assert!(split.iter().all(|f| f.name == "thermostat"));
    }

    #[test]
    fn into_features_reports_graphql_errors() {
        let response: EndpointStateResponse = serde_json::from_str(
            r#"{"errors":[{"message":"GraphQL error","extensions":{"code":"TestError"}}]}"#,
        )
        .unwrap();
        assert!(matches!(
            response.into_features(),
            Err(TransportError::RequestUnsuccessful { code }) if code == "TestError"
        ));
    }

    #[test]
    fn into_features_requires_endpoint() {
        let response: EndpointStateResponse =
            serde_json::from_str(r#"{"data":{"endpoint":null}}"#).unwrap();
        assert!(matches!(
            response.into_features(),
            Err(TransportError::InvalidResponse(_))
        ));
    }
}
