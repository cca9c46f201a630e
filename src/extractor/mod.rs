// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extraction of normalized capability states from vendor features.
//!
//! Extraction never fails. Each feature is matched against a fixed table of
//! known (name, property shape) pairs; anything unrecognized or malformed is
//! dropped so that one odd feature cannot hide the rest of the device state.

mod range;

pub use range::{
    NON_PERCENTAGE_KEYWORDS, RangeCapability, is_percentage_label, may_be_percentage,
    range_capabilities,
};

use crate::response::{RawFeature, RawProperty, property_keys};
use crate::state::CapabilityState;
use crate::types::FeatureName;

/// Vendor feature names the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WireFeature {
    Brightness,
    Color,
    ColorTemperature,
    Lock,
    Power,
    Toggle,
    TemperatureSensor,
    Range,
    Thermostat,
}

impl WireFeature {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "brightness" => Some(Self::Brightness),
            "color" => Some(Self::Color),
            "colorTemperature" => Some(Self::ColorTemperature),
            "lock" => Some(Self::Lock),
            "power" => Some(Self::Power),
            "toggle" => Some(Self::Toggle),
            "temperatureSensor" => Some(Self::TemperatureSensor),
            "range" => Some(Self::Range),
            "thermostat" => Some(Self::Thermostat),
            _ => None,
        }
    }
}

/// Turns a raw vendor feature list into normalized capability states.
///
/// Multi-property features are split into one feature per property first.
/// At most one state per (feature name, instance) is returned: a later
/// duplicate replaces the earlier one in place.
///
/// # Examples
///
/// ```
/// use alexa_hap_lib::extractor::extract_states;
/// use alexa_hap_lib::response::{RawFeature, RawProperty};
/// use alexa_hap_lib::types::FeatureName;
///
/// let features = vec![
///     RawFeature::new("power")
///         .with_property(RawProperty::new("powerState").with_value("powerStateValue", "ON")),
///     RawFeature::new("speaker"),
/// ];
///
/// let states = extract_states(&features);
/// assert_eq!(states.len(), 1);
/// assert_eq!(states[0].feature_name, FeatureName::Power);
/// ```
#[must_use]
pub fn extract_states(features: &[RawFeature]) -> Vec<CapabilityState> {
    let mut states: Vec<CapabilityState> = Vec::new();

    for feature in features.iter().flat_map(RawFeature::split_properties) {
        let Some(state) = extract_feature(&feature) else {
            tracing::trace!(feature = %feature.name, "Dropping unrecognized feature");
            continue;
        };

        match states.iter_mut().find(|existing| existing.same_key(&state)) {
            Some(existing) => *existing = state,
            None => states.push(state),
        }
    }

    states
}

fn extract_feature(feature: &RawFeature) -> Option<CapabilityState> {
    let property = feature.properties.first()?;

    let state = match WireFeature::from_name(&feature.name)? {
        WireFeature::Brightness => CapabilityState::new(
            FeatureName::Brightness,
            property.number(property_keys::BRIGHTNESS)?,
        ),
        WireFeature::Color => CapabilityState::new(FeatureName::Color, property.color()?),
        WireFeature::ColorTemperature => CapabilityState::new(
            FeatureName::ColorTemperature,
            property.number(property_keys::COLOR_TEMPERATURE)?,
        ),
        WireFeature::Lock => {
            CapabilityState::new(FeatureName::Lock, property.text(property_keys::LOCK)?)
        }
        WireFeature::Power => {
            CapabilityState::new(FeatureName::Power, property.text(property_keys::POWER)?)
        }
        WireFeature::Toggle => {
            CapabilityState::new(FeatureName::Toggle, property.text(property_keys::TOGGLE)?)
        }
        WireFeature::TemperatureSensor => {
            CapabilityState::new(FeatureName::TemperatureSensor, property.measurement()?)
        }
        WireFeature::Range => range::extract_range(feature, property)?,
        WireFeature::Thermostat => extract_thermostat(property)?,
    };

    Some(match &property.name {
        Some(name) => state.with_name(name.clone()),
        None => state,
    })
}

fn extract_thermostat(property: &RawProperty) -> Option<CapabilityState> {
    match property.name.as_deref()? {
        "thermostatMode" => Some(CapabilityState::new(
            FeatureName::ThermostatMode,
            property.text(property_keys::THERMOSTAT_MODE)?,
        )),
        "targetSetpoint" => setpoint(FeatureName::TargetSetpoint, property),
        "upperSetpoint" => setpoint(FeatureName::UpperSetpoint, property),
        "lowerSetpoint" => setpoint(FeatureName::LowerSetpoint, property),
        _ => None,
    }
}

fn setpoint(feature: FeatureName, property: &RawProperty) -> Option<CapabilityState> {
    property
        .state_value(property_keys::VALUE)
        .map(|value| CapabilityState::new(feature, value))
}
