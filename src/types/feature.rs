// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The closed vocabulary of capability names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Name of a normalized device capability.
///
/// Upstream features are mapped onto this closed set during extraction.
/// Anything that does not fit is dropped, so consumers can match on this
/// enum exhaustively.
///
/// # Examples
///
/// ```
/// use alexa_hap_lib::types::FeatureName;
///
/// let feature: FeatureName = "colorTemperature".parse().unwrap();
/// assert_eq!(feature, FeatureName::ColorTemperature);
/// assert_eq!(feature.as_str(), "colorTemperature");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeatureName {
    /// On/off state.
    Power,
    /// Light brightness (0-100).
    Brightness,
    /// Generic percentage control, such as fan speed.
    Percentage,
    /// Hue, saturation and brightness of a color light.
    Color,
    /// White color temperature in Kelvin.
    ColorTemperature,
    /// Lock state.
    Lock,
    /// Toggle state.
    Toggle,
    /// Generic numeric range that is not known to be a percentage.
    Range,
    /// Temperature reading.
    TemperatureSensor,
    /// Thermostat operating mode.
    ThermostatMode,
    /// Thermostat target temperature.
    TargetSetpoint,
    /// Thermostat upper temperature bound.
    UpperSetpoint,
    /// Thermostat lower temperature bound.
    LowerSetpoint,
}

impl FeatureName {
    /// All feature names, in declaration order.
    pub const ALL: [Self; 13] = [
        Self::Power,
        Self::Brightness,
        Self::Percentage,
        Self::Color,
        Self::ColorTemperature,
        Self::Lock,
        Self::Toggle,
        Self::Range,
        Self::TemperatureSensor,
        Self::ThermostatMode,
        Self::TargetSetpoint,
        Self::UpperSetpoint,
        Self::LowerSetpoint,
    ];

    /// Returns the name used by the vendor API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Power => "power",
            Self::Brightness => "brightness",
            Self::Percentage => "percentage",
            Self::Color => "color",
            Self::ColorTemperature => "colorTemperature",
            Self::Lock => "lock",
            Self::Toggle => "toggle",
            Self::Range => "range",
            Self::TemperatureSensor => "temperatureSensor",
            Self::ThermostatMode => "thermostatMode",
            Self::TargetSetpoint => "targetSetpoint",
            Self::UpperSetpoint => "upperSetpoint",
            Self::LowerSetpoint => "lowerSetpoint",
        }
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureName {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|feature| feature.as_str() == s)
            .ok_or_else(|| ValueError::UnknownFeature(s.to_string()))
    }
}
