// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polymorphic vendor-side state values.

use serde::{Deserialize, Serialize};

use super::{ColorValue, PowerState};

/// A reading with a unit scale, such as `{"value": 21.5, "scale": "CELSIUS"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// The numeric reading.
    pub value: f64,
    /// The unit scale reported by the vendor.
    pub scale: String,
}

/// The value of one capability as the vendor represents it.
///
/// Writes store vendor-facing values too, so a percentage written as the
/// string `"42"` reads back through [`as_number`](Self::as_number) like a
/// fetched `42`.
///
/// # Examples
///
/// ```
/// use alexa_hap_lib::types::{PowerState, StateValue};
///
/// assert_eq!(StateValue::from("42").as_number(), Some(42.0));
/// assert_eq!(StateValue::from(42.0).as_number(), Some(42.0));
/// assert_eq!(StateValue::from("ON").as_power(), Some(PowerState::On));
/// assert_eq!(StateValue::from("warm").as_number(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateValue {
    /// A numeric value.
    Number(f64),
    /// A string token, such as `"ON"` or a numeric string.
    Text(String),
    /// An HSB color.
    Color(ColorValue),
    /// A reading with a scale.
    Measurement(Measurement),
}

impl StateValue {
    /// Returns the value as a number, parsing numeric strings.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            Self::Color(_) | Self::Measurement(_) => None,
        }
    }

    /// Returns the string token, if this is one.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the color, if this is one.
    #[must_use]
    pub fn as_color(&self) -> Option<&ColorValue> {
        match self {
            Self::Color(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the measurement, if this is one.
    #[must_use]
    pub fn as_measurement(&self) -> Option<&Measurement> {
        match self {
            Self::Measurement(m) => Some(m),
            _ => None,
        }
    }

    /// Interprets the value as a power token.
    #[must_use]
    pub fn as_power(&self) -> Option<PowerState> {
        self.as_text().and_then(|s| s.parse().ok())
    }
}

impl From<f64> for StateValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for StateValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for StateValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<ColorValue> for StateValue {
    fn from(value: ColorValue) -> Self {
        Self::Color(value)
    }
}

impl From<Measurement> for StateValue {
    fn from(value: Measurement) -> Self {
        Self::Measurement(value)
    }
}

impl From<PowerState> for StateValue {
    fn from(value: PowerState) -> Self {
        Self::Text(value.as_str().to_string())
    }
}
