// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hub-side vocabulary: characteristics, values and accessory kinds.

use std::fmt;

use crate::error::ValueError;
use crate::mapper::{LIGHT_BRIGHTNESS_ACTIONS, PERCENTAGE_ACTIONS};
use crate::types::{ActionVerb, SupportedOperations};

/// A hub characteristic a controller can read or write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Characteristic {
    /// On/off state of lights and switches (`bool`).
    On,
    /// Active state of fans (`0` or `1`).
    Active,
    /// Brightness of lights, level of switches (0-100).
    Brightness,
    /// Fan speed (0-100).
    RotationSpeed,
    /// Hue in degrees (0-360).
    Hue,
    /// Saturation (0-100).
    Saturation,
    /// Color temperature in mireds (140-500).
    ColorTemperature,
}

impl Characteristic {
    /// Returns the characteristic name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::On => "On",
            Self::Active => "Active",
            Self::Brightness => "Brightness",
            Self::RotationSpeed => "RotationSpeed",
            Self::Hue => "Hue",
            Self::Saturation => "Saturation",
            Self::ColorTemperature => "ColorTemperature",
        }
    }
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A characteristic value as exchanged with the hub.
///
/// # Examples
///
/// ```
/// use alexa_hap_lib::controller::HubValue;
///
/// assert_eq!(HubValue::from(true).as_bool(), Ok(true));
/// assert_eq!(HubValue::from(42u8).as_number(), Ok(42.0));
/// assert!(HubValue::from("on").as_bool().is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum HubValue {
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(f64),
    /// A string.
    Text(String),
}

impl HubValue {
    const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::Text(_) => "string",
        }
    }

    /// Returns the boolean.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidType` for any other variant.
    pub fn as_bool(&self) -> Result<bool, ValueError> {
        match self {
            Self::Bool(value) => Ok(*value),
            other => Err(ValueError::InvalidType {
                expected: "bool",
                actual: other.type_name(),
            }),
        }
    }

    /// Returns the number.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidType` for any other variant.
    pub fn as_number(&self) -> Result<f64, ValueError> {
        match self {
            Self::Number(value) => Ok(*value),
            other => Err(ValueError::InvalidType {
                expected: "number",
                actual: other.type_name(),
            }),
        }
    }
}

impl fmt::Display for HubValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<bool> for HubValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for HubValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u8> for HubValue {
    fn from(value: u8) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u16> for HubValue {
    fn from(value: u16) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for HubValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for HubValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// The kind of hub accessory a device is exposed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessoryKind {
    /// Lightbulb: power, brightness, color and color temperature.
    Light,
    /// Fan: active state and rotation speed.
    Fan,
    /// Switch: power and a percentage level exposed as brightness.
    Switch,
}

impl AccessoryKind {
    /// Returns the accessory kind name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Fan => "fan",
            Self::Switch => "switch",
        }
    }

    /// Returns `true` if this kind of accessory has the characteristic.
    #[must_use]
    pub const fn supports(&self, characteristic: Characteristic) -> bool {
        use Characteristic as C;
        match self {
            Self::Light => matches!(
                characteristic,
                C::On | C::Brightness | C::Hue | C::Saturation | C::ColorTemperature
            ),
            Self::Fan => matches!(characteristic, C::Active | C::RotationSpeed),
            Self::Switch => matches!(characteristic, C::On | C::Brightness),
        }
    }

    /// Lists the characteristics to expose for a device with `operations`.
    ///
    /// The power characteristic is always present; the others require one
    /// of the verbs able to write them.
    ///
    /// # Examples
    ///
    /// ```
    /// use alexa_hap_lib::controller::{AccessoryKind, Characteristic};
    /// use alexa_hap_lib::types::SupportedOperations;
    ///
    /// let ops = SupportedOperations::from_names(["turnOn", "turnOff", "setColor"]);
    /// assert_eq!(
    ///     AccessoryKind::Light.characteristics(&ops),
    ///     vec![Characteristic::On, Characteristic::Hue, Characteristic::Saturation]
    /// );
    /// ```
    #[must_use]
    pub fn characteristics(&self, operations: &SupportedOperations) -> Vec<Characteristic> {
        let has_level = operations.contains_any(&PERCENTAGE_ACTIONS);
        let mut characteristics = Vec::new();
        match self {
            Self::Light => {
                characteristics.push(Characteristic::On);
                if operations.contains_any(&LIGHT_BRIGHTNESS_ACTIONS) {
                    characteristics.push(Characteristic::Brightness);
                }
                if operations.contains(ActionVerb::SetColor) {
                    characteristics.extend([Characteristic::Hue, Characteristic::Saturation]);
                }
                if operations.contains(ActionVerb::SetColorTemperature) {
                    characteristics.push(Characteristic::ColorTemperature);
                }
            }
            Self::Fan => {
                characteristics.push(Characteristic::Active);
                if has_level {
                    characteristics.push(Characteristic::RotationSpeed);
                }
            }
            Self::Switch => {
                characteristics.push(Characteristic::On);
                if has_level {
                    characteristics.push(Characteristic::Brightness);
                }
            }
        }
        characteristics
    }
}

impl fmt::Display for AccessoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_type_is_rejected() {
        assert_eq!(
            HubValue::from(1.0).as_bool(),
            Err(ValueError::InvalidType {
                expected: "bool",
                actual: "number"
            })
        );
        assert!(HubValue::from(true).as_number().is_err());
    }

    #[test]
    fn every_exposed_characteristic_is_supported() {
        let ops = SupportedOperations::from_names([
            "turnOn",
            "turnOff",
            "setBrightness",
            "setPercentage",
            "setColor",
            "setColorTemperature",
        ]);
        for kind in [AccessoryKind::Light, AccessoryKind::Fan, AccessoryKind::Switch] {
            for characteristic in kind.characteristics(&ops) {
                assert!(kind.supports(characteristic), "{kind} {characteristic}");
            }
        }
    }

    #[test]
    fn fan_speed_requires_percentage_verb() {
        let ops = SupportedOperations::from_names(["turnOn", "turnOff"]);
        assert_eq!(
            AccessoryKind::Fan.characteristics(&ops),
            vec![Characteristic::Active]
        );

        let ops = SupportedOperations::from_names(["turnOn", "turnOff", "rampPercentage"]);
        assert_eq!(
            AccessoryKind::Fan.characteristics(&ops),
            vec![Characteristic::Active, Characteristic::RotationSpeed]
        );
    }

    #[test]
    fn light_brightness_from_percentage_verbs() {
        let ops = SupportedOperations::from_names(["turnOn", "adjustPercentage"]);
        assert_eq!(
            AccessoryKind::Light.characteristics(&ops),
            vec![Characteristic::On, Characteristic::Brightness]
        );
    }
}
