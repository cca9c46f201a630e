// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vendor action verbs and the set of operations a device declares.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// A named operation invoked on the vendor API to change a capability.
///
/// # Examples
///
/// ```
/// use alexa_hap_lib::types::ActionVerb;
///
/// let verb: ActionVerb = "adjustPercentage".parse().unwrap();
/// assert_eq!(verb, ActionVerb::AdjustPercentage);
/// assert_eq!(ActionVerb::SetColor.as_str(), "setColor");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionVerb {
    /// Turn the device on.
    TurnOn,
    /// Turn the device off.
    TurnOff,
    /// Set light brightness.
    SetBrightness,
    /// Set a percentage control to an absolute value.
    SetPercentage,
    /// Adjust a percentage control.
    AdjustPercentage,
    /// Ramp a percentage control.
    RampPercentage,
    /// Set a named color.
    SetColor,
    /// Set the white color temperature.
    SetColorTemperature,
    /// Lock the device.
    Lock,
    /// Unlock the device.
    Unlock,
    /// Set the thermostat target temperature.
    SetTargetTemperature,
    /// Set the thermostat mode.
    SetThermostatMode,
}

impl ActionVerb {
    /// All action verbs, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::TurnOn,
        Self::TurnOff,
        Self::SetBrightness,
        Self::SetPercentage,
        Self::AdjustPercentage,
        Self::RampPercentage,
        Self::SetColor,
        Self::SetColorTemperature,
        Self::Lock,
        Self::Unlock,
        Self::SetTargetTemperature,
        Self::SetThermostatMode,
    ];

    /// Returns the name used by the vendor API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TurnOn => "turnOn",
            Self::TurnOff => "turnOff",
            Self::SetBrightness => "setBrightness",
            Self::SetPercentage => "setPercentage",
            Self::AdjustPercentage => "adjustPercentage",
            Self::RampPercentage => "rampPercentage",
            Self::SetColor => "setColor",
            Self::SetColorTemperature => "setColorTemperature",
            Self::Lock => "lockAction",
            Self::Unlock => "unlockAction",
            Self::SetTargetTemperature => "setTargetTemperature",
            Self::SetThermostatMode => "setThermostatMode",
        }
    }
}

impl fmt::Display for ActionVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionVerb {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|verb| verb.as_str() == s)
            .ok_or_else(|| ValueError::UnknownAction(s.to_string()))
    }
}

/// The operations a device declares as supported.
///
/// Unknown operation names reported by the vendor are ignored when
/// building the set.
///
/// # Examples
///
/// ```
/// use alexa_hap_lib::types::{ActionVerb, SupportedOperations};
///
/// let ops = SupportedOperations::from_names(["turnOn", "turnOff", "setBrightness", "reboot"]);
/// assert!(ops.contains(ActionVerb::SetBrightness));
/// assert_eq!(ops.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SupportedOperations(BTreeSet<ActionVerb>);

impl SupportedOperations {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the set from vendor operation names, skipping unknown ones.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            names
                .into_iter()
                .filter_map(|name| name.as_ref().parse().ok())
                .collect(),
        )
    }

    /// Returns `true` if the device declares `verb`.
    #[must_use]
    pub fn contains(&self, verb: ActionVerb) -> bool {
        self.0.contains(&verb)
    }

    /// Returns `true` if the device declares any of `verbs`.
    #[must_use]
    pub fn contains_any(&self, verbs: &[ActionVerb]) -> bool {
        verbs.iter().any(|verb| self.contains(*verb))
    }

    /// Returns the first verb of `priority` that the device declares.
    #[must_use]
    pub fn first_supported(&self, priority: &[ActionVerb]) -> Option<ActionVerb> {
        priority.iter().copied().find(|verb| self.contains(*verb))
    }

    /// Returns the number of declared operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no operations are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the declared operations.
    pub fn iter(&self) -> impl Iterator<Item = ActionVerb> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<ActionVerb> for SupportedOperations {
    fn from_iter<I: IntoIterator<Item = ActionVerb>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<String>> for SupportedOperations {
    fn from(names: Vec<String>) -> Self {
        Self::from_names(names)
    }
}

impl From<SupportedOperations> for Vec<String> {
    fn from(ops: SupportedOperations) -> Self {
        ops.iter().map(|verb| verb.as_str().to_string()).collect()
    }
}
