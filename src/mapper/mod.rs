// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Conversions between hub characteristic values and vendor actions.
//!
//! Every function here is pure. Reads turn a cached vendor value into the
//! hub's unit; writes validate and clamp a hub value, pick an action verb
//! from the device's supported operations and describe the resulting
//! [`VendorWrite`] without performing it.
//!
//! | Capability        | Hub side              | Vendor side                     |
//! |-------------------|-----------------------|---------------------------------|
//! | Power             | `bool`                | `"ON"` / `"OFF"`                |
//! | Brightness/level  | integer 0-100         | numeric string, fallback chain  |
//! | Hue               | 0-360                 | nearest named color             |
//! | Saturation        | 0-100                 | 0-1                             |
//! | Color temperature | mired 140-500         | Kelvin                          |

mod color;
mod color_temperature;
mod fan;
mod percentage;
mod power;

pub use color::{hue_to_hub, hue_to_vendor, saturation_to_hub};
pub use color_temperature::{color_temperature_to_hub, color_temperature_to_vendor};
pub use fan::{FanSpeedSource, fan_speed_state};
pub use percentage::{
    FAN_SPEED_ACTIONS, LIGHT_BRIGHTNESS_ACTIONS, PERCENTAGE_ACTIONS, level_to_hub, level_to_vendor,
    light_brightness_feature,
};
pub use power::{power_to_hub, power_to_vendor};

use crate::protocol::ActionParameters;
use crate::state::CapabilityState;
use crate::types::{ActionVerb, FeatureName, StateValue};

/// A fully resolved vendor write.
///
/// # Examples
///
/// ```
/// use alexa_hap_lib::mapper::power_to_vendor;
/// use alexa_hap_lib::types::{ActionVerb, FeatureName};
///
/// let write = power_to_vendor(true);
/// assert_eq!(write.feature, FeatureName::Power);
/// assert_eq!(write.action, ActionVerb::TurnOn);
/// assert_eq!(write.cache_state().unwrap().value.as_text(), Some("ON"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VendorWrite {
    /// The feature the action is addressed to.
    pub feature: FeatureName,
    /// The chosen action verb.
    pub action: ActionVerb,
    /// Action payload.
    pub parameters: ActionParameters,
    /// Value to store under [`feature`](Self::feature) once the write
    /// succeeded, if any.
    pub cached_value: Option<StateValue>,
}

impl VendorWrite {
    fn new(feature: FeatureName, action: ActionVerb) -> Self {
        Self {
            feature,
            action,
            parameters: ActionParameters::new(),
            cached_value: None,
        }
    }

    fn with_parameter(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.parameters = self.parameters.with(key, value);
        self
    }

    fn with_cached_value(mut self, value: impl Into<StateValue>) -> Self {
        self.cached_value = Some(value.into());
        self
    }

    /// Returns the optimistic cache update for this write.
    #[must_use]
    pub fn cache_state(&self) -> Option<CapabilityState> {
        self.cached_value
            .clone()
            .map(|value| CapabilityState::new(self.feature, value))
    }
}
