// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Brightness and percentage-style levels.
//!
//! The vendor offers several verbs able to set a level. Which one a device
//! accepts is only known from its declared operations, so each capability
//! has a priority table and the first supported verb wins.

use super::VendorWrite;
use crate::error::{Error, Result};
use crate::types::{ActionVerb, FeatureName, Percentage, StateValue, SupportedOperations};

/// Verbs able to set a light's brightness, in priority order.
pub const LIGHT_BRIGHTNESS_ACTIONS: [ActionVerb; 3] = [
    ActionVerb::SetBrightness,
    ActionVerb::SetPercentage,
    ActionVerb::AdjustPercentage,
];

/// Verbs able to set a generic percentage, in priority order.
pub const PERCENTAGE_ACTIONS: [ActionVerb; 3] = [
    ActionVerb::SetPercentage,
    ActionVerb::AdjustPercentage,
    ActionVerb::RampPercentage,
];

/// Verbs able to set a fan's rotation speed, in priority order.
pub const FAN_SPEED_ACTIONS: [ActionVerb; 3] = PERCENTAGE_ACTIONS;

/// Returns the feature and payload key a level verb writes to.
fn level_target(action: ActionVerb) -> Option<(FeatureName, &'static str)> {
    match action {
        ActionVerb::SetBrightness => Some((FeatureName::Brightness, "brightness")),
        ActionVerb::SetPercentage | ActionVerb::AdjustPercentage | ActionVerb::RampPercentage => {
            Some((FeatureName::Percentage, "percentage"))
        }
        _ => None,
    }
}

/// Builds a level write using the first verb of `priority` the device
/// supports.
///
/// The level is clamped to 0-100 and sent as a numeric string.
///
/// # Errors
///
/// Returns `Error::Value` for a non-finite level, or
/// `Error::UnsupportedCapability` if the device supports none of the verbs.
///
/// # Examples
///
/// ```
/// use alexa_hap_lib::mapper::{PERCENTAGE_ACTIONS, level_to_vendor};
/// use alexa_hap_lib::types::{ActionVerb, SupportedOperations};
///
/// let ops = SupportedOperations::from_names(["adjustPercentage", "rampPercentage"]);
/// let write = level_to_vendor(150.0, &ops, &PERCENTAGE_ACTIONS).unwrap();
///
/// assert_eq!(write.action, ActionVerb::AdjustPercentage);
/// assert_eq!(write.parameters.get("percentage").unwrap(), "100");
/// ```
pub fn level_to_vendor(
    level: f64,
    operations: &SupportedOperations,
    priority: &[ActionVerb],
) -> Result<VendorWrite> {
    let level = Percentage::clamped(level)?;

    let target = operations
        .first_supported(priority)
        .and_then(|action| level_target(action).map(|target| (action, target)));
    let Some((action, (feature, key))) = target else {
        let feature = priority
            .first()
            .and_then(|action| level_target(*action))
            .map_or(FeatureName::Percentage, |(feature, _)| feature);
        return Err(Error::UnsupportedCapability { feature });
    };

    let value = level.to_vendor_string();
    Ok(VendorWrite::new(feature, action)
        .with_parameter(key, value.clone())
        .with_cached_value(value))
}

/// Reads a cached level as a hub percentage.
///
/// Accepts numbers and numeric strings, clamping to 0-100.
#[must_use]
pub fn level_to_hub(value: &StateValue) -> Option<u8> {
    let level = value.as_number()?;
    Percentage::clamped(level).ok().map(|level| level.value())
}

/// Returns the feature holding a light's brightness.
///
/// Lights that cannot `setBrightness` but accept percentage verbs report
/// their level through the `percentage` feature.
#[must_use]
pub fn light_brightness_feature(operations: &SupportedOperations) -> FeatureName {
    let uses_percentage = !operations.contains(ActionVerb::SetBrightness)
        && operations.contains_any(&[ActionVerb::SetPercentage, ActionVerb::AdjustPercentage]);
    if uses_percentage {
        FeatureName::Percentage
    } else {
        FeatureName::Brightness
    }
}
