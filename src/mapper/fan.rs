// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan speed lookup.

use super::percentage::FAN_SPEED_ACTIONS;
use crate::extractor::may_be_percentage;
use crate::state::CapabilityState;
use crate::types::{FeatureName, SupportedOperations};

/// Where a fan's speed was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanSpeedSource {
    /// An explicit `percentage` state.
    Percentage,
    /// A generic range that passed the keyword heuristic.
    Range,
}

/// Finds the state holding a fan's rotation speed.
///
/// An explicit `percentage` state always wins. Otherwise, if the fan
/// declares any percentage verb, the first range whose instance and label
/// mention no excluded keyword (humidity, temperature, air, co) is used.
///
/// # Examples
///
/// ```
/// use alexa_hap_lib::mapper::{FanSpeedSource, fan_speed_state};
/// use alexa_hap_lib::state::CapabilityState;
/// use alexa_hap_lib::types::{FeatureName, SupportedOperations};
///
/// let states = vec![
///     CapabilityState::new(FeatureName::Range, 40.0).with_instance("1").with_range_name("Humidity"),
///     CapabilityState::new(FeatureName::Range, 3.0).with_instance("2").with_range_name("Speed"),
/// ];
/// let ops = SupportedOperations::from_names(["rampPercentage"]);
///
/// let (state, source) = fan_speed_state(&states, &ops).unwrap();
/// assert_eq!(state.instance.as_deref(), Some("2"));
/// assert_eq!(source, FanSpeedSource::Range);
/// ```
#[must_use]
pub fn fan_speed_state<'a>(
    states: &'a [CapabilityState],
    operations: &SupportedOperations,
) -> Option<(&'a CapabilityState, FanSpeedSource)> {
    if let Some(state) = states
        .iter()
        .find(|state| state.feature_name == FeatureName::Percentage)
    {
        return Some((state, FanSpeedSource::Percentage));
    }
    if !operations.contains_any(&FAN_SPEED_ACTIONS) {
        return None;
    }
    states
        .iter()
        .find(|state| may_be_percentage(state))
        .map(|state| (state, FanSpeedSource::Range))
}
