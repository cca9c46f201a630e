// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power mapping.

use super::VendorWrite;
use crate::types::{ActionVerb, FeatureName, PowerState, StateValue};

/// Reads a cached power token. Only the exact token `ON` reads as on.
#[must_use]
pub fn power_to_hub(value: &StateValue) -> bool {
    value.as_text() == Some(PowerState::On.as_str())
}

/// Builds the write turning a device on or off.
#[must_use]
pub fn power_to_vendor(on: bool) -> VendorWrite {
    let power = PowerState::from(on);
    let action = if on {
        ActionVerb::TurnOn
    } else {
        ActionVerb::TurnOff
    };
    VendorWrite::new(FeatureName::Power, action).with_cached_value(power.as_str())
}
