// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Color temperature mapping (mired on the hub, Kelvin upstream).

use super::VendorWrite;
use crate::error::ValueError;
use crate::types::{ActionVerb, FeatureName, Kelvin, Mired};

/// Converts a cached Kelvin value to mireds clamped to 140-500.
///
/// # Errors
///
/// Returns `ValueError::NotFinite` for a zero, negative or non-finite
/// Kelvin value.
///
/// # Examples
///
/// ```
/// use alexa_hap_lib::mapper::color_temperature_to_hub;
///
/// assert_eq!(color_temperature_to_hub(10_000.0).unwrap().value(), 140);
/// assert_eq!(color_temperature_to_hub(1_000.0).unwrap().value(), 500);
/// assert_eq!(color_temperature_to_hub(2_700.0).unwrap().value(), 370);
/// ```
pub fn color_temperature_to_hub(kelvin: f64) -> Result<Mired, ValueError> {
    Mired::from_kelvin(Kelvin::new(kelvin))
}

/// Builds the write setting a color temperature given in mireds.
///
/// # Errors
///
/// Returns `ValueError::NotFinite` for NaN or infinite input.
pub fn color_temperature_to_vendor(mired: f64) -> Result<VendorWrite, ValueError> {
    let kelvin = Mired::clamped(mired)?.to_kelvin().value();
    Ok(
        VendorWrite::new(FeatureName::ColorTemperature, ActionVerb::SetColorTemperature)
            .with_parameter("colorTemperatureInKelvin", kelvin)
            .with_cached_value(kelvin),
    )
}
