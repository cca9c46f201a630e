// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hue and saturation mapping.

use super::VendorWrite;
use crate::error::ValueError;
use crate::types::{ActionVerb, ColorValue, FeatureName, NamedColor};

/// Reads the hue of a cached color, truncated to whole degrees.
#[must_use]
pub fn hue_to_hub(color: &ColorValue) -> f64 {
    color.hue.trunc()
}

/// Reads the saturation of a cached color on the hub's 0-100 scale.
#[must_use]
pub fn saturation_to_hub(color: &ColorValue) -> f64 {
    (color.saturation * 100.0).trunc()
}

/// Builds the write setting a light to the named color nearest `hue`.
///
/// The vendor only accepts palette names, so the write is lossy. The cached
/// color keeps its saturation and brightness and takes the requested hue,
/// so the hub reads back what it wrote. Without a cached color nothing is
/// cached.
///
/// # Errors
///
/// Returns `ValueError::InvalidHue` if `hue` is outside [0, 360].
///
/// # Examples
///
/// ```
/// use alexa_hap_lib::mapper::hue_to_vendor;
///
/// let write = hue_to_vendor(115.0, None).unwrap();
/// assert_eq!(write.parameters.get("colorName").unwrap(), "green");
/// assert!(write.cached_value.is_none());
///
/// assert!(hue_to_vendor(400.0, None).is_err());
/// ```
pub fn hue_to_vendor(hue: f64, cached: Option<&ColorValue>) -> Result<VendorWrite, ValueError> {
    let color = NamedColor::nearest(hue)?;
    let write = VendorWrite::new(FeatureName::Color, ActionVerb::SetColor)
        .with_parameter("colorName", color.name());

    Ok(match cached {
        Some(cached) => write.with_cached_value(cached.with_hue(hue)),
        None => write,
    })
}
