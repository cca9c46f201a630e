// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Color types for light control.
//!
//! The vendor reports color as HSB with a 0-1 saturation scale, but only
//! accepts color writes by name from a fixed palette. Color temperature is
//! reported and written in Kelvin while the hub speaks mireds.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// HSB color as reported by the vendor.
///
/// Saturation is on a 0-1 scale. Conversion to the hub's percentage scale
/// happens in the mapper, not here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorValue {
    /// Hue in degrees (0-360).
    pub hue: f64,
    /// Saturation (0-1).
    pub saturation: f64,
    /// Brightness as reported alongside the color.
    pub brightness: f64,
}

impl ColorValue {
    /// Creates a new color value.
    #[must_use]
    pub const fn new(hue: f64, saturation: f64, brightness: f64) -> Self {
        Self {
            hue,
            saturation,
            brightness,
        }
    }

    /// Returns a copy with the hue replaced.
    #[must_use]
    pub const fn with_hue(self, hue: f64) -> Self {
        Self { hue, ..self }
    }
}

/// A color from the vendor's named palette.
///
/// # Examples
///
/// ```
/// use alexa_hap_lib::types::NamedColor;
///
/// assert_eq!(NamedColor::nearest(118.0).unwrap().name(), "green");
/// assert_eq!(NamedColor::nearest(355.0).unwrap().name(), "red");
/// assert!(NamedColor::nearest(400.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NamedColor {
    name: &'static str,
    hue: u16,
}

impl NamedColor {
    /// Palette of settable colors with their reference hue.
    pub const PALETTE: [Self; 15] = [
        Self::new("red", 0),
        Self::new("orange", 39),
        Self::new("gold", 51),
        Self::new("yellow", 60),
        Self::new("chartreuse", 90),
        Self::new("green", 120),
        Self::new("spring_green", 150),
        Self::new("turquoise", 174),
        Self::new("cyan", 180),
        Self::new("sky_blue", 197),
        Self::new("blue", 240),
        Self::new("purple", 277),
        Self::new("magenta", 300),
        Self::new("hot_pink", 330),
        Self::new("crimson", 348),
    ];

    const fn new(name: &'static str, hue: u16) -> Self {
        Self { name, hue }
    }

    /// Returns the palette entry closest to `hue` on the color wheel.
    ///
    /// Ties resolve to the entry listed first in [`Self::PALETTE`].
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidHue` if `hue` is outside [0, 360] or not
    /// finite.
    pub fn nearest(hue: f64) -> Result<Self, ValueError> {
        if !(0.0..=360.0).contains(&hue) {
            return Err(ValueError::InvalidHue(hue));
        }
        let distance = |color: &Self| {
            let d = (f64::from(color.hue) - hue).abs() % 360.0;
            d.min(360.0 - d)
        };
        Self::PALETTE
            .into_iter()
            .min_by(|a, b| distance(a).total_cmp(&distance(b)))
            .ok_or(ValueError::InvalidHue(hue))
    }

    /// Returns the vendor color name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the reference hue in degrees.
    #[must_use]
    pub const fn hue(&self) -> u16 {
        self.hue
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Color temperature in mireds, the unit the hub uses.
///
/// The hub accepts 140-500 mireds (roughly 7143K down to 2000K).
///
/// # Examples
///
/// ```
/// use alexa_hap_lib::types::{Kelvin, Mired};
///
/// assert_eq!(Mired::clamped(100.0).unwrap().value(), 140);
/// assert_eq!(Mired::clamped(1000.0).unwrap().value(), 500);
/// assert_eq!(Mired::from_kelvin(Kelvin::new(4000.0)).unwrap().value(), 250);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Mired(u16);

impl Mired {
    /// Minimum value accepted by the hub (coolest).
    pub const MIN: u16 = 140;

    /// Maximum value accepted by the hub (warmest).
    pub const MAX: u16 = 500;

    /// Creates a mired value, clamping to the hub range.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NotFinite` for NaN or infinite input.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn clamped(value: f64) -> Result<Self, ValueError> {
        if !value.is_finite() {
            return Err(ValueError::NotFinite);
        }
        // Safe: clamped to [140, 500] before the cast
        Ok(Self(
            value
                .clamp(f64::from(Self::MIN), f64::from(Self::MAX))
                .round() as u16,
        ))
    }

    /// Converts a Kelvin reading, clamping to the hub range.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NotFinite` when the Kelvin value is zero,
    /// negative or not finite.
    pub fn from_kelvin(kelvin: Kelvin) -> Result<Self, ValueError> {
        if !(kelvin.0.is_finite() && kelvin.0 > 0.0) {
            return Err(ValueError::NotFinite);
        }
        Self::clamped(1_000_000.0 / kelvin.0)
    }

    /// Returns the value in mireds.
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.0
    }

    /// Returns the equivalent color temperature in Kelvin.
    #[must_use]
    pub fn to_kelvin(&self) -> Kelvin {
        Kelvin(1_000_000.0 / f64::from(self.0))
    }
}

impl fmt::Display for Mired {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mired", self.0)
    }
}

/// Color temperature in Kelvin, the unit the vendor uses.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Kelvin(f64);

impl Kelvin {
    /// Wraps a Kelvin value.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Kelvin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}K", self.0)
    }
}
