// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Percentage type for brightness, fan speed and other 0-100 controls.

use std::fmt;

use crate::error::ValueError;

/// A level between 0 and 100 percent.
///
/// Used for light brightness, fan rotation speed and switch percentage
/// controls. Writes coming from the hub are clamped rather than rejected.
///
/// # Examples
///
/// ```
/// use alexa_hap_lib::types::Percentage;
///
/// let level = Percentage::new(75).unwrap();
/// assert_eq!(level.value(), 75);
///
/// assert_eq!(Percentage::clamped(150.0).unwrap().value(), 100);
/// assert_eq!(Percentage::clamped(-3.0).unwrap().value(), 0);
/// assert!(Percentage::new(101).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Percentage(u8);

impl Percentage {
    /// Minimum value (0%).
    pub const MIN: Self = Self(0);

    /// Maximum value (100%).
    pub const MAX: Self = Self(100);

    /// Creates a new percentage.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value exceeds 100.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > 100 {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: u64::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Creates a percentage from any number, clamping to [0, 100] and
    /// rounding to the nearest integer.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NotFinite` for NaN or infinite input.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn clamped(value: f64) -> Result<Self, ValueError> {
        if !value.is_finite() {
            return Err(ValueError::NotFinite);
        }
        // Safe: clamped to [0, 100] before the cast
        Ok(Self(value.clamp(0.0, 100.0).round() as u8))
    }

    /// Returns the percentage value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns the value as the numeric string the vendor API expects.
    #[must_use]
    pub fn to_vendor_string(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u8> for Percentage {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
