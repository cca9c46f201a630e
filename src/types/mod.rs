// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared by extraction, caching and mapping.
//!
//! Each type ensures values are within their valid ranges at construction
//! time, so an invalid hub value is rejected before any network call.
//!
//! # Types
//!
//! - [`FeatureName`] - The closed set of normalized capabilities
//! - [`StateValue`] - A vendor-side value (token, number, color, reading)
//! - [`PowerState`] - `ON`/`OFF` token
//! - [`Percentage`] - Brightness and speed level (0-100%)
//! - [`ColorValue`] / [`NamedColor`] - HSB color and the settable palette
//! - [`Mired`] / [`Kelvin`] - Hub and vendor color temperature units
//! - [`ActionVerb`] / [`SupportedOperations`] - Vendor write operations

mod action;
mod color;
mod entity_id;
mod feature;
mod percentage;
mod power;
mod value;

pub use action::{ActionVerb, SupportedOperations};
pub use color::{ColorValue, Kelvin, Mired, NamedColor};
pub use entity_id::extract_entity_id;
pub use feature::FeatureName;
pub use percentage::Percentage;
pub use power::PowerState;
pub use value::{Measurement, StateValue};
