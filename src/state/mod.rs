// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Normalized device state.
//!
//! [`CapabilityState`] is the value type every other component consumes or
//! produces: the extractor emits it, the store caches it and the mapper
//! converts it to hub values.
//!
//! # Examples
//!
//! ```
//! use alexa_hap_lib::state::CapabilityState;
//! use alexa_hap_lib::types::{FeatureName, PowerState};
//!
//! let state = CapabilityState::new(FeatureName::Power, PowerState::On);
//! assert_eq!(state.value.as_power(), Some(PowerState::On));
//! ```

mod capability_state;

pub use capability_state::CapabilityState;
