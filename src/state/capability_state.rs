// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Normalized capability state.

use serde::{Deserialize, Serialize};

use crate::types::{FeatureName, StateValue};

/// One observed property of a device.
///
/// Produced by [`extract_states`](crate::extractor::extract_states) and
/// cached by [`DeviceStore`](crate::store::DeviceStore). Within one
/// extraction batch there is at most one state per
/// ([`feature_name`](Self::feature_name), [`instance`](Self::instance)).
///
/// # Examples
///
/// ```
/// use alexa_hap_lib::state::CapabilityState;
/// use alexa_hap_lib::types::FeatureName;
///
/// let state = CapabilityState::new(FeatureName::Range, 50.0)
///     .with_instance("9")
///     .with_range_name("Indoor Air Quality");
///
/// assert_eq!(state.instance.as_deref(), Some("9"));
/// assert!(state.matches(FeatureName::Range, None));
/// assert!(state.matches(FeatureName::Range, Some("9")));
/// assert!(!state.matches(FeatureName::Range, Some("4")));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityState {
    /// The normalized capability.
    pub feature_name: FeatureName,
    /// The vendor-side value.
    pub value: StateValue,
    /// Disambiguates multi-instance features such as several ranges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    /// Human-readable label of a range control.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_name: Option<String>,
    /// Upstream property identifier, kept for diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl CapabilityState {
    /// Creates a state without instance or labels.
    #[must_use]
    pub fn new(feature_name: FeatureName, value: impl Into<StateValue>) -> Self {
        Self {
            feature_name,
            value: value.into(),
            instance: None,
            range_name: None,
            name: None,
        }
    }

    /// Sets the instance identifier.
    #[must_use]
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    /// Sets the range label.
    #[must_use]
    pub fn with_range_name(mut self, range_name: impl Into<String>) -> Self {
        self.range_name = Some(range_name.into());
        self
    }

    /// Sets the upstream property name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns `true` if this state belongs to `feature`, and to `instance`
    /// when one is given.
    #[must_use]
    pub fn matches(&self, feature: FeatureName, instance: Option<&str>) -> bool {
        self.feature_name == feature
            && instance.is_none_or(|wanted| self.instance.as_deref() == Some(wanted))
    }

    /// Returns `true` if both states have the same feature and instance.
    #[must_use]
    pub fn same_key(&self, other: &Self) -> bool {
        self.feature_name == other.feature_name && self.instance == other.instance
    }
}
