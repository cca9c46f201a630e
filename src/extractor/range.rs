// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Range control disambiguation.
//!
//! A device may expose several numeric range controls distinguished only by
//! an opaque instance id and a free-text label. One of them, if labelled
//! `percentage`, backs the level capability; the rest stay generic ranges.

use std::collections::BTreeMap;

use crate::response::{RawFeature, RawProperty};
use crate::state::CapabilityState;
use crate::types::FeatureName;

/// Label fragments that rule a range out as a fan speed.
pub const NON_PERCENTAGE_KEYWORDS: [&str; 4] = ["humidity", "temperature", "air", "co"];

/// Returns `true` if `label` names the percentage capability.
#[must_use]
pub fn is_percentage_label(label: &str) -> bool {
    label.eq_ignore_ascii_case("percentage")
}

pub(super) fn extract_range(
    feature: &RawFeature,
    property: &RawProperty,
) -> Option<CapabilityState> {
    let instance = feature.instance.as_deref()?;
    let value = property.range_value()?;
    let label = feature.range_label();

    let percentage = is_percentage_label(instance)
        || label.is_some_and(is_percentage_label)
        || property.name.as_deref().is_some_and(is_percentage_label);

    if percentage {
        return Some(CapabilityState::new(FeatureName::Percentage, value).with_instance(instance));
    }

    let state = CapabilityState::new(FeatureName::Range, value).with_instance(instance);
    Some(match label {
        Some(label) => state.with_range_name(label),
        None => state,
    })
}

/// Returns `true` if a generic range could plausibly be a speed level.
///
/// Only [`FeatureName::Range`] states qualify, and only when neither the
/// instance nor the label mentions one of [`NON_PERCENTAGE_KEYWORDS`].
///
/// # Examples
///
/// ```
/// use alexa_hap_lib::extractor::may_be_percentage;
/// use alexa_hap_lib::state::CapabilityState;
/// use alexa_hap_lib::types::FeatureName;
///
/// let speed = CapabilityState::new(FeatureName::Range, 3.0).with_instance("2");
/// let humidity = CapabilityState::new(FeatureName::Range, 40.0)
///     .with_instance("5")
///     .with_range_name("Humidity");
///
/// assert!(may_be_percentage(&speed));
/// assert!(!may_be_percentage(&humidity));
/// ```
#[must_use]
pub fn may_be_percentage(state: &CapabilityState) -> bool {
    if state.feature_name != FeatureName::Range {
        return false;
    }
    let mentions_excluded = |text: &Option<String>| {
        text.as_deref().is_some_and(|text| {
            let text = text.to_ascii_lowercase();
            NON_PERCENTAGE_KEYWORDS
                .iter()
                .any(|keyword| text.contains(keyword))
        })
    };
    !mentions_excluded(&state.instance) && !mentions_excluded(&state.range_name)
}

/// Addressing information of one labelled range control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeCapability {
    /// Always [`FeatureName::Range`].
    pub feature_name: FeatureName,
    /// Vendor instance id.
    pub instance: String,
    /// Human-readable label.
    pub range_name: String,
}

/// Maps each labelled range control of a device to its addressing info.
///
/// Ranges without an instance or a label are skipped.
#[must_use]
pub fn range_capabilities(features: &[RawFeature]) -> BTreeMap<String, RangeCapability> {
    features
        .iter()
        .filter(|feature| feature.name == "range")
        .filter_map(|feature| {
            let instance = feature.instance.clone()?;
            let label = feature.range_label()?.to_string();
            Some((
                label.clone(),
                RangeCapability {
                    feature_name: FeatureName::Range,
                    instance,
                    range_name: label,
                },
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::extractor::extract_states;
    use crate::response::property_keys;

    fn range(instance: &str, value: f64) -> RawFeature {
        RawFeature::new("range").with_instance(instance).with_property(
            RawProperty::new("rangeValue").with_value(property_keys::RANGE, json!({ "value": value })),
        )
    }

    #[test]
    fn labelled_range_keeps_its_name() {
        let states = extract_states(&[range("9", 50.0).with_range_label("Indoor Air Quality")]);

        assert_eq!(
            states,
            vec![
                CapabilityState::new(FeatureName::Range, 50.0)
                    .with_instance("9")
                    .with_range_name("Indoor Air Quality")
                    .with_name("rangeValue")
            ]
        );
    }

    #[test]
    fn percentage_label_becomes_percentage() {
        let states = extract_states(&[range("4", 68.0).with_range_label("Percentage")]);

        assert_eq!(states.len(), 1);
        assert_eq!(states[0].feature_name, FeatureName::Percentage);
        assert_eq!(states[0].instance.as_deref(), Some("4"));
        assert_eq!(states[0].range_name, None);
        assert_eq!(states[0].value.as_number(), Some(68.0));
    }

    #[test]
    fn percentage_instance_or_property_becomes_percentage() {
        let by_instance = extract_states(&[range("percentage", 10.0)]);
        assert_eq!(by_instance[0].feature_name, FeatureName::Percentage);

        let by_property = extract_states(&[RawFeature::new("range")
            .with_instance("7")
            .with_property(
                RawProperty::new("PERCENTAGE")
                    .with_value(property_keys::RANGE, json!({ "value": 20 })),
            )]);
        assert_eq!(by_property[0].feature_name, FeatureName::Percentage);
    }

    #[test]
    fn ranges_with_distinct_instances_coexist() {
        let states = extract_states(&[
            range("1", 10.0).with_range_label("Fan Speed"),
            range("2", 40.0).with_range_label("Humidity"),
        ]);

        assert_eq!(states.len(), 2);
        assert!(states.iter().all(|s| s.feature_name == FeatureName::Range));
    }

    #[test]
    fn range_without_value_is_dropped() {
        let feature = RawFeature::new("range")
            .with_instance("3")
            .with_property(RawProperty::new("rangeValue").with_value(property_keys::RANGE, json!({})));
        assert!(extract_states(&[feature]).is_empty());
    }

    #[test]
    fn keyword_heuristic() {
        let state = |instance: &str, label: Option<&str>| {
            let state = CapabilityState::new(FeatureName::Range, 1.0).with_instance(instance);
            match label {
                Some(label) => state.with_range_name(label),
                None => state,
            }
        };

        assert!(may_be_percentage(&state("1", Some("Fan Speed"))));
        assert!(!may_be_percentage(&state("1", Some("Air Quality"))));
        assert!(!may_be_percentage(&state("1", Some("CO2 Level"))));
        assert!(!may_be_percentage(&state("Temperature.1", None)));
        assert!(!may_be_percentage(
            &CapabilityState::new(FeatureName::Percentage, 1.0).with_instance("1")
        ));
    }

    #[test]
    fn range_capabilities_by_label() {
        let features = [
            range("9", 50.0).with_range_label("Indoor Air Quality"),
            range("4", 10.0),
            RawFeature::new("power"),
        ];

        let ranges = range_capabilities(&features);
        assert_eq!(ranges.len(), 1);
        let air = &ranges["Indoor Air Quality"];
        assert_eq!(air.instance, "9");
        assert_eq!(air.feature_name, FeatureName::Range);
    }
}
