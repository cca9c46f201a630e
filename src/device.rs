// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Smart home device descriptor.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValueError;
use crate::types::{SupportedOperations, extract_entity_id};

/// A device as listed by the vendor account.
///
/// `id` keys the state cache; `endpoint_id` addresses the device on the
/// vendor API.
///
/// # Examples
///
/// ```
/// use alexa_hap_lib::SmartHomeDevice;
/// use alexa_hap_lib::types::ActionVerb;
///
/// let json = r#"{
///     "id": "amzn1.alexa.entity.7a1b3c5d-2e4f-4a6b-8c9d-0e1f2a3b4c5d",
///     "endpointId": "amzn1.alexa.endpoint.7a1b3c5d",
///     "displayName": "Desk Lamp",
///     "supportedOperations": ["turnOn", "turnOff", "setBrightness"],
///     "enabled": true,
///     "deviceType": "LIGHT"
/// }"#;
///
/// let device: SmartHomeDevice = serde_json::from_str(json).unwrap();
/// assert!(device.supported_operations.contains(ActionVerb::SetBrightness));
/// assert!(device.entity_id().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartHomeDevice {
    /// Vendor device id, used as the cache key.
    pub id: String,
    /// Endpoint id used by the vendor API.
    pub endpoint_id: String,
    /// Human-readable name.
    pub display_name: String,
    /// Vendor device type, such as `LIGHT` or `FAN`.
    #[serde(default)]
    pub device_type: String,
    /// Operations the device declares.
    #[serde(default)]
    pub supported_operations: SupportedOperations,
    /// Whether the device is enabled in the vendor account.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Serial number, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    /// Model, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Manufacturer, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
}

fn default_enabled() -> bool {
    true
}

impl SmartHomeDevice {
    /// Creates an enabled device without metadata.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        endpoint_id: impl Into<String>,
        display_name: impl Into<String>,
        supported_operations: SupportedOperations,
    ) -> Self {
        Self {
            id: id.into(),
            endpoint_id: endpoint_id.into(),
            display_name: display_name.into(),
            device_type: String::new(),
            supported_operations,
            enabled: true,
            serial_number: None,
            model: None,
            manufacturer: None,
        }
    }

    /// Sets the vendor device type.
    #[must_use]
    pub fn with_device_type(mut self, device_type: impl Into<String>) -> Self {
        self.device_type = device_type.into();
        self
    }

    /// Returns the entity UUID embedded in the device id.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidEntityId` if the id embeds no UUID.
    pub fn entity_id(&self) -> Result<Uuid, ValueError> {
        extract_entity_id(&self.id)
    }
}
