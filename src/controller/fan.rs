// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan characteristics.
//!
//! A fan that is off reads a rotation speed of 0, and speed reads never
//! fail: when the level cannot be determined the last cached percentage,
//! or 0, is reported instead.

use super::{AccessoryKind, Characteristic, DeviceController, HubValue};
use crate::error::{Error, Result, ValueError};
use crate::mapper::{
    FAN_SPEED_ACTIONS, fan_speed_state, level_to_hub, level_to_vendor, power_to_hub,
    power_to_vendor,
};
use crate::protocol::Transport;
use crate::types::FeatureName;

/// Reads the hub's `Active` value: `0`, `1` or a boolean.
fn active_from_hub(value: &HubValue) -> Result<bool> {
    if let HubValue::Bool(active) = value {
        return Ok(*active);
    }
    let number = value.as_number()?;
    if number.abs() < f64::EPSILON {
        Ok(false)
    } else if (number - 1.0).abs() < f64::EPSILON {
        Ok(true)
    } else {
        Err(ValueError::InvalidType {
            expected: "0 or 1",
            actual: "number",
        }
        .into())
    }
}

impl<T: Transport + 'static> DeviceController<T> {
    pub(super) async fn fan_get(&self, characteristic: Characteristic) -> Result<HubValue> {
        match characteristic {
            Characteristic::Active => self
                .read_power()
                .await
                .map(|on| HubValue::from(u8::from(on))),
            Characteristic::RotationSpeed => Ok(HubValue::from(self.fan_speed().await)),
            other => Err(Error::UnsupportedCharacteristic {
                kind: AccessoryKind::Fan,
                characteristic: other,
            }),
        }
    }

    pub(super) async fn fan_set(
        &self,
        characteristic: Characteristic,
        value: &HubValue,
    ) -> Result<()> {
        match characteristic {
            Characteristic::Active => self.write(power_to_vendor(active_from_hub(value)?)).await,
            Characteristic::RotationSpeed => {
                let write = level_to_vendor(
                    value.as_number()?,
                    &self.device.supported_operations,
                    &FAN_SPEED_ACTIONS,
                )?;
                self.write(write).await
            }
            other => Err(Error::UnsupportedCharacteristic {
                kind: AccessoryKind::Fan,
                characteristic: other,
            }),
        }
    }

    async fn fan_speed(&self) -> u8 {
        let id = &self.device.id;

        match self.store.get(id, FeatureName::Power) {
            Some(power) if !power_to_hub(&power.value) => {
                tracing::debug!(device = %id, "Fan is off (cached), speed is 0");
                return 0;
            }
            Some(_) => {}
            None => match self.read_power().await {
                Ok(true) => {}
                Ok(false) => {
                    tracing::debug!(device = %id, "Fan is off, speed is 0");
                    return 0;
                }
                Err(e) => {
                    tracing::debug!(device = %id, error = %e, "Fan power unknown, speed is 0");
                    return 0;
                }
            },
        }

        let operations = &self.device.supported_operations;
        let speed = self
            .read(FeatureName::Percentage, |states| {
                let (state, _) = fan_speed_state(states, operations)?;
                level_to_hub(&state.value)
            })
            .await;

        match speed {
            Ok(speed) => speed,
            Err(e) => {
                let cached = self
                    .store
                    .get(id, FeatureName::Percentage)
                    .and_then(|state| level_to_hub(&state.value));
                tracing::warn!(
                    device = %id,
                    error = %e,
                    cached = ?cached,
                    "Fan speed unavailable, using fallback"
                );
                cached.unwrap_or(0)
            }
        }
    }
}
