// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lightbulb characteristics.

use super::{AccessoryKind, Characteristic, DeviceController, HubValue};
use crate::error::{Error, Result};
use crate::mapper::{
    LIGHT_BRIGHTNESS_ACTIONS, color_temperature_to_hub, color_temperature_to_vendor, hue_to_hub,
    hue_to_vendor, level_to_hub, level_to_vendor, light_brightness_feature, power_to_vendor,
    saturation_to_hub,
};
use crate::protocol::Transport;
use crate::state::CapabilityState;
use crate::types::{ColorValue, FeatureName};

fn find(states: &[CapabilityState], feature: FeatureName) -> Option<&CapabilityState> {
    states.iter().find(|state| state.feature_name == feature)
}

fn color(states: &[CapabilityState]) -> Option<&ColorValue> {
    find(states, FeatureName::Color)?.value.as_color()
}

impl<T: Transport + 'static> DeviceController<T> {
    pub(super) async fn light_get(&self, characteristic: Characteristic) -> Result<HubValue> {
        match characteristic {
            Characteristic::On => self.read_power().await.map(HubValue::Bool),
            Characteristic::Brightness => {
                let feature = light_brightness_feature(&self.device.supported_operations);
                self.read(feature, |states| level_to_hub(&find(states, feature)?.value))
                    .await
                    .map(HubValue::from)
            }
            Characteristic::Hue => self
                .read(FeatureName::Color, |states| color(states).map(hue_to_hub))
                .await
                .map(HubValue::Number),
            Characteristic::Saturation => self
                .read(FeatureName::Color, |states| color(states).map(saturation_to_hub))
                .await
                .map(HubValue::Number),
            Characteristic::ColorTemperature => self
                .read(FeatureName::ColorTemperature, |states| {
                    let kelvin = find(states, FeatureName::ColorTemperature)?
                        .value
                        .as_number()?;
                    color_temperature_to_hub(kelvin).ok()
                })
                .await
                .map(|mired| HubValue::from(mired.value())),
            other => Err(unsupported(other)),
        }
    }

    pub(super) async fn light_set(
        &self,
        characteristic: Characteristic,
        value: &HubValue,
    ) -> Result<()> {
        match characteristic {
            Characteristic::On => self.write(power_to_vendor(value.as_bool()?)).await,
            Characteristic::Brightness => {
                let write = level_to_vendor(
                    value.as_number()?,
                    &self.device.supported_operations,
                    &LIGHT_BRIGHTNESS_ACTIONS,
                )?;
                self.write(write).await
            }
            Characteristic::Hue => {
                let cached = self
                    .store
                    .get(&self.device.id, FeatureName::Color)
                    .and_then(|state| state.value.as_color().copied());
                let write = hue_to_vendor(value.as_number()?, cached.as_ref())?;
                self.write(write).await
            }
            Characteristic::Saturation => {
                // Only palette names can be written; saturation follows the hue.
                value.as_number()?;
                Ok(())
            }
            Characteristic::ColorTemperature => {
                self.write(color_temperature_to_vendor(value.as_number()?)?)
                    .await
            }
            other => Err(unsupported(other)),
        }
    }
}

fn unsupported(characteristic: Characteristic) -> Error {
    Error::UnsupportedCharacteristic {
        kind: AccessoryKind::Light,
        characteristic,
    }
}
