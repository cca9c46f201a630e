// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Switch characteristics. The percentage level is exposed as brightness.

use super::{AccessoryKind, Characteristic, DeviceController, HubValue};
use crate::error::{Error, Result};
use crate::mapper::{PERCENTAGE_ACTIONS, level_to_hub, level_to_vendor, power_to_vendor};
use crate::protocol::Transport;
use crate::types::FeatureName;

impl<T: Transport + 'static> DeviceController<T> {
    pub(super) async fn switch_get(&self, characteristic: Characteristic) -> Result<HubValue> {
        match characteristic {
            Characteristic::On => self.read_power().await.map(HubValue::Bool),
            Characteristic::Brightness => self
                .read(FeatureName::Percentage, |states| {
                    let state = states
                        .iter()
                        .find(|state| state.feature_name == FeatureName::Percentage)?;
                    level_to_hub(&state.value)
                })
                .await
                .map(HubValue::from),
            other => Err(Error::UnsupportedCharacteristic {
                kind: AccessoryKind::Switch,
                characteristic: other,
            }),
        }
    }

    pub(super) async fn switch_set(
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
                    &PERCENTAGE_ACTIONS,
                )?;
                self.write(write).await
            }
            other => Err(Error::UnsupportedCharacteristic {
                kind: AccessoryKind::Switch,
                characteristic: other,
            }),
        }
    }
}
