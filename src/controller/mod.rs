// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-accessory state controller.
//!
//! A [`DeviceController`] serves the hub's characteristic reads and writes
//! for one accessory. It holds no device state itself: reads go through the
//! shared [`DeviceStore`] and only reach the [`Transport`] when the cache is
//! stale or lacks the requested feature, and successful writes are
//! reflected in the store so they read back without a round trip.
//!
//! Concurrent reads of the same stale device share one upstream fetch.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use alexa_hap_lib::controller::{AccessoryKind, Characteristic, DeviceController, HubValue};
//! use alexa_hap_lib::protocol::{HttpConfig, HttpTransport};
//! use alexa_hap_lib::store::{CacheConfig, DeviceStore};
//! use alexa_hap_lib::types::SupportedOperations;
//! use alexa_hap_lib::SmartHomeDevice;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = Arc::new(HttpTransport::new(
//!     HttpConfig::new("https://alexa.amazon.com").with_cookie("session-id=..."),
//! )?);
//! let store = Arc::new(DeviceStore::new(CacheConfig::default()));
//!
//! let device = SmartHomeDevice::new(
//!     "amzn1.alexa.entity.7a1b3c5d-2e4f-4a6b-8c9d-0e1f2a3b4c5d",
//!     "amzn1.alexa.endpoint.7a1b3c5d",
//!     "Desk Lamp",
//!     SupportedOperations::from_names(["turnOn", "turnOff", "setBrightness"]),
//! );
//! let lamp = DeviceController::new(device, AccessoryKind::Light, store, transport);
//!
//! lamp.set_state(Characteristic::Brightness, HubValue::from(40u8)).await?;
//! let on = lamp.get_state(Characteristic::On).await?;
//! # Ok(())
//! # }
//! ```

mod characteristic;
mod fan;
mod light;
mod switch;

pub use characteristic::{AccessoryKind, Characteristic, HubValue};

use std::sync::Arc;

use crate::device::SmartHomeDevice;
use crate::error::{Error, Result, TransportError};
use crate::extractor::extract_states;
use crate::mapper::{VendorWrite, power_to_hub};
use crate::protocol::Transport;
use crate::state::CapabilityState;
use crate::store::DeviceStore;
use crate::types::FeatureName;

/// States of a device together with where they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceStates {
    /// The extracted states.
    pub states: Vec<CapabilityState>,
    /// `true` if served from the cache without a fetch.
    pub from_cache: bool,
}

/// Serves hub reads and writes for one accessory.
#[derive(Debug)]
pub struct DeviceController<T: Transport> {
    device: SmartHomeDevice,
    kind: AccessoryKind,
    store: Arc<DeviceStore>,
    transport: Arc<T>,
}

impl<T: Transport + 'static> DeviceController<T> {
    /// Creates a controller sharing `store` and `transport` with others.
    #[must_use]
    pub fn new(
        device: SmartHomeDevice,
        kind: AccessoryKind,
        store: Arc<DeviceStore>,
        transport: Arc<T>,
    ) -> Self {
        Self {
            device,
            kind,
            store,
            transport,
        }
    }

    /// Returns the controlled device.
    #[must_use]
    pub fn device(&self) -> &SmartHomeDevice {
        &self.device
    }

    /// Returns the accessory kind.
    #[must_use]
    pub fn kind(&self) -> AccessoryKind {
        self.kind
    }

    /// Lists the characteristics this accessory exposes.
    #[must_use]
    pub fn characteristics(&self) -> Vec<Characteristic> {
        self.kind.characteristics(&self.device.supported_operations)
    }

    /// Returns the device states, fetching them if the cache is stale.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if a required fetch fails.
    pub async fn states(&self) -> std::result::Result<DeviceStates, TransportError> {
        let id = &self.device.id;
        if self.store.is_fresh(id) {
            return Ok(DeviceStates {
                states: self.store.states(id),
                from_cache: true,
            });
        }

        let cached = self.store.states(id);
        if self.store.config().background_refresh() && !cached.is_empty() {
            self.spawn_refresh();
            return Ok(DeviceStates {
                states: cached,
                from_cache: true,
            });
        }

        Ok(DeviceStates {
            states: self.refresh().await?,
            from_cache: false,
        })
    }

    /// Reads a characteristic.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedCharacteristic` if the accessory kind has
    /// no such characteristic, `Error::Communication` if a fetch fails, or
    /// `Error::MissingState` if the device reports no usable state.
    pub async fn get_state(&self, characteristic: Characteristic) -> Result<HubValue> {
        self.ensure_supported(characteristic)?;

        let result = match self.kind {
            AccessoryKind::Light => self.light_get(characteristic).await,
            AccessoryKind::Fan => self.fan_get(characteristic).await,
            AccessoryKind::Switch => self.switch_get(characteristic).await,
        };

        match &result {
            Ok(value) => tracing::debug!(
                device = %self.device.display_name,
                characteristic = %characteristic,
                value = %value,
                "Get result"
            ),
            Err(e) => tracing::warn!(
                device = %self.device.display_name,
                characteristic = %characteristic,
                error = %e,
                "Get failed"
            ),
        }
        result
    }

    /// Writes a characteristic.
    ///
    /// The value is validated and clamped before any request is made.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` for a value of the wrong type or domain,
    /// `Error::UnsupportedCapability` if the device declares no verb able to
    /// write it, `Error::UnsupportedCharacteristic` if the accessory kind has
    /// no such characteristic, or `Error::Communication` if the write fails.
    pub async fn set_state(&self, characteristic: Characteristic, value: HubValue) -> Result<()> {
        self.ensure_supported(characteristic)?;
        tracing::debug!(
            device = %self.device.display_name,
            characteristic = %characteristic,
            value = %value,
            "Triggered set"
        );

        let result = match self.kind {
            AccessoryKind::Light => self.light_set(characteristic, &value).await,
            AccessoryKind::Fan => self.fan_set(characteristic, &value).await,
            AccessoryKind::Switch => self.switch_set(characteristic, &value).await,
        };

        if let Err(e) = &result {
            tracing::warn!(
                device = %self.device.display_name,
                characteristic = %characteristic,
                error = %e,
                "Set failed"
            );
        }
        result
    }

    fn ensure_supported(&self, characteristic: Characteristic) -> Result<()> {
        if self.kind.supports(characteristic) {
            Ok(())
        } else {
            Err(Error::UnsupportedCharacteristic {
                kind: self.kind,
                characteristic,
            })
        }
    }

    /// Reads the cached value picked by `select`, fetching when needed.
    ///
    /// A fresh cache is used as long as `select` finds a value in it. A
    /// value missing from a fresh cache is fetched only if the cache was
    /// not filled by a full fetch. With background refresh enabled, a stale
    /// value is returned as is while the device refreshes on a spawned task.
    async fn read<R>(
        &self,
        feature: FeatureName,
        select: impl Fn(&[CapabilityState]) -> Option<R>,
    ) -> Result<R> {
        let id = &self.device.id;
        let fresh = self.store.is_fresh(id);

        if (fresh || self.store.config().background_refresh())
            && let Some(value) = select(&self.store.states(id))
        {
            if fresh {
                tracing::trace!(device = %id, feature = %feature, "Cache hit");
            } else {
                self.spawn_refresh();
            }
            return Ok(value);
        }
        if fresh && self.store.is_complete(id) {
            tracing::trace!(device = %id, feature = %feature, "Feature not reported");
            return Err(Error::MissingState(feature));
        }

        let states = self
            .refresh()
            .await
            .map_err(|source| Error::Communication { feature, source })?;
        select(&states).ok_or(Error::MissingState(feature))
    }

    /// Reads the power state, `ON` meaning on.
    async fn read_power(&self) -> Result<bool> {
        self.read(FeatureName::Power, |states| {
            states
                .iter()
                .find(|state| state.feature_name == FeatureName::Power)
                .map(|state| power_to_hub(&state.value))
        })
        .await
    }

    /// Fetches the device, or waits for a fetch already in flight.
    async fn refresh(&self) -> std::result::Result<Vec<CapabilityState>, TransportError> {
        let id = &self.device.id;
        let gate = self.store.refresh_gate(id);
        let generation = self.store.generation(id);

        let _guard = gate.lock().await;
        if self.store.generation(id) != generation {
            tracing::debug!(device = %id, "Using states fetched by a concurrent refresh");
            return Ok(self.store.states(id));
        }

        fetch_and_store(
            self.transport.as_ref(),
            &self.store,
            id,
            &self.device.endpoint_id,
        )
        .await
    }

    fn spawn_refresh(&self) {
        let gate = self.store.refresh_gate(&self.device.id);
        let Ok(guard) = gate.try_lock_owned() else {
            tracing::trace!(device = %self.device.id, "Refresh already running");
            return;
        };

        let store = Arc::clone(&self.store);
        let transport = Arc::clone(&self.transport);
        let device_id = self.device.id.clone();
        let endpoint_id = self.device.endpoint_id.clone();
        tracing::debug!(device = %device_id, "Refreshing stale states in background");

        tokio::spawn(async move {
            let _guard = guard;
            if let Err(e) = fetch_and_store(transport.as_ref(), &store, &device_id, &endpoint_id).await
            {
                tracing::warn!(device = %device_id, error = %e, "Background refresh failed");
            }
        });
    }

    /// Performs a write and caches its result.
    async fn write(&self, write: VendorWrite) -> Result<()> {
        let cached = write.cache_state();
        let feature = write.feature;
        let action = write.action;

        self.transport
            .invoke_device_action(&self.device.endpoint_id, feature, action, write.parameters)
            .await
            .map_err(|source| Error::Communication { feature, source })?;

        if let Some(state) = cached {
            let updated = self.store.update(&self.device.id, state);
            tracing::debug!(
                device = %self.device.id,
                feature = %feature,
                action = %action,
                cached = updated,
                "Set succeeded"
            );
        }
        Ok(())
    }
}

async fn fetch_and_store<T: Transport>(
    transport: &T,
    store: &DeviceStore,
    device_id: &str,
    endpoint_id: &str,
) -> std::result::Result<Vec<CapabilityState>, TransportError> {
    tracing::debug!(device = %device_id, "Fetching device state");
    let features = transport.fetch_device_state(endpoint_id).await?;
    let states = extract_states(&features);
    store.record_fetch(device_id, states.clone());
    Ok(states)
}
