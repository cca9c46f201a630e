// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `alexa_hap_lib` - Device state sync between a cloud smart home account
//! and a local home automation hub.
//!
//! The vendor reports device state as loosely typed features; the hub
//! expects a fixed set of typed characteristics. This library normalizes
//! the former, caches it per device with a time-to-live, and maps hub
//! reads and writes onto vendor actions.
//!
//! # Layers
//!
//! - [`extractor`]: raw features to [`CapabilityState`]s, never failing
//! - [`store`]: TTL cache shared by every accessory, with coalesced refresh
//! - [`mapper`]: pure hub/vendor conversions and fallback action tables
//! - [`controller`]: per-accessory reads and writes (light, fan, switch)
//! - [`protocol`]: the [`Transport`](protocol::Transport) seam and a
//!   GraphQL-over-HTTP implementation
//!
//! # Quick Start
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
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = Arc::new(HttpTransport::new(HttpConfig::new("https://alexa.amazon.com"))?);
//!     let store = Arc::new(DeviceStore::new(CacheConfig::default()));
//!
//!     let fan = SmartHomeDevice::new(
//!         "amzn1.alexa.entity.7a1b3c5d-2e4f-4a6b-8c9d-0e1f2a3b4c5d",
//!         "amzn1.alexa.endpoint.7a1b3c5d",
//!         "Ceiling Fan",
//!         SupportedOperations::from_names(["turnOn", "turnOff", "rampPercentage"]),
//!     );
//!     let fan = DeviceController::new(fan, AccessoryKind::Fan, store, transport);
//!
//!     fan.set_state(Characteristic::Active, HubValue::from(1u8)).await?;
//!     fan.set_state(Characteristic::RotationSpeed, HubValue::from(60u8)).await?;
//!     println!("speed: {}", fan.get_state(Characteristic::RotationSpeed).await?);
//!     Ok(())
//! }
//! ```

pub mod controller;
mod device;
pub mod error;
pub mod extractor;
pub mod mapper;
pub mod protocol;
pub mod response;
pub mod state;
pub mod store;
pub mod types;

pub use controller::{AccessoryKind, Characteristic, DeviceController, DeviceStates, HubValue};
pub use device::SmartHomeDevice;
pub use error::{Error, Result, TransportError, ValueError};
pub use extractor::extract_states;
pub use protocol::{ActionParameters, Transport};
#[cfg(feature = "http")]
pub use protocol::{HttpConfig, HttpTransport};
pub use state::CapabilityState;
pub use store::{CacheConfig, DeviceStore};
pub use types::{ActionVerb, FeatureName, PowerState, SupportedOperations};
