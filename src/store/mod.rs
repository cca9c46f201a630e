// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state cache.
//!
//! The store only tracks freshness; deciding when to refetch belongs to
//! the [`DeviceController`](crate::controller::DeviceController).

mod cache_config;
mod device_store;

pub use cache_config::CacheConfig;
pub use device_store::DeviceStore;
