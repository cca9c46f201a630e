// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-device state cache.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::time::Instant;

use super::CacheConfig;
use crate::state::CapabilityState;
use crate::types::FeatureName;

/// Cached states of one device.
#[derive(Debug, Default)]
struct CacheEntry {
    states: Vec<CapabilityState>,
    fetched_at: Option<Instant>,
    generation: u64,
    complete: bool,
    refresh_gate: Arc<tokio::sync::Mutex<()>>,
}

/// TTL-bounded cache of extracted device states.
///
/// One store is shared by every controller in the process. Each method
/// holds the internal lock only for the duration of an in-memory update,
/// so calls never block on I/O and cannot fail.
///
/// Entries are created lazily and never evicted; staleness is judged by
/// [`is_fresh`](Self::is_fresh) against the time of the last full fetch.
///
/// # Examples
///
/// ```
/// use alexa_hap_lib::state::CapabilityState;
/// use alexa_hap_lib::store::{CacheConfig, DeviceStore};
/// use alexa_hap_lib::types::FeatureName;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let store = DeviceStore::new(CacheConfig::default());
/// assert!(!store.is_fresh("device-1"));
///
/// store.replace_all("device-1", vec![CapabilityState::new(FeatureName::Power, "ON")]);
/// assert!(store.is_fresh("device-1"));
///
/// let power = store.get("device-1", FeatureName::Power).unwrap();
/// assert_eq!(power.value.as_text(), Some("ON"));
/// assert!(store.get("device-1", FeatureName::Brightness).is_none());
/// # }
/// ```
#[derive(Debug, Default)]
pub struct DeviceStore {
    config: CacheConfig,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl DeviceStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the cache configuration.
    #[must_use]
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Returns the cached state of `feature`, whatever its instance.
    #[must_use]
    pub fn get(&self, device_id: &str, feature: FeatureName) -> Option<CapabilityState> {
        self.get_instance(device_id, feature, None)
    }

    /// Returns the cached state of `feature`, restricted to `instance` when
    /// one is given.
    #[must_use]
    pub fn get_instance(
        &self,
        device_id: &str,
        feature: FeatureName,
        instance: Option<&str>,
    ) -> Option<CapabilityState> {
        let entries = self.entries.read();
        entries
            .get(device_id)?
            .states
            .iter()
            .find(|state| state.matches(feature, instance))
            .cloned()
    }

    /// Returns a snapshot of every cached state of a device.
    #[must_use]
    pub fn states(&self, device_id: &str) -> Vec<CapabilityState> {
        self.entries
            .read()
            .get(device_id)
            .map(|entry| entry.states.clone())
            .unwrap_or_default()
    }

    /// Replaces all cached states of a device and stamps the fetch time.
    ///
    /// The states are treated as possibly partial: a feature missing from
    /// them may still be fetched. Use [`record_fetch`](Self::record_fetch)
    /// for the full result of an upstream fetch.
    pub fn replace_all(&self, device_id: &str, states: Vec<CapabilityState>) {
        self.replace(device_id, states, false);
    }

    /// Stores the full result of an upstream fetch.
    ///
    /// Until the entry expires, a feature absent from `states` is known not
    /// to be reported by the device.
    pub fn record_fetch(&self, device_id: &str, states: Vec<CapabilityState>) {
        self.replace(device_id, states, true);
    }

    fn replace(&self, device_id: &str, states: Vec<CapabilityState>, complete: bool) {
        let mut entries = self.entries.write();
        let entry = entries.entry(device_id.to_string()).or_default();
        entry.states = states;
        entry.fetched_at = Some(Instant::now());
        entry.generation = entry.generation.wrapping_add(1);
        entry.complete = complete;
        tracing::trace!(
            device = %device_id,
            states = entry.states.len(),
            generation = entry.generation,
            complete,
            "Replaced cached states"
        );
    }

    /// Returns `true` if the cached states came from a full upstream fetch.
    #[must_use]
    pub fn is_complete(&self, device_id: &str) -> bool {
        self.entries
            .read()
            .get(device_id)
            .is_some_and(|entry| entry.complete)
    }

    /// Overwrites the value of an already cached state.
    ///
    /// The entry is matched on feature name, and on instance when `state`
    /// carries one. Returns `false` and changes nothing if no entry
    /// matches: capabilities are only ever learned from a real fetch.
    /// The fetch time is left untouched.
    pub fn update(&self, device_id: &str, state: CapabilityState) -> bool {
        let mut entries = self.entries.write();
        let Some(existing) = entries.get_mut(device_id).and_then(|entry| {
            entry
                .states
                .iter_mut()
                .find(|existing| existing.matches(state.feature_name, state.instance.as_deref()))
        }) else {
            tracing::trace!(
                device = %device_id,
                feature = %state.feature_name,
                "Ignoring update of uncached state"
            );
            return false;
        };
        existing.value = state.value;
        true
    }

    /// Returns `true` if the device was fetched within the configured TTL.
    #[must_use]
    pub fn is_fresh(&self, device_id: &str) -> bool {
        self.is_fresh_within(device_id, self.config.ttl())
    }

    /// Returns `true` if the device was fetched at most `ttl` ago.
    #[must_use]
    pub fn is_fresh_within(&self, device_id: &str, ttl: Duration) -> bool {
        self.fetched_at(device_id)
            .is_some_and(|fetched_at| fetched_at.elapsed() <= ttl)
    }

    /// Returns when the device was last fetched.
    #[must_use]
    pub fn fetched_at(&self, device_id: &str) -> Option<Instant> {
        self.entries.read().get(device_id)?.fetched_at
    }

    /// Returns the number of completed fetches stored for the device.
    ///
    /// Used to detect that another task refreshed the device while the
    /// caller was waiting on the [`refresh_gate`](Self::refresh_gate).
    #[must_use]
    pub fn generation(&self, device_id: &str) -> u64 {
        self.entries
            .read()
            .get(device_id)
            .map_or(0, |entry| entry.generation)
    }

    /// Returns the lock serializing upstream refreshes of one device.
    #[must_use]
    pub fn refresh_gate(&self, device_id: &str) -> Arc<tokio::sync::Mutex<()>> {
        if let Some(entry) = self.entries.read().get(device_id) {
            return Arc::clone(&entry.refresh_gate);
        }
        let mut entries = self.entries.write();
        Arc::clone(&entries.entry(device_id.to_string()).or_default().refresh_gate)
    }
}
