// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cache tuning options.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Cache freshness and refresh behavior.
///
/// Deserializes from the `performance` block of a platform configuration:
/// `{"cacheTTL": 60, "backgroundRefresh": false}`, both keys optional.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use alexa_hap_lib::store::CacheConfig;
///
/// let config = CacheConfig::default();
/// assert_eq!(config.ttl(), Duration::from_secs(60));
/// assert!(!config.background_refresh());
///
/// let config = CacheConfig::new(Duration::from_secs(120))
///     .unwrap()
///     .with_background_refresh(true);
/// assert!(config.background_refresh());
///
/// assert!(CacheConfig::new(Duration::from_secs(5)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CacheConfigFile", into = "CacheConfigFile")]
pub struct CacheConfig {
    ttl: Duration,
    background_refresh: bool,
}

impl CacheConfig {
    /// Shortest accepted time-to-live.
    pub const MIN_TTL: Duration = Duration::from_secs(30);
    /// Longest accepted time-to-live.
    pub const MAX_TTL: Duration = Duration::from_secs(3600);
    /// Time-to-live used when none is configured.
    pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

    /// Creates a configuration with the given time-to-live.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `ttl` is outside
    /// [`MIN_TTL`](Self::MIN_TTL)..=[`MAX_TTL`](Self::MAX_TTL).
    pub fn new(ttl: Duration) -> Result<Self, ValueError> {
        if !(Self::MIN_TTL..=Self::MAX_TTL).contains(&ttl) {
            return Err(ValueError::OutOfRange {
                min: Self::MIN_TTL.as_secs(),
                max: Self::MAX_TTL.as_secs(),
                actual: ttl.as_secs(),
            });
        }
        Ok(Self {
            ttl,
            background_refresh: false,
        })
    }

    /// Enables or disables serving stale values while refreshing.
    #[must_use]
    pub fn with_background_refresh(mut self, enabled: bool) -> Self {
        self.background_refresh = enabled;
        self
    }

    /// Returns the time-to-live of cached device states.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns whether stale reads trigger a background refresh.
    #[must_use]
    pub fn background_refresh(&self) -> bool {
        self.background_refresh
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Self::DEFAULT_TTL,
            background_refresh: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheConfigFile {
    #[serde(rename = "cacheTTL", default, skip_serializing_if = "Option::is_none")]
    cache_ttl: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    background_refresh: Option<bool>,
}

impl TryFrom<CacheConfigFile> for CacheConfig {
    type Error = ValueError;

    fn try_from(file: CacheConfigFile) -> Result<Self, Self::Error> {
        let ttl = file
            .cache_ttl
            .map_or(Self::DEFAULT_TTL, Duration::from_secs);
        Ok(Self::new(ttl)?.with_background_refresh(file.background_refresh.unwrap_or(false)))
    }
}

impl From<CacheConfig> for CacheConfigFile {
    fn from(config: CacheConfig) -> Self {
        Self {
            cache_ttl: Some(config.ttl.as_secs()),
            background_refresh: Some(config.background_refresh),
        }
    }
}
