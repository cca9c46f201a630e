// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the library.
//!
//! Errors are split by where they originate: value validation happens
//! locally before any network call, transport errors come from the vendor
//! API, and [`Error`] composes both with the capability that failed.

use thiserror::Error;

use crate::controller::{AccessoryKind, Characteristic};
use crate::types::FeatureName;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A hub value was rejected before reaching the transport.
    #[error("invalid value: {0}")]
    Value(#[from] ValueError),

    /// Reading or writing a capability failed upstream.
    #[error("communication failure for {feature}: {source}")]
    Communication {
        /// The capability whose read or write failed.
        feature: FeatureName,
        /// The underlying transport failure.
        #[source]
        source: TransportError,
    },

    /// The device reported no state for the requested capability.
    #[error("no {0} state reported by device")]
    MissingState(FeatureName),

    /// None of the action verbs able to write this capability are declared
    /// by the device.
    #[error("device does not support any action for {feature}")]
    UnsupportedCapability {
        /// The capability that could not be written.
        feature: FeatureName,
    },

    /// The characteristic is not exposed by this kind of accessory.
    #[error("{characteristic} is not available on {kind} accessories")]
    UnsupportedCharacteristic {
        /// The accessory kind of the controller.
        kind: AccessoryKind,
        /// The requested characteristic.
        characteristic: Characteristic,
    },
}

impl Error {
    /// Returns `true` when the hub should report a communication failure.
    ///
    /// Missing state is treated like a failed fetch: there is nothing
    /// sensible to show the user.
    #[must_use]
    pub fn is_communication(&self) -> bool {
        matches!(self, Self::Communication { .. } | Self::MissingState(_))
    }

    /// Returns `true` when the hub should report an invalid value.
    #[must_use]
    pub fn is_invalid_value(&self) -> bool {
        matches!(self, Self::Value(_) | Self::UnsupportedCapability { .. })
    }
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u64,
        /// Maximum allowed value.
        max: u64,
        /// The actual value that was provided.
        actual: u64,
    },

    /// A hub value had the wrong type for the characteristic.
    #[error("expected {expected} value, got {actual}")]
    InvalidType {
        /// The type the characteristic accepts.
        expected: &'static str,
        /// The type that was provided.
        actual: &'static str,
    },

    /// A numeric value was NaN or infinite.
    #[error("value is not a finite number")]
    NotFinite,

    /// A hue value is outside the valid range (0-360).
    #[error("hue value {0} is out of range [0, 360]")]
    InvalidHue(f64),

    /// An invalid power state token was provided.
    #[error("invalid power state: {0}")]
    InvalidPowerState(String),

    /// An unknown feature name was provided.
    #[error("unknown feature: {0}")]
    UnknownFeature(String),

    /// An unknown action verb was provided.
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// The identifier does not embed a smart home entity id.
    #[error("id: '{0}' is not a valid smart home device id")]
    InvalidEntityId(String),
}

/// Errors raised while talking to the vendor API.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection to the API failed or returned a non-success status.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The API answered but reported an error code.
    #[error("request unsuccessful: {code}")]
    RequestUnsuccessful {
        /// The error code returned by the API.
        code: String,
    },

    /// The response did not have the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
