// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity id extraction from vendor identifiers.

use uuid::Uuid;

use crate::error::ValueError;

const HYPHENATED_LEN: usize = 36;

/// Finds the smart home entity id embedded in a device or endpoint id.
///
/// Endpoint ids look like `amzn1.alexa.endpoint.<uuid>`; the first
/// hyphenated UUID found anywhere in the string is returned.
///
/// # Errors
///
/// Returns `ValueError::InvalidEntityId` when no UUID is present.
///
/// # Examples
///
/// ```
/// use alexa_hap_lib::types::extract_entity_id;
///
/// let id = extract_entity_id("amzn1.alexa.endpoint.12345678-abcd-1234-1234-098765432101").unwrap();
/// assert_eq!(id.to_string(), "12345678-abcd-1234-1234-098765432101");
///
/// assert!(extract_entity_id("123").is_err());
/// ```
pub fn extract_entity_id(id: &str) -> Result<Uuid, ValueError> {
    id.char_indices()
        .filter_map(|(start, _)| id.get(start..start + HYPHENATED_LEN))
        .find_map(|candidate| Uuid::try_parse(candidate).ok())
        .ok_or_else(|| ValueError::InvalidEntityId(id.to_string()))
}
