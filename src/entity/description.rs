// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Static entity metadata.

use serde::Serialize;

/// Device class hint for binary sensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    /// Reports whether something is connected.
    Connectivity,
}

/// Describes one entity exposed by a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntityDescription {
    /// Key, unique within a platform.
    pub key: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Material Design icon, e.g. `mdi:format-quote-close`.
    pub icon: Option<&'static str>,
    /// Device class hint.
    pub device_class: Option<DeviceClass>,
}

/// Device registry information shared by all entities of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    /// `(domain, entry id)` pair identifying the device.
    pub identifiers: (String, String),
    /// Display name of the device.
    pub name: String,
    /// Manufacturer.
    pub manufacturer: &'static str,
    /// Model.
    pub model: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{BINARY_SENSOR_DESCRIPTIONS, SENSOR_DESCRIPTIONS, SWITCH_DESCRIPTIONS};

    #[test]
    fn only_the_binary_sensor_has_a_device_class() {
        assert_eq!(
            BINARY_SENSOR_DESCRIPTIONS[0].device_class,
            Some(DeviceClass::Connectivity)
        );
        assert!(SENSOR_DESCRIPTIONS.iter().all(|d| d.device_class.is_none()));
        assert!(SWITCH_DESCRIPTIONS.iter().all(|d| d.device_class.is_none()));
    }

    #[test]
    fn device_class_uses_host_names() {
        assert_eq!(
            serde_json::to_value(DeviceClass::Connectivity).unwrap(),
            "connectivity"
        );
    }
}
