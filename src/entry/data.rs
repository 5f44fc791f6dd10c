// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Persisted entry data.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::event::EntryId;

/// User input the host stores for an entry.
///
/// The password is stored as entered; it is base64-encoded only when it is
/// sent to the login endpoint.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryData {
    /// Serial number of the `PowerOcean` unit.
    pub device_id: String,
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl EntryData {
    /// Creates entry data.
    #[must_use]
    pub fn new(
        device_id: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            device_id: device_id.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for EntryData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryData")
            .field("device_id", &self.device_id)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// A configured `PowerOcean` unit, as the host persists it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    /// Host-assigned id, stable across restarts.
    pub entry_id: EntryId,
    /// Display title; the device id.
    pub title: String,
    /// Credentials entered in the config flow.
    pub data: EntryData,
}

impl ConfigEntry {
    /// Creates an entry with a fresh id, titled after the device id.
    #[must_use]
    pub fn new(data: EntryData) -> Self {
        Self {
            entry_id: EntryId::new(),
            title: data.device_id.clone(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn entry_is_titled_after_device() {
        let entry = ConfigEntry::new(EntryData::new("HJ31", "user@example.com", "pw"));
        assert_eq!(entry.title, "HJ31");
    }

    #[test]
    fn debug_redacts_password() {
        let data = EntryData::new("HJ31", "user@example.com", "hunter2");
        let debug = format!("{data:?}");
        assert!(debug.contains("user@example.com"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn data_uses_host_field_names() {
        let data = EntryData::new("HJ31", "user@example.com", "pw");
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({ "device_id": "HJ31", "email": "user@example.com", "password": "pw" })
        );
    }

    #[test]
    fn entry_survives_persistence() {
        let entry = ConfigEntry::new(EntryData::new("HJ31", "user@example.com", "pw"));
        let stored = serde_json::to_string(&entry).unwrap();
        let loaded: ConfigEntry = serde_json::from_str(&stored).unwrap();
        assert_eq!(loaded, entry);
    }
}
