// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensor platform.

use serde_json::Value;

use crate::api::PowerOceanApi;

use super::{DeviceInfo, Entity, EntityContext, EntityDescription, EntityState, Platform};

/// Sensors created for every entry.
pub const SENSOR_DESCRIPTIONS: &[EntityDescription] = &[EntityDescription {
    key: "status_body",
    name: "PowerOcean Status",
    icon: Some("mdi:format-quote-close"),
    device_class: None,
}];

/// Passes the `body` field of the cached result through.
#[derive(Debug)]
pub struct PowerOceanSensor<A: PowerOceanApi> {
    context: EntityContext<A>,
    description: EntityDescription,
}

impl<A: PowerOceanApi> PowerOceanSensor<A> {
    /// Creates a sensor.
    #[must_use]
    pub fn new(context: EntityContext<A>, description: EntityDescription) -> Self {
        Self {
            context,
            description,
        }
    }

    /// Returns the `body` field, if present.
    #[must_use]
    pub fn native_value(&self) -> Option<Value> {
        self.context.field("body")
    }
}

impl<A: PowerOceanApi> Entity for PowerOceanSensor<A> {
    fn description(&self) -> &EntityDescription {
        &self.description
    }

    fn platform(&self) -> Platform {
        Platform::Sensor
    }

    fn unique_id(&self) -> String {
        self.context.unique_id(Platform::Sensor, &self.description)
    }

    fn available(&self) -> bool {
        self.context.available()
    }

    fn state(&self) -> EntityState {
        if !self.available() {
            return EntityState::Unavailable;
        }
        self.native_value()
            .map_or(EntityState::Unknown, EntityState::Value)
    }

    fn device_info(&self) -> DeviceInfo {
        self.context.device_info()
    }
}
