// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Binary sensor platform.

use crate::api::PowerOceanApi;

use super::{
    DeviceClass, DeviceInfo, Entity, EntityContext, EntityDescription, EntityState, Platform,
    title_is_on,
};

/// Binary sensors created for every entry.
pub const BINARY_SENSOR_DESCRIPTIONS: &[EntityDescription] = &[EntityDescription {
    key: "status_flag",
    name: "PowerOcean Status Flag",
    icon: None,
    device_class: Some(DeviceClass::Connectivity),
}];

/// On iff the cached `title` equals the on sentinel.
#[derive(Debug)]
pub struct PowerOceanBinarySensor<A: PowerOceanApi> {
    context: EntityContext<A>,
    description: EntityDescription,
}

impl<A: PowerOceanApi> PowerOceanBinarySensor<A> {
    /// Creates a binary sensor.
    #[must_use]
    pub fn new(context: EntityContext<A>, description: EntityDescription) -> Self {
        Self {
            context,
            description,
        }
    }

    /// Returns `true` if the cached `title` is `"foo"`.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.context.coordinator().with_data(title_is_on)
    }
}

impl<A: PowerOceanApi> Entity for PowerOceanBinarySensor<A> {
    fn description(&self) -> &EntityDescription {
        &self.description
    }

    fn platform(&self) -> Platform {
        Platform::BinarySensor
    }

    fn unique_id(&self) -> String {
        self.context.unique_id(Platform::BinarySensor, &self.description)
    }

    fn available(&self) -> bool {
        self.context.available()
    }

    fn state(&self) -> EntityState {
        if !self.available() {
            return EntityState::Unavailable;
        }
        self.is_on().into()
    }

    fn device_info(&self) -> DeviceInfo {
        self.context.device_info()
    }
}
