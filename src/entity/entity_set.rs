// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entities of one entry, across all platforms.

use std::sync::Arc;

use crate::api::PowerOceanApi;
use crate::coordinator::Coordinator;

use super::{
    BINARY_SENSOR_DESCRIPTIONS, Entity, EntityContext, PowerOceanBinarySensor, PowerOceanSensor,
    PowerOceanSwitch, SENSOR_DESCRIPTIONS, SWITCH_DESCRIPTIONS,
};

/// Every entity built for an entry, grouped by platform.
#[derive(Debug)]
pub struct EntitySet<A: PowerOceanApi> {
    sensors: Vec<PowerOceanSensor<A>>,
    binary_sensors: Vec<PowerOceanBinarySensor<A>>,
    switches: Vec<PowerOceanSwitch<A>>,
}

impl<A: PowerOceanApi> EntitySet<A> {
    /// Builds one entity per description, all sharing `coordinator`.
    #[must_use]
    pub fn for_coordinator(coordinator: &Arc<Coordinator<A>>, entry_title: &str) -> Self {
        let context = EntityContext::new(Arc::clone(coordinator), entry_title);

        Self {
            sensors: SENSOR_DESCRIPTIONS
                .iter()
                .map(|d| PowerOceanSensor::new(context.clone(), *d))
                .collect(),
            binary_sensors: BINARY_SENSOR_DESCRIPTIONS
                .iter()
                .map(|d| PowerOceanBinarySensor::new(context.clone(), *d))
                .collect(),
            switches: SWITCH_DESCRIPTIONS
                .iter()
                .map(|d| PowerOceanSwitch::new(context.clone(), *d))
                .collect(),
        }
    }

    /// Returns the sensors.
    #[must_use]
    pub fn sensors(&self) -> &[PowerOceanSensor<A>] {
        &self.sensors
    }

    /// Returns the binary sensors.
    #[must_use]
    pub fn binary_sensors(&self) -> &[PowerOceanBinarySensor<A>] {
        &self.binary_sensors
    }

    /// Returns the switches.
    #[must_use]
    pub fn switches(&self) -> &[PowerOceanSwitch<A>] {
        &self.switches
    }

    /// Looks up a switch by description key.
    #[must_use]
    pub fn switch(&self, key: &str) -> Option<&PowerOceanSwitch<A>> {
        self.switches.iter().find(|s| s.description().key == key)
    }

    /// All entities, sensors first.
    #[must_use]
    pub fn entities(&self) -> Vec<&dyn Entity> {
        let mut all: Vec<&dyn Entity> = Vec::with_capacity(self.len());
        all.extend(self.sensors.iter().map(|e| e as &dyn Entity));
        all.extend(self.binary_sensors.iter().map(|e| e as &dyn Entity));
        all.extend(self.switches.iter().map(|e| e as &dyn Entity));
        all
    }

    /// Returns the number of entities across all platforms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sensors.len() + self.binary_sensors.len() + self.switches.len()
    }

    /// Returns `true` if no entity was built.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
