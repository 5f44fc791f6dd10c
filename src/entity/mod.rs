// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity adapters.
//!
//! Entities are stateless views over the coordinator's cached result. They
//! hold a handle to the [`Coordinator`](crate::coordinator::Coordinator)
//! through an [`EntityContext`] instead of extending a host base class,
//! and expose two capabilities: reading state ([`Entity`]) and, for the
//! switch, handling commands ([`EntityCommand`]).
//!
//! | Platform        | Adapter                    | Reads                     |
//! |-----------------|----------------------------|---------------------------|
//! | `sensor`        | [`PowerOceanSensor`]       | `body`, passed through    |
//! | `binary_sensor` | [`PowerOceanBinarySensor`] | `title == "foo"`          |
//! | `switch`        | [`PowerOceanSwitch`]       | `title == "foo"`, writes `title` |

mod binary_sensor;
mod context;
mod description;
mod entity_set;
mod sensor;
mod switch;

pub use binary_sensor::{BINARY_SENSOR_DESCRIPTIONS, PowerOceanBinarySensor};
pub use context::EntityContext;
pub use description::{DeviceClass, DeviceInfo, EntityDescription};
pub use entity_set::EntitySet;
pub use sensor::{PowerOceanSensor, SENSOR_DESCRIPTIONS};
pub use switch::{PowerOceanSwitch, SWITCH_DESCRIPTIONS, TITLE_OFF, TITLE_ON};

use serde_json::Value;

use crate::ATTRIBUTION;

/// Entity platforms this integration provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Read-only value.
    Sensor,
    /// Read-only on/off.
    BinarySensor,
    /// Read/write on/off.
    Switch,
}

impl Platform {
    /// Returns the platform name used in unique ids.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sensor => "sensor",
            Self::BinarySensor => "binary_sensor",
            Self::Switch => "switch",
        }
    }
}

/// Every platform, in setup order.
pub const PLATFORMS: [Platform; 3] = [Platform::Sensor, Platform::BinarySensor, Platform::Switch];

/// Rendered state of an entity.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityState {
    /// The last poll failed.
    Unavailable,
    /// The field is missing from the cached result.
    Unknown,
    /// On.
    On,
    /// Off.
    Off,
    /// A sensor value.
    Value(Value),
}

impl From<bool> for EntityState {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

/// Commands an entity can handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityCommand {
    /// Turn on.
    TurnOn,
    /// Turn off.
    TurnOff,
    /// Flip the current state.
    Toggle,
}

/// Read side shared by all adapters.
pub trait Entity {
    /// Returns the static description.
    fn description(&self) -> &EntityDescription;

    /// Returns the platform the entity belongs to.
    fn platform(&self) -> Platform;

    /// Returns an id that stays stable for the life of the entry.
    fn unique_id(&self) -> String;

    /// Returns `true` while the coordinator's last poll succeeded.
    fn available(&self) -> bool;

    /// Returns the current state.
    fn state(&self) -> EntityState;

    /// Returns the device the entity is attached to.
    fn device_info(&self) -> DeviceInfo;

    /// Returns the display name.
    fn name(&self) -> &'static str {
        self.description().name
    }

    /// Returns the data attribution line.
    fn attribution(&self) -> &'static str {
        ATTRIBUTION
    }
}

/// `true` iff `data.title` is the on sentinel.
pub(crate) fn title_is_on(data: Option<&Value>) -> bool {
    data.and_then(|d| d.get("title"))
        .and_then(Value::as_str)
        .is_some_and(|title| title == TITLE_ON)
}
