// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Switch platform.

use tracing::debug;

use crate::api::PowerOceanApi;
use crate::error::Result;

use super::{
    DeviceInfo, Entity, EntityCommand, EntityContext, EntityDescription, EntityState, Platform,
    title_is_on,
};

/// Title the switch writes when turned on; the switch reads as on iff the
/// cached title equals it.
pub const TITLE_ON: &str = "foo";

/// Title the switch writes when turned off.
pub const TITLE_OFF: &str = "bar";

/// Switches created for every entry.
pub const SWITCH_DESCRIPTIONS: &[EntityDescription] = &[EntityDescription {
    key: "status_switch",
    name: "PowerOcean Switch",
    icon: Some("mdi:format-quote-close"),
    device_class: None,
}];

/// Reads `title == "foo"` from the cached result and writes `title`
/// through the API.
///
/// After a write the switch asks the coordinator for a refresh, so the
/// cached read catches up within one round trip.
///
/// # Examples
///
/// ```ignore
/// switch.turn_on().await?;
/// assert!(switch.is_on());
/// ```
#[derive(Debug)]
pub struct PowerOceanSwitch<A: PowerOceanApi> {
    context: EntityContext<A>,
    description: EntityDescription,
}

impl<A: PowerOceanApi> PowerOceanSwitch<A> {
    /// Creates a switch.
    #[must_use]
    pub fn new(context: EntityContext<A>, description: EntityDescription) -> Self {
        Self {
            context,
            description,
        }
    }

    /// Returns `true` iff the cached `title` is `"foo"`.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.context.coordinator().with_data(title_is_on)
    }

    /// Writes [`TITLE_ON`] and refreshes.
    ///
    /// # Errors
    ///
    /// Returns the API error if the write fails; no refresh is requested
    /// in that case.
    pub async fn turn_on(&self) -> Result<()> {
        self.write_title(TITLE_ON).await
    }

    /// Writes [`TITLE_OFF`] and refreshes.
    ///
    /// # Errors
    ///
    /// Returns the API error if the write fails.
    pub async fn turn_off(&self) -> Result<()> {
        self.write_title(TITLE_OFF).await
    }

    /// Dispatches a command.
    ///
    /// # Errors
    ///
    /// Returns the API error if the write fails.
    pub async fn handle_command(&self, command: EntityCommand) -> Result<()> {
        match command {
            EntityCommand::TurnOn => self.turn_on().await,
            EntityCommand::TurnOff => self.turn_off().await,
            EntityCommand::Toggle if self.is_on() => self.turn_off().await,
            EntityCommand::Toggle => self.turn_on().await,
        }
    }

    async fn write_title(&self, value: &str) -> Result<()> {
        let coordinator = self.context.coordinator();
        debug!(entry_id = %coordinator.entry_id(), value, "Writing title");

        coordinator.api().mutate_title(value).await?;
        coordinator.request_refresh().await;
        Ok(())
    }
}

impl<A: PowerOceanApi> Entity for PowerOceanSwitch<A> {
    fn description(&self) -> &EntityDescription {
        &self.description
    }

    fn platform(&self) -> Platform {
        Platform::Switch
    }

    fn unique_id(&self) -> String {
        self.context.unique_id(Platform::Switch, &self.description)
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
