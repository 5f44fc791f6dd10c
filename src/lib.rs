// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `PowerOcean` Lib - A Rust library to integrate EcoFlow `PowerOcean` systems.
//!
//! This library wires the EcoFlow cloud API into a home-automation host:
//! an async API client, a poll coordinator that caches the last result,
//! and entity adapters that read that cache and write through the client.
//!
//! # Components
//!
//! - **API client** ([`api`]): login, status fetch and a title write, each
//!   bounded by a timeout and mapped onto three error kinds
//! - **Coordinator** ([`coordinator`]): hourly polling, on-demand refresh,
//!   failure bookkeeping
//! - **Entities** ([`entity`]): a sensor, a binary sensor and a switch
//! - **Config flow** ([`config_flow`]) and **entry lifecycle** ([`entry`])
//! - **Events** ([`event`]): load, update and failure notifications
//!
//! # Quick Start
//!
//! ```no_run
//! use powerocean_lib::api::ApiConfig;
//! use powerocean_lib::coordinator::CoordinatorConfig;
//! use powerocean_lib::entity::{Entity, EntityCommand};
//! use powerocean_lib::entry::{ConfigEntry, EntryData, LoadedEntry};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let entry = ConfigEntry::new(EntryData::new(
//!         "HJ31ZDH4ZF560098",
//!         "user@example.com",
//!         "hunter2",
//!     ));
//!     let loaded = LoadedEntry::setup(entry, ApiConfig::new(), CoordinatorConfig::new()).await?;
//!
//!     let mut events = loaded.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {event:?}");
//!         }
//!     });
//!
//!     if let Some(switch) = loaded.entities().switch("status_switch") {
//!         switch.handle_command(EntityCommand::Toggle).await?;
//!         println!("{} is now {:?}", switch.name(), switch.state());
//!     }
//!
//!     loaded.unload().await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config_flow;
pub mod coordinator;
pub mod entity;
pub mod entry;
pub mod error;
pub mod event;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{ApiClient, ApiConfig, Credentials, Endpoints, PowerOceanApi};
pub use config_flow::{ConfigFlow, FlowError, FlowResult};
pub use coordinator::{Coordinator, CoordinatorConfig, CoordinatorSnapshot, UpdateStatus};
pub use entity::{Entity, EntityCommand, EntitySet, EntityState, Platform};
pub use entry::{ConfigEntry, EntryData, LoadedEntry};
pub use error::{CoordinatorError, Error, Result, SetupError};
pub use event::{EntryEvent, EntryId, EventBus};

/// Integration domain; first half of every device identifier.
pub const DOMAIN: &str = "powerocean";

/// Attribution line shown on every entity.
pub const ATTRIBUTION: &str = "Data provided by http://jsonplaceholder.typicode.com/";

/// Device manufacturer.
pub const MANUFACTURER: &str = "EcoFlow";

/// Device model.
pub const MODEL: &str = "PowerOcean";
