// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State shared by every entity of an entry.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::api::PowerOceanApi;
use crate::coordinator::Coordinator;
use crate::{DOMAIN, MANUFACTURER, MODEL};

use super::{DeviceInfo, EntityDescription, Platform};

/// Coordinator handle plus the entry metadata entities derive their
/// identity from.
pub struct EntityContext<A: PowerOceanApi> {
    coordinator: Arc<Coordinator<A>>,
    entry_title: String,
}

impl<A: PowerOceanApi> EntityContext<A> {
    /// Creates a context for the entry polled by `coordinator`.
    #[must_use]
    pub fn new(coordinator: Arc<Coordinator<A>>, entry_title: impl Into<String>) -> Self {
        Self {
            coordinator,
            entry_title: entry_title.into(),
        }
    }

    /// Returns the coordinator.
    #[must_use]
    pub fn coordinator(&self) -> &Arc<Coordinator<A>> {
        &self.coordinator
    }

    /// `{entry_id}_{platform}_{key}`.
    #[must_use]
    pub fn unique_id(&self, platform: Platform, description: &EntityDescription) -> String {
        format!(
            "{}_{}_{}",
            self.coordinator.entry_id(),
            platform.as_str(),
            description.key
        )
    }

    /// Entities are available while the last poll succeeded.
    #[must_use]
    pub fn available(&self) -> bool {
        self.coordinator.last_update_success()
    }

    /// Device the entities are grouped under.
    #[must_use]
    pub fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            identifiers: (DOMAIN.to_string(), self.coordinator.entry_id().to_string()),
            name: self.entry_title.clone(),
            manufacturer: MANUFACTURER,
            model: MODEL,
        }
    }

    /// Reads one top-level field of the cached result.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<Value> {
        self.coordinator
            .with_data(|data| data.and_then(|d| d.get(name)).cloned())
    }
}

impl<A: PowerOceanApi> Clone for EntityContext<A> {
    fn clone(&self) -> Self {
        Self {
            coordinator: Arc::clone(&self.coordinator),
            entry_title: self.entry_title.clone(),
        }
    }
}

impl<A: PowerOceanApi> fmt::Debug for EntityContext<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityContext")
            .field("entry_id", &self.coordinator.entry_id())
            .field("entry_title", &self.entry_title)
            .finish_non_exhaustive()
    }
}
