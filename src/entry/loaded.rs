// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Runtime data of a set-up entry.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::api::{ApiClient, ApiConfig, Credentials, PowerOceanApi};
use crate::coordinator::{Coordinator, CoordinatorConfig, PollHandle};
use crate::entity::EntitySet;
use crate::error::{Error, SetupError};
use crate::event::{EntryEvent, EntryId, EventBus};

use super::ConfigEntry;

/// A config entry with its client, coordinator, poll task and entities.
///
/// Everything here is created by [`setup`](Self::setup) and discarded
/// together by [`unload`](Self::unload).
///
/// # Examples
///
/// ```no_run
/// use powerocean_lib::api::ApiConfig;
/// use powerocean_lib::coordinator::CoordinatorConfig;
/// use powerocean_lib::entry::{ConfigEntry, EntryData, LoadedEntry};
///
/// # async fn example() -> Result<(), powerocean_lib::error::SetupError> {
/// let entry = ConfigEntry::new(EntryData::new("HJ31ZDH4ZF560098", "user@example.com", "hunter2"));
/// let loaded = LoadedEntry::setup(entry, ApiConfig::new(), CoordinatorConfig::new()).await?;
///
/// for entity in loaded.entities().entities() {
///     println!("{}: {:?}", entity.unique_id(), entity.state());
/// }
///
/// loaded.unload().await;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct LoadedEntry<A: PowerOceanApi = ApiClient> {
    entry: ConfigEntry,
    coordinator: Arc<Coordinator<A>>,
    entities: EntitySet<A>,
    polling: PollHandle,
    events: EventBus,
}

impl LoadedEntry<ApiClient> {
    /// Sets up an entry against the cloud API.
    ///
    /// # Errors
    ///
    /// - [`SetupError::Client`] if the HTTP client cannot be created
    /// - [`SetupError::AuthFailed`] if the stored credentials are rejected
    /// - [`SetupError::NotReady`] if the cloud cannot be reached
    pub async fn setup(
        entry: ConfigEntry,
        api_config: ApiConfig,
        coordinator_config: CoordinatorConfig,
    ) -> Result<Self, SetupError> {
        Self::setup_with_events(entry, api_config, coordinator_config, EventBus::new()).await
    }

    /// Like [`setup`](Self::setup), publishing on an existing bus.
    ///
    /// # Errors
    ///
    /// Same as [`setup`](Self::setup).
    pub async fn setup_with_events(
        entry: ConfigEntry,
        api_config: ApiConfig,
        coordinator_config: CoordinatorConfig,
        events: EventBus,
    ) -> Result<Self, SetupError> {
        let api = ApiClient::new(Credentials::from(&entry.data), api_config)?;
        Self::setup_with_api(entry, Arc::new(api), coordinator_config, events).await
    }

    /// Unloads the entry and sets it up again with a fresh client.
    ///
    /// # Errors
    ///
    /// Same as [`setup`](Self::setup).
    pub async fn reload(self) -> Result<Self, SetupError> {
        let entry = self.entry.clone();
        let api_config = self.coordinator.api().config().clone();
        let coordinator_config = *self.coordinator.config();
        let events = self.events.clone();

        tracing::debug!(entry_id = %entry.entry_id, "Reloading entry");
        self.unload().await;
        Self::setup_with_events(entry, api_config, coordinator_config, events).await
    }
}

impl<A: PowerOceanApi> LoadedEntry<A> {
    /// Sets up an entry against any API implementation.
    ///
    /// Authorizes, performs the first poll, starts scheduled polling and
    /// builds the entities. Publishes [`EntryEvent::Loaded`] on success.
    ///
    /// # Errors
    ///
    /// [`SetupError::AuthFailed`] if the credentials are rejected, either
    /// at login or on the first poll. [`SetupError::NotReady`] for any other
    /// failure of either call.
    pub async fn setup_with_api(
        entry: ConfigEntry,
        api: Arc<A>,
        coordinator_config: CoordinatorConfig,
        events: EventBus,
    ) -> Result<Self, SetupError> {
        let entry_id = entry.entry_id;
        tracing::debug!(%entry_id, device_id = %entry.data.device_id, "Setting up entry");

        api.authorize().await.map_err(|err| match err {
            Error::Authentication(message) => SetupError::AuthFailed(message),
            other => SetupError::NotReady(other.to_string()),
        })?;

        let coordinator = Arc::new(Coordinator::new(
            entry_id,
            api,
            coordinator_config,
            events.clone(),
        ));
        coordinator.first_refresh().await?;

        let polling = coordinator.spawn_polling();
        let entities = EntitySet::for_coordinator(&coordinator, &entry.title);

        tracing::info!(%entry_id, entities = entities.len(), "Entry loaded");
        events.publish(EntryEvent::loaded(entry_id));

        Ok(Self {
            entry,
            coordinator,
            entities,
            polling,
            events,
        })
    }

    /// Stops polling and drops the runtime data.
    ///
    /// Always returns `true`; there is nothing here that can refuse to
    /// unload.
    pub async fn unload(self) -> bool {
        let entry_id = self.entry.entry_id;
        self.polling.stop().await;
        self.events.publish(EntryEvent::unloaded(entry_id));
        tracing::info!(%entry_id, "Entry unloaded");
        true
    }

    /// Returns the entry id.
    #[must_use]
    pub fn entry_id(&self) -> EntryId {
        self.entry.entry_id
    }

    /// Returns the persisted entry this runtime was built from.
    #[must_use]
    pub fn entry(&self) -> &ConfigEntry {
        &self.entry
    }

    /// Returns the coordinator polling for this entry.
    #[must_use]
    pub fn coordinator(&self) -> &Arc<Coordinator<A>> {
        &self.coordinator
    }

    /// Returns the API shared by the coordinator and the switch.
    #[must_use]
    pub fn api(&self) -> &Arc<A> {
        self.coordinator.api()
    }

    /// Returns the entities of every platform.
    #[must_use]
    pub fn entities(&self) -> &EntitySet<A> {
        &self.entities
    }

    /// Returns the bus lifecycle and poll events are published on.
    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Returns `true` while scheduled polling is running.
    #[must_use]
    pub fn is_polling(&self) -> bool {
        self.polling.is_running()
    }

    /// Subscribes to events of this entry.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<EntryEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Entity, EntityState};
    use crate::entry::EntryData;
    use crate::testing::StubApi;

    fn entry() -> ConfigEntry {
        ConfigEntry::new(EntryData::new("HJ31", "user@example.com", "pw"))
    }

    async fn setup(api: StubApi, events: EventBus) -> Result<LoadedEntry<StubApi>, SetupError> {
        LoadedEntry::setup_with_api(entry(), Arc::new(api), CoordinatorConfig::new(), events).await
    }

    #[tokio::test]
    async fn setup_polls_once_and_builds_entities() {
        let events = EventBus::new();
        let mut rx = events.subscribe();

        let loaded = setup(StubApi::with_title("foo"), events).await.unwrap();

        assert_eq!(loaded.api().fetch_calls(), 1);
        assert!(loaded.is_polling());
        assert_eq!(loaded.entities().len(), 3);
        assert_eq!(
            loaded.entities().binary_sensors()[0].state(),
            EntityState::On
        );

        assert_eq!(rx.recv().await.unwrap(), EntryEvent::updated(loaded.entry_id()));
        assert_eq!(rx.recv().await.unwrap(), EntryEvent::loaded(loaded.entry_id()));

        loaded.unload().await;
    }

    #[tokio::test]
    async fn rejected_login_is_auth_failed() {
        let api = StubApi::with_title("foo");
        api.fail_authorize(Error::Authentication("HTTP 401".into()));

        let err = setup(api, EventBus::new()).await.unwrap_err();

        assert_eq!(err, SetupError::AuthFailed("HTTP 401".into()));
    }

    #[tokio::test]
    async fn unreachable_login_is_not_ready() {
        let api = StubApi::with_title("foo");
        api.fail_authorize(Error::Communication("connection refused".into()));

        let err = setup(api, EventBus::new()).await.unwrap_err();

        assert!(matches!(err, SetupError::NotReady(_)));
    }

    #[tokio::test]
    async fn failed_first_poll_is_not_ready() {
        let api = StubApi::with_title("foo");
        api.fail_next_fetch(Error::Communication("HTTP 502".into()));

        let err = setup(api, EventBus::new()).await.unwrap_err();

        assert!(matches!(err, SetupError::NotReady(_)));
    }

    #[tokio::test]
    async fn rejected_first_poll_is_auth_failed() {
        let api = StubApi::with_title("foo");
        api.fail_next_fetch(Error::Authentication("HTTP 403".into()));

        let err = setup(api, EventBus::new()).await.unwrap_err();

        assert_eq!(err, SetupError::AuthFailed("HTTP 403".into()));
    }

    #[tokio::test]
    async fn unload_stops_polling_and_publishes() {
        let loaded = setup(StubApi::with_title("foo"), EventBus::new())
            .await
            .unwrap();
        let entry_id = loaded.entry_id();
        let mut rx = loaded.subscribe();
        let coordinator = Arc::clone(loaded.coordinator());

        assert!(loaded.unload().await);

        assert_eq!(rx.recv().await.unwrap(), EntryEvent::unloaded(entry_id));
        // Only the entry's clones of the coordinator are gone.
        assert_eq!(Arc::strong_count(&coordinator), 1);
    }
}
