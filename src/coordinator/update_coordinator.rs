// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Poll-and-cache coordinator.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tokio::sync::{Mutex, watch};
use tracing::{debug, error, warn};

use crate::api::PowerOceanApi;
use crate::error::{CoordinatorError, Error};
use crate::event::{EntryEvent, EntryId, EventBus};

use super::{CoordinatorConfig, CoordinatorSnapshot, PollHandle, UpdateStatus};

/// What a scheduled tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// A poll ran with the given result.
    Polled(Result<(), CoordinatorError>),
    /// Another poll was already in flight.
    SkippedInFlight,
    /// Credentials were rejected earlier; waiting for re-authentication.
    SkippedAuthFailed,
}

/// Polls the API and caches the last successful result for one entry.
///
/// The coordinator is the only writer of the cached result. At most one
/// poll runs at a time: explicit refreshes queue behind an in-flight poll,
/// scheduled ticks are dropped while one is in flight.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use powerocean_lib::api::{ApiClient, ApiConfig, Credentials};
/// use powerocean_lib::coordinator::{Coordinator, CoordinatorConfig};
/// use powerocean_lib::event::{EntryId, EventBus};
///
/// # async fn example() -> powerocean_lib::Result<()> {
/// let credentials = Credentials::new("HJ31ZDH4ZF560098", "user@example.com", "hunter2");
/// let client = Arc::new(ApiClient::new(credentials, ApiConfig::new())?);
/// let coordinator = Arc::new(Coordinator::new(
///     EntryId::new(),
///     client,
///     CoordinatorConfig::new(),
///     EventBus::new(),
/// ));
///
/// if coordinator.refresh().await.is_ok() {
///     println!("{:?}", coordinator.data());
/// }
/// let polling = coordinator.spawn_polling();
/// // ...
/// polling.stop().await;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Coordinator<A: PowerOceanApi> {
    entry_id: EntryId,
    api: Arc<A>,
    config: CoordinatorConfig,
    state: watch::Sender<CoordinatorSnapshot>,
    poll_gate: Mutex<()>,
    events: EventBus,
}

impl<A: PowerOceanApi> Coordinator<A> {
    /// Creates a coordinator with an empty cache.
    #[must_use]
    pub fn new(entry_id: EntryId, api: Arc<A>, config: CoordinatorConfig, events: EventBus) -> Self {
        let (state, _) = watch::channel(CoordinatorSnapshot::default());
        Self {
            entry_id,
            api,
            config,
            state,
            poll_gate: Mutex::new(()),
            events,
        }
    }

    /// Returns the entry this coordinator polls for.
    #[must_use]
    pub fn entry_id(&self) -> EntryId {
        self.entry_id
    }

    /// Returns the API used for polling and writes.
    #[must_use]
    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    /// Returns the polling configuration.
    #[must_use]
    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// Returns the event bus poll outcomes are published on.
    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Returns a copy of the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> CoordinatorSnapshot {
        self.state.borrow().clone()
    }

    /// Returns a copy of the cached result.
    #[must_use]
    pub fn data(&self) -> Option<Value> {
        self.state.borrow().data.clone()
    }

    /// Runs `f` against the cached result without cloning it.
    pub fn with_data<R>(&self, f: impl FnOnce(Option<&Value>) -> R) -> R {
        let snapshot = self.state.borrow();
        f(snapshot.data.as_ref())
    }

    /// Returns `true` if the last poll succeeded.
    #[must_use]
    pub fn last_update_success(&self) -> bool {
        self.state.borrow().last_update_success()
    }

    /// Watches snapshot changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CoordinatorSnapshot> {
        self.state.subscribe()
    }

    /// Polls now.
    ///
    /// Waits for an in-flight poll to finish first, so the fetch issued here
    /// always starts after the call.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinatorError::AuthFailed`] if the credentials were
    /// rejected and [`CoordinatorError::UpdateFailed`] for any other failure.
    /// The failure is also recorded in the snapshot.
    pub async fn refresh(&self) -> Result<(), CoordinatorError> {
        let _gate = self.poll_gate.lock().await;
        self.poll().await
    }

    /// Polls now, on behalf of an entity that just wrote a value.
    ///
    /// Failures are recorded in the snapshot and published; they are not
    /// returned to the caller.
    pub async fn request_refresh(&self) {
        if let Err(err) = self.refresh().await {
            debug!(entry_id = %self.entry_id, error = %err, "Refresh after write failed");
        }
    }

    /// First poll of a freshly set up entry.
    ///
    /// # Errors
    ///
    /// Same as [`refresh`](Self::refresh); the setup path turns the error
    /// into "auth failed" or "not ready".
    pub async fn first_refresh(&self) -> Result<(), CoordinatorError> {
        debug!(entry_id = %self.entry_id, "Running first refresh");
        self.refresh().await
    }

    /// Scheduled poll.
    ///
    /// Skipped while a poll is in flight, and while the credentials are
    /// rejected (authentication failures are never retried on a timer).
    pub async fn tick(&self) -> TickOutcome {
        let auth_failed = self.state.borrow().status.is_auth_failed();
        if auth_failed {
            debug!(entry_id = %self.entry_id, "Skipping scheduled poll until re-authentication");
            return TickOutcome::SkippedAuthFailed;
        }

        let Ok(_gate) = self.poll_gate.try_lock() else {
            debug!(entry_id = %self.entry_id, "Poll already in flight, skipping tick");
            return TickOutcome::SkippedInFlight;
        };

        TickOutcome::Polled(self.poll().await)
    }

    /// Starts the background task calling [`tick`](Self::tick) every
    /// `update_interval`. The first tick fires one interval from now.
    #[must_use]
    pub fn spawn_polling(self: &Arc<Self>) -> PollHandle {
        PollHandle::spawn(Arc::clone(self))
    }

    async fn poll(&self) -> Result<(), CoordinatorError> {
        debug!(entry_id = %self.entry_id, "Polling status endpoint");

        match self.api.fetch().await {
            Ok(data) => {
                self.record_success(data);
                Ok(())
            }
            Err(err) => Err(self.record_failure(err)),
        }
    }

    fn record_success(&self, data: Value) {
        self.state.send_modify(|snapshot| {
            snapshot.data = Some(data);
            snapshot.status = UpdateStatus::Ok;
            snapshot.last_updated = Some(Utc::now());
            snapshot.consecutive_failures = 0;
        });
        debug!(entry_id = %self.entry_id, "Status updated");
        self.events.publish(EntryEvent::updated(self.entry_id));
    }

    fn record_failure(&self, err: Error) -> CoordinatorError {
        let api_error = err.clone();
        let outcome = CoordinatorError::from(err);

        match &outcome {
            CoordinatorError::AuthFailed(reason) => {
                warn!(entry_id = %self.entry_id, %reason, "Credentials rejected, re-authentication required");
                self.state.send_modify(|snapshot| {
                    snapshot.status = UpdateStatus::AuthFailed(reason.clone());
                });
                self.events
                    .publish(EntryEvent::reauth_required(self.entry_id, reason.clone()));
            }
            CoordinatorError::UpdateFailed(reason) => {
                let threshold = self.config.failure_threshold();
                let mut flagged = false;
                self.state.send_modify(|snapshot| {
                    snapshot.consecutive_failures = snapshot.consecutive_failures.saturating_add(1);
                    if snapshot.consecutive_failures >= threshold {
                        snapshot.status = UpdateStatus::UpdateFailed(reason.clone());
                        flagged = true;
                    }
                });

                if flagged {
                    if matches!(api_error, Error::Api(_)) {
                        error!(entry_id = %self.entry_id, error = ?api_error, "Unexpected error while polling");
                    } else {
                        error!(entry_id = %self.entry_id, %reason, "Update failed");
                    }
                    self.events
                        .publish(EntryEvent::update_failed(self.entry_id, reason.clone()));
                } else {
                    debug!(entry_id = %self.entry_id, %reason, "Poll failed, serving stale data");
                }
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::testing::StubApi;

    fn coordinator(api: StubApi) -> Arc<Coordinator<StubApi>> {
        Arc::new(Coordinator::new(
            EntryId::new(),
            Arc::new(api),
            CoordinatorConfig::new(),
            EventBus::new(),
        ))
    }

    #[tokio::test]
    async fn refresh_caches_result() {
        let coordinator = coordinator(StubApi::with_title("foo"));
        assert!(coordinator.data().is_none());

        coordinator.refresh().await.unwrap();

        let snapshot = coordinator.snapshot();
        assert_eq!(snapshot.status, UpdateStatus::Ok);
        assert_eq!(snapshot.data.unwrap()["title"], "foo");
        assert!(snapshot.last_updated.is_some());
        assert!(coordinator.last_update_success());
    }

    #[tokio::test]
    async fn auth_failure_is_flagged_and_keeps_data() {
        let coordinator = coordinator(StubApi::with_title("foo"));
        coordinator.refresh().await.unwrap();

        coordinator
            .api()
            .fail_next_fetch(Error::Authentication("HTTP 403".into()));
        let err = coordinator.refresh().await.unwrap_err();

        assert_eq!(err, CoordinatorError::AuthFailed("HTTP 403".into()));
        let snapshot = coordinator.snapshot();
        assert!(snapshot.status.is_auth_failed());
        assert_eq!(snapshot.data.unwrap()["title"], "foo");
        assert!(!coordinator.last_update_success());
    }

    #[tokio::test]
    async fn transient_failure_is_flagged_as_update_failed() {
        let coordinator = coordinator(StubApi::with_title("foo"));
        coordinator.refresh().await.unwrap();

        coordinator
            .api()
            .fail_next_fetch(Error::Communication("timed out".into()));
        let err = coordinator.refresh().await.unwrap_err();

        assert!(matches!(err, CoordinatorError::UpdateFailed(_)));
        let snapshot = coordinator.snapshot();
        assert!(snapshot.status.is_update_failed());
        assert_eq!(snapshot.consecutive_failures, 1);
        assert!(snapshot.data.is_some());
    }

    #[tokio::test]
    async fn failures_below_threshold_keep_status() {
        let coordinator = Arc::new(Coordinator::new(
            EntryId::new(),
            Arc::new(StubApi::with_title("foo")),
            CoordinatorConfig::new().with_failure_threshold(3),
            EventBus::new(),
        ));
        coordinator.refresh().await.unwrap();

        for _ in 0..2 {
            coordinator
                .api()
                .fail_next_fetch(Error::Communication("reset".into()));
            assert!(coordinator.refresh().await.is_err());
        }
        assert!(coordinator.snapshot().status.is_ok());
        assert_eq!(coordinator.snapshot().consecutive_failures, 2);

        coordinator
            .api()
            .fail_next_fetch(Error::Api("bad json".into()));
        assert!(coordinator.refresh().await.is_err());
        assert!(coordinator.snapshot().status.is_update_failed());

        coordinator.refresh().await.unwrap();
        assert!(coordinator.snapshot().status.is_ok());
        assert_eq!(coordinator.snapshot().consecutive_failures, 0);
    }

    #[tokio::test]
    async fn tick_is_skipped_while_auth_failed() {
        let coordinator = coordinator(StubApi::with_title("foo"));
        coordinator
            .api()
            .fail_next_fetch(Error::Authentication("HTTP 401".into()));
        assert!(coordinator.refresh().await.is_err());

        assert_eq!(coordinator.tick().await, TickOutcome::SkippedAuthFailed);
        assert_eq!(coordinator.api().fetch_calls(), 1);

        // An explicit refresh still goes through and clears the flag.
        coordinator.refresh().await.unwrap();
        assert_eq!(coordinator.tick().await, TickOutcome::Polled(Ok(())));
        assert_eq!(coordinator.api().fetch_calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn tick_is_skipped_while_poll_in_flight() {
        let coordinator =
            coordinator(StubApi::with_title("foo").with_fetch_delay(Duration::from_secs(1)));

        let in_flight = {
            let coordinator = Arc::clone(&coordinator);
            tokio::spawn(async move { coordinator.refresh().await })
        };
        tokio::task::yield_now().await;

        assert_eq!(coordinator.tick().await, TickOutcome::SkippedInFlight);

        in_flight.await.unwrap().unwrap();
        assert_eq!(coordinator.api().fetch_calls(), 1);
    }

    #[tokio::test]
    async fn events_follow_poll_outcomes() {
        let coordinator = coordinator(StubApi::with_title("foo"));
        let mut events = coordinator.events().subscribe();
        let entry_id = coordinator.entry_id();

        coordinator.refresh().await.unwrap();
        assert_eq!(events.recv().await.unwrap(), EntryEvent::updated(entry_id));

        coordinator
            .api()
            .fail_next_fetch(Error::Authentication("HTTP 403".into()));
        let _ = coordinator.refresh().await;
        assert_eq!(
            events.recv().await.unwrap(),
            EntryEvent::reauth_required(entry_id, "HTTP 403")
        );
    }

    #[tokio::test]
    async fn subscribers_see_new_snapshots() {
        let coordinator = coordinator(StubApi::with_title("bar"));
        let mut rx = coordinator.subscribe();

        coordinator.refresh().await.unwrap();

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().data.as_ref().unwrap()["title"], "bar");
    }

    #[tokio::test]
    async fn with_data_reads_without_clone() {
        let coordinator = coordinator(StubApi::with_title("foo"));
        assert!(coordinator.with_data(|data| data.is_none()));

        coordinator.refresh().await.unwrap();
        let title = coordinator.with_data(|data| {
            data.and_then(|d| d["title"].as_str()).map(str::to_string)
        });
        assert_eq!(title.as_deref(), Some("foo"));
    }
}
