// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Background task driving scheduled polls.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{Instrument, debug, info_span, warn};

use crate::api::PowerOceanApi;

use super::{Coordinator, TickOutcome};

/// Handle to a running poll task.
///
/// Call [`stop`](Self::stop) to shut the task down and wait for it.
/// Dropping the handle aborts the task.
#[derive(Debug)]
pub struct PollHandle {
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    pub(crate) fn spawn<A: PowerOceanApi>(coordinator: Arc<Coordinator<A>>) -> Self {
        let (shutdown, mut shutdown_rx) = watch::channel(false);
        let period = coordinator.config().update_interval();
        let span = info_span!("poll", entry_id = %coordinator.entry_id());

        let task = tokio::spawn(
            async move {
                let mut interval = time::interval_at(Instant::now() + period, period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
                debug!(?period, "Poll task started");

                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            if let TickOutcome::Polled(Err(err)) = coordinator.tick().await {
                                debug!(error = %err, "Scheduled poll failed");
                            }
                        }
                        changed = shutdown_rx.changed() => {
                            if changed.is_err() || *shutdown_rx.borrow() {
                                break;
                            }
                        }
                    }
                }

                debug!("Poll task stopped");
            }
            .instrument(span),
        );

        Self {
            shutdown,
            task: Some(task),
        }
    }

    /// Returns `true` while the task is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Signals the task to stop and waits for it to finish.
    pub async fn stop(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                warn!(error = %err, "Poll task ended abnormally");
            }
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
