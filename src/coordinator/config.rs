// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Coordinator configuration.

use std::time::Duration;

/// Polling settings for a [`Coordinator`](super::Coordinator).
///
/// # Examples
///
/// ```
/// use powerocean_lib::coordinator::CoordinatorConfig;
/// use std::time::Duration;
///
/// let config = CoordinatorConfig::new()
///     .with_update_interval(Duration::from_secs(300))
///     .with_failure_threshold(3);
/// assert_eq!(config.failure_threshold(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorConfig {
    update_interval: Duration,
    failure_threshold: u32,
}

impl CoordinatorConfig {
    /// Default time between two scheduled polls.
    pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(60 * 60);
    /// Default number of consecutive failed polls before the update is flagged.
    pub const DEFAULT_FAILURE_THRESHOLD: u32 = 1;

    const MIN_UPDATE_INTERVAL: Duration = Duration::from_millis(1);

    /// Creates a configuration with the default hourly interval.
    #[must_use]
    pub fn new() -> Self {
        Self {
            update_interval: Self::DEFAULT_UPDATE_INTERVAL,
            failure_threshold: Self::DEFAULT_FAILURE_THRESHOLD,
        }
    }

    /// Sets the polling interval. Zero is raised to one millisecond.
    #[must_use]
    pub fn with_update_interval(mut self, interval: Duration) -> Self {
        self.update_interval = interval.max(Self::MIN_UPDATE_INTERVAL);
        self
    }

    /// Sets how many consecutive transient failures flag the update as failed.
    ///
    /// Until the threshold is reached the stale result keeps being served
    /// and the previous status is kept. Zero is raised to one.
    #[must_use]
    pub fn with_failure_threshold(mut self, threshold: u32) -> Self {
        self.failure_threshold = threshold.max(1);
        self
    }

    /// Returns the polling interval.
    #[must_use]
    pub fn update_interval(&self) -> Duration {
        self.update_interval
    }

    /// Returns the failure threshold.
    #[must_use]
    pub fn failure_threshold(&self) -> u32 {
        self.failure_threshold
    }
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self::new()
    }
}
