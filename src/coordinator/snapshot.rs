// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cached poll result and update status.

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Outcome of the most recent poll, as the host sees it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UpdateStatus {
    /// No poll has completed yet.
    #[default]
    Pending,
    /// The last poll succeeded.
    Ok,
    /// The credentials were rejected. Scheduled polls are suspended until
    /// an explicit refresh succeeds.
    AuthFailed(String),
    /// Polling failed at least `failure_threshold` times in a row.
    UpdateFailed(String),
}

impl UpdateStatus {
    /// Returns `true` if the last poll succeeded.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Returns `true` if re-authentication is required.
    #[must_use]
    pub fn is_auth_failed(&self) -> bool {
        matches!(self, Self::AuthFailed(_))
    }

    /// Returns `true` if the update is flagged as failed.
    #[must_use]
    pub fn is_update_failed(&self) -> bool {
        matches!(self, Self::UpdateFailed(_))
    }
}

/// Everything the coordinator knows about the entry.
///
/// `data` is replaced wholesale on every successful poll and kept as is
/// when a poll fails.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoordinatorSnapshot {
    /// Last successfully fetched payload.
    pub data: Option<Value>,
    /// Outcome of the most recent poll.
    pub status: UpdateStatus,
    /// When `data` was last replaced.
    pub last_updated: Option<DateTime<Utc>>,
    /// Transient failures since the last success.
    pub consecutive_failures: u32,
}

impl CoordinatorSnapshot {
    /// Returns `true` if the last poll succeeded.
    #[must_use]
    pub fn last_update_success(&self) -> bool {
        self.status.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_snapshot_is_pending_and_empty() {
        let snapshot = CoordinatorSnapshot::default();
        assert_eq!(snapshot.status, UpdateStatus::Pending);
        assert!(snapshot.data.is_none());
        assert!(!snapshot.last_update_success());
    }

    #[test]
    fn status_predicates() {
        assert!(UpdateStatus::Ok.is_ok());
        assert!(UpdateStatus::AuthFailed("HTTP 401".into()).is_auth_failed());
        assert!(UpdateStatus::UpdateFailed("timeout".into()).is_update_failed());
        assert!(!UpdateStatus::Pending.is_ok());
    }
}
