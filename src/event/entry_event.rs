// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entry event types.

use super::EntryId;

/// Events emitted for a config entry.
///
/// Hosts listen to these to re-render entities after a poll, to start a
/// re-authentication flow, or to surface a failed update.
///
/// # Examples
///
/// ```
/// use powerocean_lib::event::{EntryEvent, EntryId};
///
/// let entry_id = EntryId::new();
/// let event = EntryEvent::reauth_required(entry_id, "HTTP 403");
/// assert!(event.is_failure());
/// assert_eq!(event.entry_id(), entry_id);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryEvent {
    /// The entry finished setting up.
    Loaded {
        /// The entry.
        entry_id: EntryId,
    },

    /// The entry was unloaded.
    Unloaded {
        /// The entry.
        entry_id: EntryId,
    },

    /// A poll succeeded and the cached result was replaced.
    Updated {
        /// The entry.
        entry_id: EntryId,
    },

    /// The credentials were rejected; the host should ask for new ones.
    ReauthRequired {
        /// The entry.
        entry_id: EntryId,
        /// Reason reported by the API client.
        reason: String,
    },

    /// Polling failed often enough to mark the entry as failing.
    UpdateFailed {
        /// The entry.
        entry_id: EntryId,
        /// Reason reported by the API client.
        reason: String,
    },
}

impl EntryEvent {
    /// Returns the entry this event belongs to.
    #[must_use]
    pub fn entry_id(&self) -> EntryId {
        match self {
            Self::Loaded { entry_id }
            | Self::Unloaded { entry_id }
            | Self::Updated { entry_id }
            | Self::ReauthRequired { entry_id, .. }
            | Self::UpdateFailed { entry_id, .. } => *entry_id,
        }
    }

    /// Returns `true` for load/unload events.
    #[must_use]
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, Self::Loaded { .. } | Self::Unloaded { .. })
    }

    /// Returns `true` for either failure outcome.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::ReauthRequired { .. } | Self::UpdateFailed { .. }
        )
    }

    /// Creates a loaded event.
    #[must_use]
    pub fn loaded(entry_id: EntryId) -> Self {
        Self::Loaded { entry_id }
    }

    /// Creates an unloaded event.
    #[must_use]
    pub fn unloaded(entry_id: EntryId) -> Self {
        Self::Unloaded { entry_id }
    }

    /// Creates an updated event.
    #[must_use]
    pub fn updated(entry_id: EntryId) -> Self {
        Self::Updated { entry_id }
    }

    /// Creates a re-authentication event.
    #[must_use]
    pub fn reauth_required(entry_id: EntryId, reason: impl Into<String>) -> Self {
        Self::ReauthRequired {
            entry_id,
            reason: reason.into(),
        }
    }

    /// Creates an update failed event.
    #[must_use]
    pub fn update_failed(entry_id: EntryId, reason: impl Into<String>) -> Self {
        Self::UpdateFailed {
            entry_id,
            reason: reason.into(),
        }
    }
}
