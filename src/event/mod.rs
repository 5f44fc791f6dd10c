// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for config entries.
//!
//! The coordinator publishes an [`EntryEvent`] after every poll outcome that
//! the host has to react to, and the entry lifecycle publishes load/unload
//! events. The [`EventBus`] uses tokio's broadcast channel so that several
//! listeners can follow the same entry.
//!
//! # Examples
//!
//! ```
//! use powerocean_lib::event::{EntryEvent, EntryId, EventBus};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! let entry_id = EntryId::new();
//! bus.publish(EntryEvent::updated(entry_id));
//! ```

mod entry_event;
mod entry_id;
mod event_bus;

pub use entry_event::EntryEvent;
pub use entry_id::EntryId;
pub use event_bus::EventBus;
