// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Config entries and their lifecycle.
//!
//! A [`ConfigEntry`] is what the host persists after the config flow.
//! [`LoadedEntry::setup`] turns it into a running integration and
//! [`LoadedEntry::unload`] tears it down again:
//!
//! ```text
//! ConfigEntry --setup--> LoadedEntry --unload--> (dropped)
//!                            |   ^
//!                            +---+ reload
//! ```

mod data;
mod loaded;

pub use data::{ConfigEntry, EntryData};
pub use loaded::LoadedEntry;
