// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Poll coordinator.
//!
//! The [`Coordinator`] calls the API's `fetch()` on a fixed interval (one
//! hour by default), keeps the last successful result, and maps client
//! failures onto the two outcomes a host reacts to:
//!
//! - authentication failure: flagged as [`UpdateStatus::AuthFailed`], not
//!   retried by the timer
//! - any other failure: flagged as [`UpdateStatus::UpdateFailed`] once
//!   `failure_threshold` consecutive polls failed; the stale result stays
//!   readable
//!
//! ```text
//! Idle --(tick / refresh)--> Polling --ok--------> Idle { data = new }
//!                                    --auth------> Idle { AuthFailed }
//!                                    --other-----> Idle { UpdateFailed }
//! ```

mod config;
mod poll_task;
mod snapshot;
mod update_coordinator;

pub use config::CoordinatorConfig;
pub use poll_task::PollHandle;
pub use snapshot::{CoordinatorSnapshot, UpdateStatus};
pub use update_coordinator::{Coordinator, TickOutcome};
