// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Client for the EcoFlow cloud REST API.
//!
//! The API surface is deliberately small:
//!
//! - `authorize()`: log in and keep the session token in memory
//! - `fetch()`: read the status payload
//! - `mutate_title()`: change a single field
//!
//! [`ApiClient`] implements these over HTTP. The [`PowerOceanApi`] trait is
//! the seam the coordinator, entities and entry lifecycle are generic over.

mod client;
mod config;
mod credentials;

pub use client::ApiClient;
pub use config::{ApiConfig, Endpoints, AUTH_URL, DEVICE_DETAIL_URL, PLACEHOLDER_URL};
pub use credentials::Credentials;

use std::future::Future;

use serde_json::Value;

use crate::error::Result;

/// Operations offered by the cloud API.
///
/// The returned futures are `Send` so that implementations can be driven
/// from a spawned polling task.
pub trait PowerOceanApi: Send + Sync + 'static {
    /// Logs in and stores the session token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`](crate::Error::Authentication) if the
    /// credentials are rejected. A failed call leaves any previously stored
    /// token untouched.
    fn authorize(&self) -> impl Future<Output = Result<()>> + Send;

    /// Fetches the current status payload.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`](crate::Error) following the client taxonomy.
    fn fetch(&self) -> impl Future<Output = Result<Value>> + Send;

    /// Sets the `title` field and returns the echoed payload.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`](crate::Error) following the client taxonomy.
    fn mutate_title(&self, value: &str) -> impl Future<Output = Result<Value>> + Send;
}
