// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `PowerOcean` library.
//!
//! The API client reports failures through a three-tier taxonomy:
//!
//! - [`Error::Authentication`]: the cloud rejected the credentials (HTTP 401/403)
//! - [`Error::Communication`]: timeout, transport fault, or an unsuccessful status
//! - [`Error::Api`]: anything else (malformed payloads, client construction)
//!
//! The coordinator folds these into the two outcomes a host reacts to
//! ([`CoordinatorError`]), and entry setup reports [`SetupError`].

use thiserror::Error;

/// The main error type for API client operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The cloud rejected the supplied credentials or session token.
    #[error("invalid credentials: {0}")]
    Authentication(String),

    /// The request timed out or the transport failed.
    #[error("communication error: {0}")]
    Communication(String),

    /// Any other unexpected failure.
    #[error("unexpected API error: {0}")]
    Api(String),
}

impl Error {
    /// Returns `true` if this is an authentication failure.
    #[must_use]
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }

    /// Returns `true` if this is a timeout or transport failure.
    #[must_use]
    pub fn is_communication(&self) -> bool {
        matches!(self, Self::Communication(_))
    }
}

/// Outcome of a failed coordinator poll, as seen by the host.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoordinatorError {
    /// Credentials were rejected; the user has to re-authenticate.
    ///
    /// The coordinator does not retry this on its own.
    #[error("re-authentication required: {0}")]
    AuthFailed(String),

    /// The poll failed for any other reason; eligible for retry.
    #[error("update failed: {0}")]
    UpdateFailed(String),
}

impl From<Error> for CoordinatorError {
    fn from(err: Error) -> Self {
        match err {
            Error::Authentication(message) => Self::AuthFailed(message),
            other => Self::UpdateFailed(other.to_string()),
        }
    }
}

/// Errors raised while setting up a config entry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// The stored credentials are no longer accepted.
    #[error("authentication failed during setup: {0}")]
    AuthFailed(String),

    /// The service could not be reached; the host should retry setup later.
    #[error("entry not ready: {0}")]
    NotReady(String),

    /// The API client could not be constructed.
    #[error("client error: {0}")]
    Client(#[from] Error),
}

impl From<CoordinatorError> for SetupError {
    fn from(err: CoordinatorError) -> Self {
        match err {
            CoordinatorError::AuthFailed(message) => Self::AuthFailed(message),
            CoordinatorError::UpdateFailed(message) => Self::NotReady(message),
        }
    }
}

/// A specialized Result type for API client operations.
pub type Result<T> = std::result::Result<T, Error>;
