// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! User-facing setup flow.
//!
//! The flow has a single `user` step: show a form, validate the entered
//! credentials against the login endpoint, and either create an entry or
//! show the form again with an error.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::api::{ApiClient, ApiConfig, Credentials, PowerOceanApi};
use crate::entry::EntryData;
use crate::error::Error;

/// Key of the form-level error slot.
pub const BASE_ERROR: &str = "base";

/// Input widget of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Selector {
    /// Plain text input.
    Text,
    /// Masked input.
    Password,
}

/// One field of the `user` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    /// Key the value is stored under in [`EntryData`].
    pub key: &'static str,
    /// Input widget.
    pub selector: Selector,
    /// The form cannot be submitted without a value.
    pub required: bool,
    /// Value to pre-fill; the password field never has one.
    pub default: Option<String>,
}

/// Reason a submitted form is shown again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowError {
    /// Credentials rejected.
    Auth,
    /// Login endpoint unreachable or timed out.
    Connection,
    /// Anything else.
    Unknown,
}

impl FlowError {
    /// Translation key shown by the host.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Connection => "connection",
            Self::Unknown => "unknown",
        }
    }
}

impl From<&Error> for FlowError {
    fn from(err: &Error) -> Self {
        match err {
            Error::Authentication(_) => Self::Auth,
            Error::Communication(_) => Self::Connection,
            Error::Api(_) => Self::Unknown,
        }
    }
}

/// What the host should do after a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowResult {
    /// Render the form, with errors from the previous submission.
    ShowForm {
        step_id: &'static str,
        fields: Vec<FormField>,
        errors: BTreeMap<&'static str, FlowError>,
    },
    /// Persist a new entry.
    CreateEntry { title: String, data: EntryData },
}

impl FlowResult {
    /// Returns the form-level error, if the form is shown with one.
    #[must_use]
    pub fn base_error(&self) -> Option<FlowError> {
        match self {
            Self::ShowForm { errors, .. } => errors.get(BASE_ERROR).copied(),
            Self::CreateEntry { .. } => None,
        }
    }
}

/// Config flow for adding a `PowerOcean` unit.
///
/// # Examples
///
/// ```no_run
/// use powerocean_lib::api::ApiConfig;
/// use powerocean_lib::config_flow::{ConfigFlow, FlowResult};
/// use powerocean_lib::entry::EntryData;
///
/// # async fn example() {
/// let flow = ConfigFlow::new(ApiConfig::new());
/// let input = EntryData::new("HJ31ZDH4ZF560098", "user@example.com", "hunter2");
///
/// match flow.step_user(Some(input)).await {
///     FlowResult::CreateEntry { title, .. } => println!("created {title}"),
///     FlowResult::ShowForm { errors, .. } => println!("errors: {errors:?}"),
/// }
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigFlow {
    api_config: ApiConfig,
}

impl ConfigFlow {
    /// Creates a flow validating against the endpoints in `api_config`.
    #[must_use]
    pub fn new(api_config: ApiConfig) -> Self {
        Self { api_config }
    }

    /// Handles the `user` step.
    ///
    /// Without input the empty form is shown. With input, a throwaway
    /// client logs in once; the entry is created only if that succeeds.
    pub async fn step_user(&self, input: Option<EntryData>) -> FlowResult {
        let Some(input) = input else {
            return Self::show_form(None, BTreeMap::new());
        };

        match self.validate(&input).await {
            Ok(()) => FlowResult::CreateEntry {
                title: input.device_id.clone(),
                data: input,
            },
            Err(err) => {
                let flow_error = FlowError::from(&err);
                match flow_error {
                    FlowError::Auth => {
                        tracing::warn!(error = %err, "Login rejected");
                    }
                    FlowError::Connection => {
                        tracing::error!(error = %err, "Could not reach login endpoint");
                    }
                    FlowError::Unknown => {
                        tracing::error!(error = ?err, "Unexpected error during login");
                    }
                }

                let mut errors = BTreeMap::new();
                errors.insert(BASE_ERROR, flow_error);
                Self::show_form(Some(&input), errors)
            }
        }
    }

    async fn validate(&self, input: &EntryData) -> Result<(), Error> {
        let client = ApiClient::new(Credentials::from(input), self.api_config.clone())?;
        client.authorize().await
    }

    fn show_form(
        previous: Option<&EntryData>,
        errors: BTreeMap<&'static str, FlowError>,
    ) -> FlowResult {
        let text = |key: &'static str, default: Option<&String>| FormField {
            key,
            selector: Selector::Text,
            required: true,
            default: default.cloned(),
        };

        FlowResult::ShowForm {
            step_id: "user",
            fields: vec![
                text("device_id", previous.map(|p| &p.device_id)),
                text("email", previous.map(|p| &p.email)),
                FormField {
                    key: "password",
                    selector: Selector::Password,
                    required: true,
                    default: None,
                },
            ],
            errors,
        }
    }
}
