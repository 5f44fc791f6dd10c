// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Account credentials for the EcoFlow cloud.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};

use crate::entry::EntryData;

/// Login scene sent with every authorization request.
const LOGIN_SCENE: &str = "EP_ADMIN";
/// Account type sent with every authorization request.
const LOGIN_USER_TYPE: &str = "ECOFLOW";

/// Credentials identifying one `PowerOcean` system and its owner account.
///
/// Credentials are set once when the entry is created and never change
/// afterwards. The password is kept in a [`SecretString`] and is only
/// exposed when the login body is built.
///
/// # Examples
///
/// ```
/// use powerocean_lib::api::Credentials;
///
/// let credentials = Credentials::new("HJ31ZDH4ZF560098", "user@example.com", "hunter2");
/// assert_eq!(credentials.serial(), "HJ31ZDH4ZF560098");
/// assert!(!format!("{credentials:?}").contains("hunter2"));
/// ```
#[derive(Clone)]
pub struct Credentials {
    serial: String,
    email: String,
    password: SecretString,
}

impl Credentials {
    /// Creates credentials from a serial number, account email and password.
    #[must_use]
    pub fn new(
        serial: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            serial: serial.into(),
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Returns the serial number of the system.
    #[must_use]
    pub fn serial(&self) -> &str {
        &self.serial
    }

    /// Returns the account email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the password, base64-encoded as the login endpoint expects.
    ///
    /// This is an encoding, not encryption.
    #[must_use]
    pub fn encoded_password(&self) -> String {
        STANDARD.encode(self.password.expose_secret().as_bytes())
    }

    /// Builds the JSON body of the login request.
    #[must_use]
    pub(crate) fn login_body(&self) -> Value {
        json!({
            "email": self.email,
            "password": self.encoded_password(),
            "scene": LOGIN_SCENE,
            "userType": LOGIN_USER_TYPE,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("serial", &self.serial)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl From<&EntryData> for Credentials {
    fn from(data: &EntryData) -> Self {
        Self::new(&data.device_id, &data.email, &data.password)
    }
}
