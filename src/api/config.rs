// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Endpoint and transport configuration for the API client.

use std::time::Duration;

/// Login endpoint of the EcoFlow cloud.
pub const AUTH_URL: &str = "https://api.ecoflow.com/auth/login";

/// Device detail endpoint of the EcoFlow cloud, without the serial query.
pub const DEVICE_DETAIL_URL: &str = "https://api-e.ecoflow.com/provider-service/user/device/detail";

/// Public echo service used for status and mutate calls until the device
/// detail payload is wired up.
pub const PLACEHOLDER_URL: &str = "https://jsonplaceholder.typicode.com/posts/1";

/// The three URLs the client talks to.
///
/// # Examples
///
/// ```
/// use powerocean_lib::api::Endpoints;
///
/// let endpoints = Endpoints::placeholder();
/// assert_eq!(endpoints.auth_url(), "https://api.ecoflow.com/auth/login");
///
/// let endpoints = Endpoints::with_base_url("http://127.0.0.1:8080/");
/// assert_eq!(endpoints.status_url(), "http://127.0.0.1:8080/posts/1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    auth_url: String,
    status_url: String,
    mutate_url: String,
}

impl Endpoints {
    /// Real login endpoint, placeholder echo service for status and mutate.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            auth_url: AUTH_URL.to_string(),
            status_url: PLACEHOLDER_URL.to_string(),
            mutate_url: PLACEHOLDER_URL.to_string(),
        }
    }

    /// Real login endpoint and the device detail endpoint for `serial`.
    ///
    /// Mutations still go to the placeholder service.
    #[must_use]
    pub fn device_detail(serial: &str) -> Self {
        Self {
            auth_url: AUTH_URL.to_string(),
            status_url: format!("{DEVICE_DETAIL_URL}?sn={}", urlencoding::encode(serial)),
            mutate_url: PLACEHOLDER_URL.to_string(),
        }
    }

    /// Rebases every endpoint onto `base_url`, keeping the same paths.
    #[must_use]
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            auth_url: format!("{base}/auth/login"),
            status_url: format!("{base}/posts/1"),
            mutate_url: format!("{base}/posts/1"),
        }
    }

    /// Returns the login URL.
    #[must_use]
    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    /// Returns the status (fetch) URL.
    #[must_use]
    pub fn status_url(&self) -> &str {
        &self.status_url
    }

    /// Returns the mutate URL.
    #[must_use]
    pub fn mutate_url(&self) -> &str {
        &self.mutate_url
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::placeholder()
    }
}

/// Configuration for the API client.
///
/// # Examples
///
/// ```
/// use powerocean_lib::api::{ApiConfig, Endpoints};
/// use std::time::Duration;
///
/// let config = ApiConfig::new()
///     .with_endpoints(Endpoints::with_base_url("http://127.0.0.1:8080"))
///     .with_timeout(Duration::from_secs(5));
/// assert_eq!(config.timeout(), Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    endpoints: Endpoints,
    timeout: Duration,
}

impl ApiConfig {
    /// Upper bound on a single request, including reading the body.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration with placeholder endpoints and the default timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            endpoints: Endpoints::default(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the endpoints.
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the endpoints.
    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_config_default_values() {
        let config = ApiConfig::new();
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.endpoints(), &Endpoints::placeholder());
    }

    #[test]
    fn placeholder_endpoints() {
        let endpoints = Endpoints::placeholder();
        assert_eq!(endpoints.auth_url(), AUTH_URL);
        assert_eq!(endpoints.status_url(), PLACEHOLDER_URL);
        assert_eq!(endpoints.mutate_url(), PLACEHOLDER_URL);
    }

    #[test]
    fn device_detail_endpoint_encodes_serial() {
        let endpoints = Endpoints::device_detail("HJ31 ZDH4");
        assert_eq!(
            endpoints.status_url(),
            "https://api-e.ecoflow.com/provider-service/user/device/detail?sn=HJ31%20ZDH4"
        );
        assert_eq!(endpoints.mutate_url(), PLACEHOLDER_URL);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let endpoints = Endpoints::with_base_url("http://localhost:9000/");
        assert_eq!(endpoints.auth_url(), "http://localhost:9000/auth/login");
        assert_eq!(endpoints.mutate_url(), "http://localhost:9000/posts/1");
    }

    #[test]
    fn api_config_builder_chain() {
        let config = ApiConfig::new()
            .with_endpoints(Endpoints::device_detail("SN1"))
            .with_timeout(Duration::from_millis(250));
        assert_eq!(config.timeout(), Duration::from_millis(250));
        assert!(config.endpoints().status_url().ends_with("?sn=SN1"));
    }
}
