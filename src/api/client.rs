// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP client for the EcoFlow cloud API.

use parking_lot::RwLock;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};
use tracing::debug;

use crate::api::{ApiConfig, Credentials, PowerOceanApi};
use crate::error::{Error, Result};

/// HTTP client for one `PowerOcean` account.
///
/// All three operations go through a single request helper that bounds
/// the whole exchange (connect, send, read body) by the configured
/// timeout and maps failures onto [`Error`]:
///
/// | Failure                          | Error                        |
/// |----------------------------------|------------------------------|
/// | HTTP 401 / 403                   | [`Error::Authentication`]    |
/// | timeout, transport, other non-2xx | [`Error::Communication`]    |
/// | anything else (e.g. bad JSON)    | [`Error::Api`]               |
///
/// The session token returned by `authorize()` lives in memory only.
///
/// # Examples
///
/// ```no_run
/// use powerocean_lib::api::{ApiClient, ApiConfig, Credentials, PowerOceanApi};
///
/// # async fn example() -> powerocean_lib::Result<()> {
/// let credentials = Credentials::new("HJ31ZDH4ZF560098", "user@example.com", "hunter2");
/// let client = ApiClient::new(credentials, ApiConfig::new())?;
///
/// client.authorize().await?;
/// let status = client.fetch().await?;
/// println!("{status}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
    credentials: Credentials,
    token: RwLock<Option<SecretString>>,
}

impl ApiClient {
    /// Creates a client for the given account.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] if the HTTP client cannot be created.
    pub fn new(credentials: Credentials, config: ApiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::Api(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            config,
            credentials,
            token: RwLock::new(None),
        })
    }

    /// Returns the client configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Returns the account credentials.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns `true` once `authorize()` has stored a session token.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.read().is_some()
    }

    fn bearer_header(&self) -> Result<Option<HeaderValue>> {
        let token = self.token.read();
        let Some(token) = token.as_ref() else {
            return Ok(None);
        };

        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|_| Error::Api("session token is not a valid header value".to_string()))?;
        value.set_sensitive(true);
        Ok(Some(value))
    }

    async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        headers: HeaderMap,
    ) -> Result<Value> {
        let mut builder = self.http.request(method.clone(), url).headers(headers);
        if let Some(body) = body {
            let payload = serde_json::to_vec(body)
                .map_err(|e| Error::Api(format!("failed to encode request body: {e}")))?;
            builder = builder.body(payload);
        }

        debug!(%method, url, "Sending HTTP request");

        let timeout = self.config.timeout();
        let exchange = async {
            let response = builder.send().await.map_err(transport_error)?;
            let status = response.status();
            verify_status(status)?;
            let bytes = response.bytes().await.map_err(transport_error)?;
            debug!(%status, len = bytes.len(), "Received HTTP response");
            Ok::<_, Error>(bytes)
        };

        // Dropping `exchange` on elapse cancels the in-flight socket operation.
        let bytes = tokio::time::timeout(timeout, exchange)
            .await
            .map_err(|_| {
                Error::Communication(format!(
                    "request timed out after {} ms",
                    timeout.as_millis()
                ))
            })??;

        serde_json::from_slice(&bytes)
            .map_err(|e| Error::Api(format!("invalid JSON in response: {e}")))
    }
}

impl PowerOceanApi for ApiClient {
    async fn authorize(&self) -> Result<()> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("lang"),
            HeaderValue::from_static("en_US"),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let body = self.credentials.login_body();
        let response = self
            .request(
                Method::POST,
                self.config.endpoints().auth_url(),
                Some(&body),
                headers,
            )
            .await?;

        let token = response
            .pointer("/data/token")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::Api("login response has no data.token".to_string()))?;

        *self.token.write() = Some(SecretString::from(token.to_string()));

        debug!(serial = self.credentials.serial(), "Authorized with EcoFlow cloud");
        Ok(())
    }

    async fn fetch(&self) -> Result<Value> {
        let mut headers = HeaderMap::new();
        if let Some(bearer) = self.bearer_header()? {
            headers.insert(AUTHORIZATION, bearer);
        }

        self.request(
            Method::GET,
            self.config.endpoints().status_url(),
            None,
            headers,
        )
        .await
    }

    async fn mutate_title(&self, value: &str) -> Result<Value> {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=UTF-8"),
        );

        let body = json!({ "title": value });
        self.request(
            Method::PATCH,
            self.config.endpoints().mutate_url(),
            Some(&body),
            headers,
        )
        .await
    }
}

/// Maps the response status onto the error taxonomy.
fn verify_status(status: StatusCode) -> Result<()> {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(Error::Authentication(format!("HTTP {}", status.as_u16())));
    }

    if !status.is_success() {
        return Err(Error::Communication(format!(
            "HTTP {} - {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        )));
    }

    Ok(())
}

fn transport_error(err: reqwest::Error) -> Error {
    if err.is_builder() {
        Error::Api(format!("invalid request: {err}"))
    } else if err.is_timeout() {
        Error::Communication(format!("request timed out: {err}"))
    } else {
        Error::Communication(format!("error fetching information: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new(
            Credentials::new("SN1", "user@example.com", "secret"),
            ApiConfig::new(),
        )
        .unwrap()
    }

    #[test]
    fn verify_status_auth_codes() {
        assert_eq!(
            verify_status(StatusCode::UNAUTHORIZED),
            Err(Error::Authentication("HTTP 401".to_string()))
        );
        assert_eq!(
            verify_status(StatusCode::FORBIDDEN),
            Err(Error::Authentication("HTTP 403".to_string()))
        );
    }

    #[test]
    fn verify_status_other_failures() {
        let err = verify_status(StatusCode::INTERNAL_SERVER_ERROR).unwrap_err();
        assert_eq!(
            err,
            Error::Communication("HTTP 500 - Internal Server Error".to_string())
        );

        let err = verify_status(StatusCode::NOT_FOUND).unwrap_err();
        assert!(err.is_communication());
    }

    #[test]
    fn verify_status_success() {
        assert!(verify_status(StatusCode::OK).is_ok());
        assert!(verify_status(StatusCode::CREATED).is_ok());
    }

    #[test]
    fn new_client_has_no_token() {
        let client = client();
        assert!(!client.has_token());
        assert!(client.bearer_header().unwrap().is_none());
    }

    #[test]
    fn bearer_header_uses_stored_token() {
        let client = client();
        *client.token.write() = Some(SecretString::from("abc123".to_string()));

        let header = client.bearer_header().unwrap().unwrap();
        assert_eq!(header.to_str().unwrap(), "Bearer abc123");
        assert!(header.is_sensitive());
    }

    #[test]
    fn client_keeps_config() {
        let client = client();
        assert_eq!(client.config().timeout(), ApiConfig::DEFAULT_TIMEOUT);
        assert_eq!(client.credentials().serial(), "SN1");
    }
}
