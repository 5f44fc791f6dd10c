// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory API used by unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::{Value, json};

use crate::api::PowerOceanApi;
use crate::error::{Error, Result};

/// Echo service holding a single `title` field.
#[derive(Debug, Default)]
pub(crate) struct StubApi {
    title: Mutex<String>,
    fetch_failures: Mutex<VecDeque<Error>>,
    authorize_failure: Mutex<Option<Error>>,
    fetch_delay: Option<Duration>,
    fetch_calls: AtomicUsize,
    mutate_calls: AtomicUsize,
}

impl StubApi {
    pub(crate) fn with_title(title: &str) -> Self {
        Self {
            title: Mutex::new(title.to_string()),
            ..Self::default()
        }
    }

    pub(crate) fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = Some(delay);
        self
    }

    pub(crate) fn fail_next_fetch(&self, err: Error) {
        self.fetch_failures.lock().push_back(err);
    }

    pub(crate) fn fail_authorize(&self, err: Error) {
        *self.authorize_failure.lock() = Some(err);
    }

    pub(crate) fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn mutate_calls(&self) -> usize {
        self.mutate_calls.load(Ordering::SeqCst)
    }
}

impl PowerOceanApi for StubApi {
    async fn authorize(&self) -> Result<()> {
        let failure = self.authorize_failure.lock().clone();
        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn fetch(&self) -> Result<Value> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.fetch_delay {
            tokio::time::sleep(delay).await;
        }

        let failure = self.fetch_failures.lock().pop_front();
        if let Some(err) = failure {
            return Err(err);
        }

        let title = self.title.lock().clone();
        Ok(json!({ "id": 1, "title": title, "body": "status body" }))
    }

    async fn mutate_title(&self, value: &str) -> Result<Value> {
        self.mutate_calls.fetch_add(1, Ordering::SeqCst);
        *self.title.lock() = value.to_string();
        Ok(json!({ "id": 1, "title": value }))
    }
}
