//! Incoming-webhook alert sink.
//!
//! Posts `{"text": "<message>"}`, the body Slack and Mattermost incoming
//! webhooks accept.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::alert::{AlertError, AlertSink};

#[derive(Serialize)]
struct WebhookPayload<'a> {
    text: &'a str,
}

/// Delivers alerts with an HTTP POST.
pub struct WebhookSink {
    client: reqwest::Client,
    url: String,
}

impl WebhookSink {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, AlertError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, url))
    }

    /// Use a preconfigured client (proxy settings, TLS roots, ...).
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl AlertSink for WebhookSink {
    fn name(&self) -> &str {
        "webhook"
    }

    async fn send(&self, message: &str) -> Result<(), AlertError> {
        let response = self
            .client
            .post(&self.url)
            .json(&WebhookPayload { text: message })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(AlertError::Rejected(status.as_u16()))
        }
    }
}
