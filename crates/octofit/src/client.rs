//! HTTP client for the OctoFit collection endpoints
//!
//! One GET per call. Any 2xx is accepted; every other outcome (transport
//! failure, non-2xx status, undecodable body) surfaces as
//! [`OctofitError::Fetch`] with a human-readable message.

use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::config::ApiConfig;
use crate::envelope::Envelope;
use crate::error::{OctofitError, Result};
use crate::resource::{Record, Resource};

/// Client bound to one resolved API root
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    max_retries: u32,
    initial_backoff: Duration,
}

impl ApiClient {
    /// Build a client from configuration. The base URL is resolved here, once.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = config.resolve_base_url()?;

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| OctofitError::Config(format!("Failed to build HTTP client: {e}")))?;

        debug!("ApiClient initialized with base URL: {}", base_url);

        Ok(Self {
            client,
            base_url,
            max_retries: config.max_retries,
            initial_backoff: Duration::from_millis(config.initial_backoff_ms),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL of a collection endpoint
    pub fn endpoint(&self, resource: Resource) -> Result<Url> {
        self.base_url
            .join(&resource.path())
            .map_err(|e| OctofitError::Config(format!("Invalid endpoint for {resource}: {e}")))
    }

    /// Fetch and decode a whole collection
    pub async fn fetch<R: Record>(&self) -> Result<Vec<R>> {
        let records = self.fetch_envelope(R::RESOURCE).await?.into_records();
        debug!("Fetched {} {}", records.len(), R::RESOURCE);
        Ok(records)
    }

    /// Fetch a collection as normalized, untyped JSON items
    pub async fn fetch_values(&self, resource: Resource) -> Result<Vec<Value>> {
        let items = self.fetch_envelope(resource).await?.into_items();
        debug!("Fetched {} {}", items.len(), resource);
        Ok(items)
    }

    async fn fetch_envelope(&self, resource: Resource) -> Result<Envelope> {
        let url = self.endpoint(resource)?;
        debug!("Fetching {} from: {}", resource, url);

        let mut delay = self.initial_backoff;
        let mut attempt = 0;

        loop {
            match self.client.get(url.clone()).send().await {
                Ok(response) => {
                    let status = response.status();

                    if is_retryable(status) && attempt < self.max_retries {
                        attempt += 1;
                        warn!(
                            "{} returned {} on attempt {}/{}, retrying in {:?}",
                            resource,
                            status,
                            attempt,
                            self.max_retries + 1,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                        delay = next_backoff(delay);
                        continue;
                    }

                    if !status.is_success() {
                        warn!("Error fetching {}: HTTP {}", resource, status);
                        return Err(OctofitError::Fetch(format!(
                            "HTTP error! status: {}",
                            status.as_u16()
                        )));
                    }

                    let body = response.bytes().await.map_err(|e| {
                        warn!("Error reading {} response body: {}", resource, e);
                        OctofitError::Fetch(e.to_string())
                    })?;

                    let envelope = Envelope::from_slice(&body).inspect_err(|e| {
                        warn!("Error parsing {} response: {}", resource, e);
                    })?;
                    if let Some((count, next)) = envelope.truncation() {
                        match count {
                            Some(total) => warn!(
                                "Showing first page of {} {}; more at {}",
                                total, resource, next
                            ),
                            None => warn!("Showing first page of {}; more at {}", resource, next),
                        }
                    }
                    return Ok(envelope);
                }
                Err(e) => {
                    if attempt < self.max_retries {
                        attempt += 1;
                        warn!(
                            "Request for {} failed on attempt {}/{}, retrying in {:?}: {}",
                            resource,
                            attempt,
                            self.max_retries + 1,
                            delay,
                            e
                        );
                        tokio::time::sleep(delay).await;
                        delay = next_backoff(delay);
                        continue;
                    }

                    warn!("Error fetching {}: {}", resource, e);
                    return Err(OctofitError::Fetch(e.to_string()));
                }
            }
        }
    }
}

/// Doubled retry delay, capped instead of overflowing
fn next_backoff(delay: Duration) -> Duration {
    delay.saturating_mul(2)
}

fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}
