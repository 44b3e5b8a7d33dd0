use crate::core::{ArchiveOutcome, Archiver, Capture};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;

const SAVE_TIMEOUT_SECS: u64 = 90;

/// Client for a Save-Page-Now style archiving service.
///
/// A capture request is `GET {host}/save/{url}`; a successful save answers
/// with a `Content-Location` header naming the capture path. Failures carry
/// the reason in the `x-archive-wayback-runtime-error` header.
pub struct WaybackClient {
    host: String,
    client: Client,
}

impl WaybackClient {
    pub fn new(host: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(SAVE_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            host: host.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Newest existing capture of `url`, if the service has one.
    pub async fn latest_capture(&self, url: &str) -> Result<Option<Capture>> {
        let endpoint = format!("{}/wayback/available", self.host);
        tracing::debug!("Checking availability of {}", url);

        let response = self
            .client
            .get(&endpoint)
            .query(&[("url", url)])
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::debug!("Availability query answered {}", response.status());
            return Ok(None);
        }

        let available: AvailableResponse = response.json().await?;
        let capture = available
            .archived_snapshots
            .closest
            .filter(|snapshot| snapshot.available)
            .map(|snapshot| Capture {
                timestamp: snapshot.timestamp,
                url: snapshot.url,
            });
        Ok(capture)
    }
}

#[async_trait]
impl Archiver for WaybackClient {
    async fn archive(&self, url: &str) -> Result<ArchiveOutcome> {
        let save_url = format!("{}/save/{}", self.host, url);
        tracing::debug!("Requesting capture: {}", save_url);

        let response = self.client.get(&save_url).send().await?;
        let status = response.status();
        let code = status.as_u16();
        tracing::debug!("Save request answered {}", status);

        let capture_url = header_value(&response, "content-location");
        let runtime_error = header_value(&response, "x-archive-wayback-runtime-error");

        if status.is_success() {
            if let Some(capture_url) = capture_url {
                return Ok(ArchiveOutcome {
                    archived: true,
                    url: url.to_string(),
                    code,
                    error: None,
                    capture_url: Some(capture_url),
                });
            }
        }

        let reason = runtime_error.unwrap_or_else(|| {
            if status.is_success() {
                "No capture location returned".to_string()
            } else {
                status
                    .canonical_reason()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("HTTP {}", code))
            }
        });

        Ok(ArchiveOutcome {
            archived: false,
            url: url.to_string(),
            code,
            error: Some(reason),
            capture_url: None,
        })
    }
}

fn header_value(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

#[derive(Debug, Deserialize)]
struct AvailableResponse {
    #[serde(default)]
    archived_snapshots: ArchivedSnapshots,
}

#[derive(Debug, Default, Deserialize)]
struct ArchivedSnapshots {
    closest: Option<ClosestSnapshot>,
}

#[derive(Debug, Deserialize)]
struct ClosestSnapshot {
    #[serde(default)]
    available: bool,
    timestamp: String,
    url: String,
}
