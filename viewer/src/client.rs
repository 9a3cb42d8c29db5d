//! HTTP access to the vacancy API.

use std::time::Duration;

use common::VacancyRecord;
use reqwest::Client;
use tracing::debug;

use crate::error::FetchError;

/// Thin wrapper over a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct VacancyClient {
    http: Client,
}

impl VacancyClient {
    /// Builds a client. `timeout` of `None` means requests may wait indefinitely.
    pub fn new(timeout: Option<Duration>) -> reqwest::Result<Self> {
        let mut builder =
            Client::builder().user_agent(concat!("vacancy-viewer/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
        })
    }

    /// Wraps an already configured client.
    pub fn from_client(http: Client) -> Self {
        Self { http }
    }

    /// GETs `url` and decodes the body as a JSON array of vacancies.
    pub async fn fetch(&self, url: &str) -> Result<Vec<VacancyRecord>, FetchError> {
        debug!(%url, "fetching vacancies");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        // Read the body first so decoding errors come from serde_json, not reqwest
        let body = response.bytes().await.map_err(|source| FetchError::Network {
            url: url.to_string(),
            source,
        })?;

        let records: Vec<VacancyRecord> =
            serde_json::from_slice(&body).map_err(|source| FetchError::Parse {
                url: url.to_string(),
                source,
            })?;

        debug!(%url, count = records.len(), "fetched vacancies");
        Ok(records)
    }
}
