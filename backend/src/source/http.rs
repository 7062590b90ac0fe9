//! Live taxi-availability API client.

use async_trait::async_trait;
use log::{debug, warn};
use std::time::Duration;

use super::geojson::decode_feature_collection;
use super::{SourceError, TaxiSnapshot, TaxiSource};

/// Fetches the GeoJSON payload over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpTaxiSource {
    client: reqwest::Client,
    url: String,
}

impl HttpTaxiSource {
    /// Create a client for `url` with a per-request `timeout`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl TaxiSource for HttpTaxiSource {
    async fn fetch(&self) -> Result<TaxiSnapshot, SourceError> {
        debug!("Fetching taxi availability from {}", self.url);

        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Taxi API returned {} for {}", status, self.url);
            return Err(SourceError::Status {
                status: status.as_u16(),
                body: body.trim().chars().take(512).collect(),
            });
        }

        let snapshot = decode_feature_collection(&body)?;
        debug!(
            "Fetched {} taxi positions (upstream count {})",
            snapshot.coordinates.len(),
            snapshot.taxi_count
        );
        Ok(snapshot)
    }

    fn name(&self) -> &str {
        "http"
    }
}
