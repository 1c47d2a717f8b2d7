use crate::OceanDataProvider;
use anyhow::Result;
use async_trait::async_trait;
use reefwright_data::{DataSource, EnvironmentalDataPoint};
use std::time::Duration;

const INITIAL_BACKOFF_MS: u64 = 250;

/// Fetches a JSON array of observations from a remote feed.
pub struct HttpOceanProvider {
    endpoint: String,
    client: reqwest::Client,
    request_timeout: Duration,
    max_retries: u32,
}

impl HttpOceanProvider {
    #[must_use]
    pub fn new(endpoint: impl Into<String>, request_timeout: Duration, max_retries: u32) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
            request_timeout,
            max_retries: max_retries.max(1),
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl OceanDataProvider for HttpOceanProvider {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_data_points(&self) -> Result<Vec<EnvironmentalDataPoint>> {
        if self.endpoint.is_empty() {
            return Err(anyhow::anyhow!("Ocean data endpoint cannot be empty"));
        }

        let mut last_error: Option<anyhow::Error> = None;

        for attempt in 0..self.max_retries {
            let response = self
                .client
                .get(&self.endpoint)
                .timeout(self.request_timeout)
                .header("Accept", "application/json")
                .send()
                .await;

            match response {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        let mut points: Vec<EnvironmentalDataPoint> = resp.json().await?;
                        for point in &mut points {
                            point.source = DataSource::Live;
                        }
                        tracing::info!(
                            endpoint = %self.endpoint,
                            points = points.len(),
                            "Fetched live ocean observations"
                        );
                        return Ok(points);
                    }

                    let is_transient = status.is_server_error() || status == 429;
                    if !is_transient || attempt == self.max_retries - 1 {
                        return Err(anyhow::anyhow!("Ocean data feed returned error: {}", status));
                    }
                    last_error =
                        Some(anyhow::anyhow!("Ocean data feed returned error: {}", status));
                }
                Err(e) => {
                    let is_transient = e.is_timeout() || e.is_connect();
                    if !is_transient || attempt == self.max_retries - 1 {
                        return Err(anyhow::anyhow!("Ocean data request failed: {}", e));
                    }
                    last_error = Some(anyhow::anyhow!("Ocean data request failed: {}", e));
                }
            }

            let backoff_ms = INITIAL_BACKOFF_MS * 2_u64.pow(attempt);
            tracing::debug!(attempt, backoff_ms, "Retrying ocean data request");
            tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("Unknown ocean data error")))
    }
}
