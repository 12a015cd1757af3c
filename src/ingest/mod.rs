//! Polls the upstream reading producer and persists whatever it yields.
//!
//! The upstream is known to be flaky: a failed fetch, a bad status or an
//! undecodable body costs that cycle and nothing else.

use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::PgPool;
use tokio::time;
use tracing::{error, info};

use crate::db::{
    models::{IncomingReading, NewSensorReading},
    queries,
};

pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build upstream HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Fetch one batch of readings from `{base_url}/readings`.
    pub async fn fetch_batch(&self) -> Result<Vec<IncomingReading>> {
        let url = format!("{}/readings", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .context("upstream request failed")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("upstream returned status {status}");
        }

        response
            .json()
            .await
            .context("failed to decode upstream readings")
    }
}

pub struct PollerService {
    pool: PgPool,
    client: UpstreamClient,
    interval: Duration,
}

impl PollerService {
    pub fn new(pool: PgPool, client: UpstreamClient, interval_secs: u64) -> Self {
        Self {
            pool,
            client,
            interval: Duration::from_secs(interval_secs),
        }
    }

    /// Runs the polling loop indefinitely.
    /// Spawn this via `tokio::spawn`.
    pub async fn run(self) {
        info!(interval_secs = self.interval.as_secs(), "Upstream polling loop started");
        let mut ticker = time::interval(self.interval);

        loop {
            ticker.tick().await;
            if let Err(e) = self.run_once().await {
                error!(error = %e, "Polling iteration failed");
            }
        }
    }

    async fn run_once(&self) -> Result<()> {
        let batch = self.client.fetch_batch().await?;
        if batch.is_empty() {
            return Ok(());
        }

        let readings: Vec<NewSensorReading> = batch.into_iter().map(Into::into).collect();
        let written = queries::insert_batch(&self.pool, &readings).await?;
        info!(readings = written, "Upstream batch persisted");
        Ok(())
    }
}
