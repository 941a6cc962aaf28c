use crate::errors::FetchError;
use crate::models::{ChatReply, ChatRequest, Record, StatisticsPayload};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn statistics(&self) -> Result<StatisticsPayload, FetchError>;

    async fn startups(&self) -> Result<Vec<Record>, FetchError>;

    /// Posts one chat message. Any JSON body is returned, whatever the status.
    async fn chat(&self, message: &str) -> Result<ChatReply, FetchError>;
}

/// Produces `t=` query values: wall-clock milliseconds, bumped so that every
/// value is strictly greater than the previous one.
#[derive(Debug, Default)]
pub struct CacheBuster {
    last: AtomicU64,
}

impl CacheBuster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> u64 {
        self.next_at(chrono::Utc::now().timestamp_millis().max(0) as u64)
    }

    fn next_at(&self, now_millis: u64) -> u64 {
        let mut current = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now_millis.max(current + 1);
            match self.last.compare_exchange_weak(
                current,
                candidate,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(observed) => current = observed,
            }
        }
    }
}

pub struct HttpApi {
    client: Client,
    base_url: String,
    cache_buster: CacheBuster,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            cache_buster: CacheBuster::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_fresh<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let stamp = self.cache_buster.next();
        debug!(path, stamp, "fetching");
        let response = self
            .client
            .get(self.url(path))
            .query(&[("t", stamp)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl DashboardApi for HttpApi {
    async fn statistics(&self) -> Result<StatisticsPayload, FetchError> {
        self.get_fresh("/api/statistics").await
    }

    async fn startups(&self) -> Result<Vec<Record>, FetchError> {
        self.get_fresh("/api/startups").await
    }

    async fn chat(&self, message: &str) -> Result<ChatReply, FetchError> {
        let response = self
            .client
            .post(self.url("/api/chat"))
            .json(&ChatRequest {
                message: message.to_string(),
            })
            .send()
            .await?;

        let ok = response.status().is_success();
        let bytes = response.bytes().await?;
        let body = serde_json::from_slice(&bytes)?;
        Ok(ChatReply { ok, body })
    }
}
