//! Remote model artifact sources

use backon::{ExponentialBuilder, Retryable};
use std::time::Duration;
use tracing::{info, warn};

pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

#[async_trait::async_trait]
pub trait ArtifactSource: Send + Sync {
    /// Fetch the raw artifact bytes
    async fn fetch(&self) -> Result<Vec<u8>, SourceError>;

    /// Human-readable location, for logs
    fn location(&self) -> String;
}

/// Artifact published at a plain URL (release asset, object store, ...)
pub struct HttpArtifactSource {
    client: reqwest::Client,
    url: String,
    max_retries: usize,
}

impl HttpArtifactSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
            max_retries: 3,
        })
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    async fn fetch_once(&self) -> Result<Vec<u8>, reqwest::Error> {
        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

#[async_trait::async_trait]
impl ArtifactSource for HttpArtifactSource {
    async fn fetch(&self) -> Result<Vec<u8>, SourceError> {
        info!(url = %self.url, "Downloading model artifact");

        let bytes = (|| async { self.fetch_once().await })
            .retry(
                ExponentialBuilder::default()
                    .with_min_delay(Duration::from_millis(200))
                    .with_max_times(self.max_retries),
            )
            .when(|e: &reqwest::Error| {
                // Client errors will not fix themselves
                !e.status().is_some_and(|s| s.is_client_error())
            })
            .notify(|e: &reqwest::Error, delay: Duration| {
                warn!(url = %self.url, error = %e, delay_ms = delay.as_millis() as u64, "Model download failed, retrying");
            })
            .await?;

        info!(url = %self.url, bytes = bytes.len(), "Model artifact downloaded");
        Ok(bytes)
    }

    fn location(&self) -> String {
        self.url.clone()
    }
}
