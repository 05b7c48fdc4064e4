// src/scrape.rs
use reqwest::Client;

use crate::{
    config::options::TransportConfig,
    core::net,
    data::RecordBatch,
    error::ExtractError,
    specs::status_table,
};

/// Result of one scrape. `failure` is set when the batch is short of what
/// the page holds; whatever rows were read before it are kept in `batch`.
#[derive(Debug, Default)]
pub struct Extraction {
    pub batch: RecordBatch,
    pub failure: Option<ExtractError>,
}

impl Extraction {
    fn failed(failure: ExtractError) -> Self {
        logw!("{failure}");
        Self { batch: RecordBatch::new(), failure: Some(failure) }
    }
}

/// Fetches the source page with one pooled client and reads its table.
#[derive(Debug, Clone)]
pub struct Extractor {
    client: Client,
    url: String,
}

impl Extractor {
    pub fn new(url: impl Into<String>, transport: &TransportConfig) -> reqwest::Result<Self> {
        Ok(Self { client: net::build_client(transport)?, url: url.into() })
    }

    pub fn with_client(url: impl Into<String>, client: Client) -> Self {
        Self { client, url: url.into() }
    }

    pub fn url(&self) -> &str { &self.url }

    /// One GET + parse. Never fails outright; see [`Extraction`].
    pub async fn extract(&self) -> Extraction {
        let doc = match self.fetch().await {
            Ok(doc) => doc,
            Err(e) => return Extraction::failed(e),
        };

        match status_table::parse(&doc) {
            Some(batch) => {
                for r in &batch {
                    logd!("Row: {} | {}", r.code, r.message);
                }
                logf!("Parsed {} rows", batch.len());
                Extraction { batch, failure: None }
            }
            None => {
                let failure = ExtractError::MissingTable { url: s!(&self.url) };
                logw!("{failure}");
                Extraction { batch: RecordBatch::new(), failure: Some(failure) }
            }
        }
    }

    async fn fetch(&self) -> Result<String, ExtractError> {
        logf!("Scraping: {}", self.url);
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|source| ExtractError::Transport { url: s!(&self.url), source })?;

        let status = resp.status();
        logf!("Status: {}", status.as_u16());
        if !status.is_success() {
            return Err(ExtractError::Status { url: s!(&self.url), status: status.as_u16() });
        }

        resp.text()
            .await
            .map_err(|source| ExtractError::Body { url: s!(&self.url), source })
    }
}
