use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::config::Config;

/// One row of a paginated city listing.
#[derive(Debug, Clone, Deserialize)]
pub struct IdeaSummary {
    pub id: String,
}

/// Decoded idea detail. `support_count` stays optional so callers can tell
/// an omitted field apart from a genuine zero.
#[derive(Debug, Clone, Deserialize)]
pub struct IdeaDetail {
    pub id: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub support_count: Option<u64>,
}

#[async_trait]
pub trait IdeasApi: Send + Sync {
    async fn fetch_ideas_page(&self, slug: &str, page: u32) -> Result<Vec<IdeaSummary>>;
    async fn fetch_idea(&self, id: &str) -> Result<IdeaDetail>;
}

pub struct HttpIdeasApi {
    client: Client,
    base: Url,
    per_page: u32,
}

impl HttpIdeasApi {
    pub fn new(cfg: &Config) -> Result<Self> {
        let base = Url::parse(&cfg.api_base)
            .with_context(|| format!("invalid API base {:?}", cfg.api_base))?;
        Ok(Self {
            client: Client::new(),
            base,
            per_page: cfg.per_page,
        })
    }
}

#[async_trait]
impl IdeasApi for HttpIdeasApi {
    async fn fetch_ideas_page(&self, slug: &str, page: u32) -> Result<Vec<IdeaSummary>> {
        let url = self.base.join(&format!(
            "/api/v1/cities/{}/ideas?page={}&per_page={}",
            slug, page, self.per_page
        ))?;
        let resp = self.client.get(url.clone()).send().await?;
        if !resp.status().is_success() {
            bail!("listing fetch failed for {}: HTTP {}", url, resp.status());
        }
        let body = resp.text().await?;
        // Past-the-end pages come back with an empty body, not an error.
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&body).with_context(|| format!("undecodable listing page from {}", url))
    }

    async fn fetch_idea(&self, id: &str) -> Result<IdeaDetail> {
        let url = self.base.join(&format!("/api/v1/ideas/{}", id))?;
        let resp = self.client.get(url.clone()).send().await?;
        if !resp.status().is_success() {
            bail!("idea fetch failed for {}: HTTP {}", url, resp.status());
        }
        resp.json()
            .await
            .with_context(|| format!("undecodable idea detail from {}", url))
    }
}
