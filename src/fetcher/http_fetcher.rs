use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::app::{Result, RippleError};
use crate::config::ApiConfig;
use crate::domain::{Item, StoryId, Updates};
use crate::fetcher::HnApi;

pub struct HttpFetcher {
    client: Client,
    base: String,
}

impl HttpFetcher {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        // Validate up front so a typo shows up before the first request.
        Url::parse(&config.base_url)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        response.error_for_status_ref()?;
        let body = response.bytes().await?;

        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl HnApi for HttpFetcher {
    async fn top_stories(&self) -> Result<Vec<StoryId>> {
        self.get_json("topstories.json").await
    }

    async fn item(&self, id: StoryId) -> Result<Item> {
        // Unknown ids come back as a literal `null`.
        let item: Option<Item> = self.get_json(&format!("item/{}.json", id)).await?;
        item.ok_or(RippleError::ItemNotFound(id))
    }

    async fn updates(&self) -> Result<Updates> {
        self.get_json("updates.json").await
    }
}
