pub mod http_fetcher;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::{Item, StoryId, Updates};

pub use http_fetcher::HttpFetcher;

pub const DEFAULT_API_BASE: &str = "https://hacker-news.firebaseio.com/v0";

/// Read-only view of the Hacker News API.
#[async_trait]
pub trait HnApi {
    /// Ranked ids from `topstories.json`; position is display rank.
    async fn top_stories(&self) -> Result<Vec<StoryId>>;

    /// One story or comment from `item/{id}.json`.
    async fn item(&self, id: StoryId) -> Result<Item>;

    /// Recently changed items and profiles from `updates.json`.
    async fn updates(&self) -> Result<Updates>;
}
