use std::sync::Arc;

use crate::app::Result;
use crate::config::Config;
use crate::feed::{CommentLoader, LivePoller, Paginator};
use crate::fetcher::{HnApi, HttpFetcher};

/// Wires the API client to the feed components for one session.
pub struct AppContext {
    pub config: Config,
    pub api: Arc<dyn HnApi + Send + Sync>,
}

impl AppContext {
    /// Validates `config` and builds the HTTP client from it.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let api: Arc<dyn HnApi + Send + Sync> = Arc::new(HttpFetcher::new(&config.api)?);
        Ok(Self::with_api(config, api))
    }

    pub fn with_api(config: Config, api: Arc<dyn HnApi + Send + Sync>) -> Self {
        Self { config, api }
    }

    /// A fresh paginator starting at the top of the list.
    pub fn paginator(&self) -> Paginator {
        Paginator::from_config(&self.config.feed)
    }

    pub fn comment_loader(&self) -> CommentLoader {
        CommentLoader::from_config(&self.config.comments)
    }

    pub fn live_poller(&self) -> LivePoller {
        LivePoller::from_config(&self.config.live)
    }
}
