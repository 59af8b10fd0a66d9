use futures::stream::{self, StreamExt};
use serde::Deserialize;

use crate::app::Result;
use crate::config::FeedConfig;
use crate::feed::Surface;
use crate::fetcher::HnApi;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// How far the cursor moves after a page has been fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorAdvance {
    /// Always one full page, even when fewer items were left. Once the list
    /// is exhausted every further call is an empty page.
    #[default]
    FullPage,
    /// Only as many positions as were rendered, so the cursor parks at the
    /// end of the list and picks up ids that appear later.
    Rendered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageReport {
    /// Cursor position the page started at.
    pub start: usize,
    /// Stories rendered by this call.
    pub rendered: usize,
    /// Cursor position after the call.
    pub cursor: usize,
    /// Length of the ranked list fetched for this call.
    pub total: usize,
}

impl PageReport {
    pub fn is_exhausted(&self) -> bool {
        self.start >= self.total
    }
}

/// Walks the ranked story list one page per call.
///
/// The cursor belongs to the paginator, so independent paginators never
/// see each other's progress. `fetch_posts` takes `&mut self`; a second
/// fetch cannot start while one is in flight.
#[derive(Debug, Clone)]
pub struct Paginator {
    page_size: usize,
    concurrency: usize,
    advance: CursorAdvance,
    cursor: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Paginator {
    /// `page_size` is raised to at least 1 so the cursor always moves.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            concurrency: 1,
            advance: CursorAdvance::default(),
            cursor: 0,
        }
    }

    pub fn from_config(config: &FeedConfig) -> Self {
        Self::new(config.page_size)
            .with_concurrency(config.concurrency)
            .with_advance(config.cursor_advance)
    }

    /// Item fetches allowed in flight within one page. Rendering stays in
    /// rank order whatever the value.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_advance(mut self, advance: CursorAdvance) -> Self {
        self.advance = advance;
        self
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Fetches the ranked list, then renders the stories in
    /// `[cursor, cursor + page_size)` that exist, in rank order.
    ///
    /// Any failed fetch aborts the page and leaves the cursor where it was;
    /// stories rendered before the failure stay rendered.
    pub async fn fetch_posts<A, S>(&mut self, api: &A, surface: &mut S) -> Result<PageReport>
    where
        A: HnApi + ?Sized,
        S: Surface + ?Sized,
    {
        let ids = api.top_stories().await?;
        let start = self.cursor;
        let end = start.saturating_add(self.page_size).min(ids.len());
        let page = ids.get(start..end).unwrap_or_default();

        tracing::debug!(
            "Fetching page at {} ({} of {} ids)",
            start,
            page.len(),
            ids.len()
        );

        let mut rendered = 0;
        let mut items = stream::iter(page.iter().copied())
            .map(|id| api.item(id))
            .buffered(self.concurrency);

        while let Some(item) = items.next().await {
            let item = item?;
            surface.append_post(&item);
            rendered += 1;
        }

        self.cursor += match self.advance {
            CursorAdvance::FullPage => self.page_size,
            CursorAdvance::Rendered => rendered,
        };

        tracing::info!(
            "Rendered {} stories, cursor {} -> {}",
            rendered,
            start,
            self.cursor
        );

        Ok(PageReport {
            start,
            rendered,
            cursor: self.cursor,
            total: ids.len(),
        })
    }
}
