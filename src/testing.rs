//! In-memory API and recording surface shared by unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::app::{Result, RippleError};
use crate::domain::{Item, ItemKind, LiveCounts, StoryId, Updates};
use crate::feed::Surface;
use crate::fetcher::HnApi;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    TopStories,
    Item(StoryId),
    Updates,
}

#[derive(Default)]
pub struct MockApi {
    pub top: Vec<StoryId>,
    pub items: HashMap<StoryId, Item>,
    pub updates: Updates,
    pub failing: Vec<StoryId>,
    pub fail_updates: bool,
    pub log: Mutex<Vec<ApiCall>>,
}

impl MockApi {
    /// Stories `1..=count`, ranked in id order.
    pub fn with_stories(count: u64) -> Self {
        let mut api = Self::default();
        for id in 1..=count {
            api.add_story(id);
        }
        api
    }

    pub fn add_story(&mut self, id: u64) -> &mut Item {
        let mut item = Item::new(StoryId(id), ItemKind::Story);
        item.title = Some(format!("Story {}", id));
        item.by = Some("pg".into());
        item.score = Some(id as i64);
        self.top.push(StoryId(id));
        self.items.entry(StoryId(id)).or_insert(item)
    }

    pub fn add_comment(&mut self, id: u64, parent: u64, kids: &[u64]) -> &mut Item {
        let mut item = Item::new(StoryId(id), ItemKind::Comment);
        item.by = Some(format!("user{}", id));
        item.text = Some(format!("comment {}", id));
        item.parent = Some(StoryId(parent));
        if !kids.is_empty() {
            item.kids = Some(kids.iter().copied().map(StoryId).collect());
        }
        self.items.entry(StoryId(id)).or_insert(item)
    }

    pub fn set_kids(&mut self, id: u64, kids: &[u64]) {
        if let Some(item) = self.items.get_mut(&StoryId(id)) {
            item.kids = Some(kids.iter().copied().map(StoryId).collect());
        }
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.log.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn item_calls(&self) -> Vec<StoryId> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ApiCall::Item(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: ApiCall) {
        if let Ok(mut calls) = self.log.lock() {
            calls.push(call);
        }
    }
}

#[async_trait]
impl HnApi for MockApi {
    async fn top_stories(&self) -> Result<Vec<StoryId>> {
        self.record(ApiCall::TopStories);
        Ok(self.top.clone())
    }

    async fn item(&self, id: StoryId) -> Result<Item> {
        self.record(ApiCall::Item(id));
        if self.failing.contains(&id) {
            return Err(RippleError::Other(format!("connection reset fetching {}", id)));
        }
        self.items
            .get(&id)
            .cloned()
            .ok_or(RippleError::ItemNotFound(id))
    }

    async fn updates(&self) -> Result<Updates> {
        self.record(ApiCall::Updates);
        if self.fail_updates {
            return Err(RippleError::Other("updates unavailable".into()));
        }
        Ok(self.updates.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    Post(StoryId),
    ClearComments(StoryId),
    Comment {
        post: StoryId,
        comment: StoryId,
        depth: usize,
    },
    Live(LiveCounts),
    Error(String),
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub events: Vec<SurfaceEvent>,
}

impl RecordingSurface {
    pub fn posts(&self) -> Vec<StoryId> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::Post(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// Comments currently shown under `post`, honouring clears.
    pub fn comments(&self, post: StoryId) -> Vec<(StoryId, usize)> {
        let mut shown = Vec::new();
        for event in &self.events {
            match event {
                SurfaceEvent::ClearComments(id) if *id == post => shown.clear(),
                SurfaceEvent::Comment {
                    post: p,
                    comment,
                    depth,
                } if *p == post => shown.push((*comment, *depth)),
                _ => {}
            }
        }
        shown
    }
}

impl Surface for RecordingSurface {
    fn append_post(&mut self, post: &Item) {
        self.events.push(SurfaceEvent::Post(post.id));
    }

    fn clear_comments(&mut self, post_id: StoryId) {
        self.events.push(SurfaceEvent::ClearComments(post_id));
    }

    fn append_comment(&mut self, post_id: StoryId, comment: &Item, depth: usize) {
        self.events.push(SurfaceEvent::Comment {
            post: post_id,
            comment: comment.id,
            depth,
        });
    }

    fn show_live_counts(&mut self, counts: LiveCounts) {
        self.events.push(SurfaceEvent::Live(counts));
    }

    fn show_error(&mut self, message: &str) {
        self.events.push(SurfaceEvent::Error(message.to_string()));
    }
}
