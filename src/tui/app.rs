use std::collections::HashMap;

use crate::domain::{Item, LiveCounts, StoryId};
use crate::feed::Surface;
use crate::throttle::Throttle;

/// Rows moved by page up/down.
const PAGE_ROWS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    Feed,
    Comments,
}

impl ActivePane {
    pub fn toggle(self) -> Self {
        match self {
            ActivePane::Feed => ActivePane::Comments,
            ActivePane::Comments => ActivePane::Feed,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommentLine {
    pub item: Item,
    pub depth: usize,
}

pub struct TuiApp {
    pub active_pane: ActivePane,
    pub posts: Vec<Item>,
    /// Comment region per post, keyed by post id.
    pub comments: HashMap<StoryId, Vec<CommentLine>>,
    /// Post whose comments the comments pane shows.
    pub comments_for: Option<StoryId>,
    pub post_index: usize,
    pub comment_scroll: u16,
    pub live: Option<LiveCounts>,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub error_message: Option<String>,
    pub is_loading: bool,
}

impl TuiApp {
    pub fn new() -> Self {
        Self {
            active_pane: ActivePane::Feed,
            posts: Vec::new(),
            comments: HashMap::new(),
            comments_for: None,
            post_index: 0,
            comment_scroll: 0,
            live: None,
            should_quit: false,
            status_message: None,
            error_message: None,
            is_loading: false,
        }
    }

    pub fn selected_post(&self) -> Option<&Item> {
        self.posts.get(self.post_index)
    }

    pub fn shown_comments(&self) -> &[CommentLine] {
        self.comments_for
            .and_then(|id| self.comments.get(&id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn shown_post(&self) -> Option<&Item> {
        let id = self.comments_for?;
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn move_up(&mut self) {
        self.move_by(-1);
    }

    pub fn move_down(&mut self) {
        self.move_by(1);
    }

    pub fn page_up(&mut self) {
        self.move_by(-(PAGE_ROWS as isize));
    }

    pub fn page_down(&mut self) {
        self.move_by(PAGE_ROWS as isize);
    }

    fn move_by(&mut self, delta: isize) {
        match self.active_pane {
            ActivePane::Feed => {
                let last = self.posts.len().saturating_sub(1);
                self.post_index = self.post_index.saturating_add_signed(delta).min(last);
            }
            ActivePane::Comments => {
                let step = delta.unsigned_abs().min(u16::MAX as usize) as u16;
                self.comment_scroll = if delta < 0 {
                    self.comment_scroll.saturating_sub(step)
                } else {
                    self.comment_scroll.saturating_add(step)
                };
            }
        }
    }

    /// True when the feed selection is within `margin` rows of the last
    /// loaded story, which is where scrolling asks for another page.
    pub fn near_bottom(&self, margin: usize) -> bool {
        self.active_pane == ActivePane::Feed
            && self.posts.len().saturating_sub(self.post_index + 1) <= margin
    }

    /// Scrolling near the end of the feed asks for more, at most once per
    /// `throttle` window. Triggers inside the window are lost. The window is
    /// only claimed when the selection is near the bottom.
    pub fn should_load_more(&self, margin: usize, throttle: &Throttle) -> bool {
        self.near_bottom(margin) && throttle.try_acquire()
    }

    /// Show comments for `post_id` from the top.
    pub fn focus_comments(&mut self, post_id: StoryId) {
        self.comments_for = Some(post_id);
        self.comment_scroll = 0;
        self.active_pane = ActivePane::Comments;
    }

    pub fn set_status(&mut self, message: String) {
        self.error_message = None;
        self.status_message = Some(message);
    }
}

impl Default for TuiApp {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for TuiApp {
    fn append_post(&mut self, post: &Item) {
        self.posts.push(post.clone());
    }

    fn clear_comments(&mut self, post_id: StoryId) {
        self.comments.entry(post_id).or_default().clear();
    }

    fn append_comment(&mut self, post_id: StoryId, comment: &Item, depth: usize) {
        self.comments.entry(post_id).or_default().push(CommentLine {
            item: comment.clone(),
            depth,
        });
    }

    fn show_live_counts(&mut self, counts: LiveCounts) {
        self.live = Some(counts);
    }

    fn show_error(&mut self, message: &str) {
        self.error_message = Some(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemKind;
    use std::time::Duration;

    fn app_with_posts(count: u64) -> TuiApp {
        let mut app = TuiApp::new();
        for id in 1..=count {
            app.append_post(&Item::new(StoryId(id), ItemKind::Story));
        }
        app
    }

    #[test]
    fn test_movement_is_clamped() {
        let mut app = app_with_posts(3);
        app.move_up();
        assert_eq!(app.post_index, 0);

        app.page_down();
        assert_eq!(app.post_index, 2);

        app.move_down();
        assert_eq!(app.post_index, 2);
        assert_eq!(app.selected_post().map(|p| p.id), Some(StoryId(3)));
    }

    #[test]
    fn test_empty_feed_movement() {
        let mut app = TuiApp::new();
        app.move_down();
        assert_eq!(app.post_index, 0);
        assert!(app.selected_post().is_none());
        assert!(app.near_bottom(0));
    }

    #[test]
    fn test_near_bottom_uses_margin() {
        let mut app = app_with_posts(10);
        app.post_index = 5;
        assert!(!app.near_bottom(3));
        app.post_index = 6;
        assert!(app.near_bottom(3));

        app.active_pane = ActivePane::Comments;
        assert!(!app.near_bottom(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_scroll_load_is_throttled() {
        let mut app = app_with_posts(10);
        let throttle = Throttle::new(Duration::from_millis(1000));

        app.post_index = 2;
        assert!(!app.should_load_more(3, &throttle));
        assert!(!throttle.is_latched());

        app.post_index = 8;
        assert!(app.should_load_more(3, &throttle));
        app.move_down();
        assert!(!app.should_load_more(3, &throttle));

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(!app.should_load_more(3, &throttle));

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(app.should_load_more(3, &throttle));
    }

    #[test]
    fn test_comment_regions_are_per_post() {
        let mut app = app_with_posts(2);
        let reply = Item::new(StoryId(10), ItemKind::Comment);

        app.append_comment(StoryId(1), &reply, 0);
        app.append_comment(StoryId(2), &reply, 1);
        app.clear_comments(StoryId(1));

        assert!(app.comments[&StoryId(1)].is_empty());
        assert_eq!(app.comments[&StoryId(2)].len(), 1);

        app.focus_comments(StoryId(2));
        assert_eq!(app.shown_comments().len(), 1);
        assert_eq!(app.shown_post().map(|p| p.id), Some(StoryId(2)));
        assert_eq!(app.active_pane, ActivePane::Comments);
    }

    #[test]
    fn test_comment_pane_scrolls() {
        let mut app = TuiApp::new();
        app.active_pane = ActivePane::Comments;
        app.page_down();
        app.move_up();
        assert_eq!(app.comment_scroll, 9);
        app.page_up();
        assert_eq!(app.comment_scroll, 0);
    }

    #[test]
    fn test_status_replaces_error() {
        let mut app = TuiApp::new();
        app.show_error("boom");
        app.set_status("Loaded".into());
        assert!(app.error_message.is_none());
        assert_eq!(app.status_message.as_deref(), Some("Loaded"));
    }
}
