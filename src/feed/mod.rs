//! Fetch sequencing: the story feed, comment threads and live counts.
//!
//! Each component pulls from an [`HnApi`](crate::fetcher::HnApi) and pushes
//! what it fetched into a [`Surface`], one item at a time.

pub mod comments;
pub mod live;
pub mod paginator;

pub use comments::{CommentLoader, CommentReport};
pub use live::{check_live_updates, LiveEvent, LivePoller};
pub use paginator::{CursorAdvance, PageReport, Paginator};

use crate::domain::{Item, LiveCounts, StoryId};

/// Where fetched items end up.
///
/// Regions are append-only except for the per-post comment region, which
/// is cleared before a reload, and the live counts, which are replaced.
pub trait Surface {
    /// Append a story to the feed region.
    fn append_post(&mut self, post: &Item);

    /// Empty the comment region of `post_id`.
    fn clear_comments(&mut self, post_id: StoryId);

    /// Append a comment under `post_id`. `depth` is 0 for direct replies.
    fn append_comment(&mut self, post_id: StoryId, comment: &Item, depth: usize);

    /// Replace the displayed live-update counts.
    fn show_live_counts(&mut self, counts: LiveCounts);

    /// Tell the user something failed.
    fn show_error(&mut self, message: &str);
}
