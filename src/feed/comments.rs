use crate::app::Result;
use crate::config::CommentsConfig;
use crate::domain::StoryId;
use crate::feed::Surface;
use crate::fetcher::HnApi;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommentReport {
    pub fetched: usize,
    pub rendered: usize,
}

/// Loads the discussion under a post into its comment region.
#[derive(Debug, Clone)]
pub struct CommentLoader {
    depth: usize,
}

impl Default for CommentLoader {
    fn default() -> Self {
        Self::new(1)
    }
}

impl CommentLoader {
    /// `depth` counts comment levels to load; 1 means direct replies only.
    pub fn new(depth: usize) -> Self {
        Self {
            depth: depth.max(1),
        }
    }

    pub fn from_config(config: &CommentsConfig) -> Self {
        Self::new(config.depth)
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Re-fetches `post_id`, clears its comment region and renders its
    /// replies one by one in API order, depth first.
    ///
    /// Deleted and dead comments are fetched but neither rendered nor
    /// descended into.
    pub async fn load_comments<A, S>(
        &self,
        api: &A,
        surface: &mut S,
        post_id: StoryId,
    ) -> Result<CommentReport>
    where
        A: HnApi + ?Sized,
        S: Surface + ?Sized,
    {
        let post = api.item(post_id).await?;
        surface.clear_comments(post_id);

        let mut report = CommentReport::default();
        let mut pending: Vec<(StoryId, usize)> =
            post.kids().iter().rev().map(|&id| (id, 0)).collect();

        while let Some((id, level)) = pending.pop() {
            let comment = api.item(id).await?;
            report.fetched += 1;

            if !comment.is_visible() {
                tracing::debug!("Skipping hidden comment {}", id);
                continue;
            }

            surface.append_comment(post_id, &comment, level);
            report.rendered += 1;

            if level + 1 < self.depth {
                pending.extend(comment.kids().iter().rev().map(|&kid| (kid, level + 1)));
            }
        }

        tracing::info!(
            "Loaded {} of {} comments for {}",
            report.rendered,
            report.fetched,
            post_id
        );

        Ok(report)
    }
}
