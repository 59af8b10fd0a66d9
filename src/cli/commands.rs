use std::io::{self, Write};

use chrono::Utc;

use crate::app::{AppContext, Result};
use crate::domain::{Item, LiveCounts, StoryId};
use crate::feed::{check_live_updates, Surface};

/// Renders into a plain line-oriented writer.
pub struct PrintSurface<W: Write> {
    out: W,
    rank: usize,
}

impl PrintSurface<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> PrintSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out, rank: 0 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Surface for PrintSurface<W> {
    fn append_post(&mut self, post: &Item) {
        self.rank += 1;

        let domain = post
            .domain()
            .map(|d| format!(" ({})", d))
            .unwrap_or_default();
        let _ = writeln!(self.out, "{:>3}. {}{}", self.rank, post.display_title(), domain);

        let mut meta = format!(
            "{} points by {}",
            post.score.unwrap_or(0),
            post.display_author()
        );
        if let Some(age) = post.age(Utc::now()) {
            meta.push_str(&format!(" {}", age));
        }
        if let Some(count) = post.descendants {
            meta.push_str(&format!(" | {} comments", count));
        }
        let _ = writeln!(self.out, "     {} | id {}", meta, post.id);
    }

    fn clear_comments(&mut self, post_id: StoryId) {
        let _ = writeln!(self.out, "Comments on {}:", post_id);
    }

    fn append_comment(&mut self, _post_id: StoryId, comment: &Item, depth: usize) {
        let indent = "  ".repeat(depth + 1);
        let age = comment.age(Utc::now()).unwrap_or_default();
        let _ = writeln!(self.out, "{}{} {}", indent, comment.display_author(), age);
        for line in comment.display_text().lines() {
            let _ = writeln!(self.out, "{}  {}", indent, line);
        }
    }

    fn show_live_counts(&mut self, counts: LiveCounts) {
        let _ = writeln!(
            self.out,
            "Items updated: {}  Profiles updated: {}",
            counts.items, counts.profiles
        );
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("error: {}", message);
    }
}

pub async fn top_stories(ctx: &AppContext, pages: usize) -> Result<()> {
    let mut paginator = ctx.paginator();
    let mut surface = PrintSurface::stdout();

    for _ in 0..pages {
        let report = paginator.fetch_posts(&*ctx.api, &mut surface).await?;
        if report.is_exhausted() {
            println!("No more stories ({} total)", report.total);
            break;
        }
    }

    Ok(())
}

pub async fn comments(ctx: &AppContext, id: u64) -> Result<()> {
    let mut surface = PrintSurface::stdout();
    let report = ctx
        .comment_loader()
        .load_comments(&*ctx.api, &mut surface, StoryId(id))
        .await?;

    if report.rendered == 0 {
        println!("No comments");
    }
    Ok(())
}

pub async fn updates(ctx: &AppContext, watch: bool) -> Result<()> {
    let mut surface = PrintSurface::stdout();

    if watch {
        ctx.live_poller().run(&*ctx.api, &mut surface).await;
        return Ok(());
    }

    check_live_updates(&*ctx.api, &mut surface).await?;
    Ok(())
}
