pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::error::TryRecvError;

use crate::app::{AppContext, Result};
use crate::feed::{CommentLoader, LiveEvent, Paginator, Surface};
use crate::throttle::Throttle;

use self::app::{ActivePane, TuiApp};
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

const HN_ITEM_URL: &str = "https://news.ycombinator.com/item?id=";

pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>) -> Result<()> {
    let mut tui_app = TuiApp::new();
    let event_handler = EventHandler::new(Duration::from_millis(100));
    let keybindings = &ctx.config.keybindings;
    let colors = &ctx.config.colors;
    let scroll_margin = ctx.config.feed.scroll_margin;

    let mut paginator = ctx.paginator();
    let loader = ctx.comment_loader();
    let scroll_throttle = Throttle::new(Duration::from_millis(ctx.config.feed.scroll_throttle_ms));
    let (live_task, mut live_rx) = ctx.live_poller().spawn(ctx.api.clone());

    let invalid = keybindings.invalid_bindings();
    if !invalid.is_empty() {
        tracing::warn!("Ignoring invalid keybindings: {:?}", invalid);
    }

    tui_app.is_loading = true;
    terminal.draw(|frame| layout::render(frame, &tui_app, colors))?;
    load_page(&mut tui_app, &mut paginator, &ctx).await;

    loop {
        drain_live_events(&mut tui_app, &mut live_rx);
        terminal.draw(|frame| layout::render(frame, &tui_app, colors))?;

        let action = match event_handler.next()? {
            AppEvent::Key(key) => keybindings.get_action(&key),
            AppEvent::ScrollUp => Action::MoveUp,
            AppEvent::ScrollDown => Action::MoveDown,
            AppEvent::Tick => Action::None,
        };

        match action {
            Action::Quit => {
                tui_app.should_quit = true;
            }
            Action::MoveUp => {
                tui_app.move_up();
            }
            Action::MoveDown | Action::PageDown => {
                if action == Action::PageDown {
                    tui_app.page_down();
                } else {
                    tui_app.move_down();
                }
                if tui_app.should_load_more(scroll_margin, &scroll_throttle) {
                    load_page(&mut tui_app, &mut paginator, &ctx).await;
                }
            }
            Action::PageUp => {
                tui_app.page_up();
            }
            Action::NextPane => {
                tui_app.active_pane = tui_app.active_pane.toggle();
            }
            Action::LoadMore => {
                tui_app.is_loading = true;
                terminal.draw(|frame| layout::render(frame, &tui_app, colors))?;
                load_page(&mut tui_app, &mut paginator, &ctx).await;
            }
            Action::LoadComments => {
                let post_id = match tui_app.active_pane {
                    ActivePane::Feed => tui_app.selected_post().map(|p| p.id),
                    ActivePane::Comments => tui_app.comments_for,
                };
                if let Some(post_id) = post_id {
                    tui_app.focus_comments(post_id);
                    tui_app.is_loading = true;
                    terminal.draw(|frame| layout::render(frame, &tui_app, colors))?;
                    load_comments(&mut tui_app, &loader, &ctx, post_id).await;
                }
            }
            Action::OpenInBrowser => {
                if let Some(post) = tui_app.selected_post() {
                    let target = post
                        .url
                        .clone()
                        .unwrap_or_else(|| format!("{}{}", HN_ITEM_URL, post.id));
                    if let Err(e) = open::that(&target) {
                        tui_app.show_error(&format!("Failed to open browser: {}", e));
                    }
                }
            }
            Action::None => {}
        }

        if tui_app.should_quit {
            break;
        }
    }

    live_task.abort();
    Ok(())
}

/// Fetches the next page into the feed. Failures go to the status bar.
async fn load_page(tui_app: &mut TuiApp, paginator: &mut Paginator, ctx: &AppContext) {
    tui_app.is_loading = true;

    match paginator.fetch_posts(&*ctx.api, tui_app).await {
        Ok(report) if report.is_exhausted() => {
            tui_app.set_status(format!("No more stories ({} total)", report.total));
        }
        Ok(report) => {
            tui_app.set_status(format!(
                "Loaded {} stories ({} of {})",
                report.rendered,
                tui_app.posts.len(),
                report.total
            ));
        }
        Err(e) => {
            tracing::error!("Failed to load stories: {}", e);
            tui_app.show_error(&format!("Failed to load stories: {}", e));
        }
    }

    tui_app.is_loading = false;
}

async fn load_comments(
    tui_app: &mut TuiApp,
    loader: &CommentLoader,
    ctx: &AppContext,
    post_id: crate::domain::StoryId,
) {
    tui_app.is_loading = true;

    match loader.load_comments(&*ctx.api, tui_app, post_id).await {
        Ok(report) => {
            tui_app.set_status(format!("{} comments", report.rendered));
        }
        Err(e) => {
            tracing::error!("Failed to load comments for {}: {}", post_id, e);
            tui_app.show_error(&format!("Failed to load comments: {}", e));
        }
    }

    tui_app.is_loading = false;
}

fn drain_live_events(
    tui_app: &mut TuiApp,
    live_rx: &mut tokio::sync::mpsc::Receiver<LiveEvent>,
) {
    loop {
        match live_rx.try_recv() {
            Ok(LiveEvent::Counts(counts)) => tui_app.show_live_counts(counts),
            Ok(LiveEvent::Failed(message)) => {
                tui_app.show_error(&format!("Live update failed: {}", message));
            }
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => {
                tracing::debug!("Live update task ended");
                break;
            }
        }
    }
}
