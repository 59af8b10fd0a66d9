//! # Ripple
//!
//! A terminal reader for the Hacker News API.
//!
//! ## Architecture
//!
//! ```text
//! HnApi → Paginator / CommentLoader / LivePoller → Surface
//! ```
//!
//! - [`fetcher`]: the read-only API and its reqwest implementation
//! - [`feed`]: fetch sequencing for the story feed, comment threads and
//!   live update counts, rendering into a [`feed::Surface`]
//! - [`throttle`]: drops calls that arrive inside a time window
//! - [`tui`]: terminal user interface built with ratatui
//!
//! ## Quick Start
//!
//! ```bash
//! # Print the first two pages of top stories
//! ripple top --pages 2
//!
//! # Print the replies to a story
//! ripple comments 8863
//!
//! # Watch the update counts
//! ripple updates --watch
//!
//! # Launch the TUI
//! ripple
//! ```

/// Application context and error handling.
pub mod app;

/// Command-line interface using clap.
///
/// - `top [--pages N]` - Print top stories page by page
/// - `comments <id>` - Print the discussion under a story
/// - `updates [--watch]` - Print live update counts
/// - `tui` - Launch the TUI
pub mod cli;

/// Configuration loaded from `~/.config/ripple/config.toml`.
pub mod config;

/// Items, story ids and update counts as served by the API.
pub mod domain;

/// Pagination, comment loading and live update polling.
pub mod feed;

/// Read access to the Hacker News API.
///
/// - [`HnApi`](fetcher::HnApi): async trait over the three endpoints
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Rate limiting for bursty triggers.
pub mod throttle;

/// Terminal user interface.
///
/// Live counts on top, the story feed, the comments of the selected story,
/// and a status bar. Keybindings: j/k navigate, Enter loads comments,
/// n loads more, o opens in browser, Tab switches pane, q quits.
pub mod tui;

#[cfg(test)]
pub(crate) mod testing;
