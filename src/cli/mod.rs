pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "ripple")]
#[command(about = "A terminal Hacker News reader", long_about = None)]
pub struct Cli {
    /// API base URL (defaults to the public Firebase endpoint)
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Stories fetched per page
    #[arg(short, long, global = true)]
    pub page_size: Option<usize>,

    /// Read this config file instead of ~/.config/ripple/config.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print top stories, one page at a time
    Top {
        /// Number of pages to print
        #[arg(long, default_value_t = 1)]
        pages: usize,
    },
    /// Print the discussion under a story
    Comments {
        /// Story id
        id: u64,

        /// Comment levels to load (1 = direct replies)
        #[arg(short, long)]
        depth: Option<usize>,
    },
    /// Print how many items and profiles changed recently
    Updates {
        /// Keep polling on the configured interval
        #[arg(short, long)]
        watch: bool,
    },
    /// Launch the TUI
    Tui,
}

impl Cli {
    /// Command-line flags take precedence over the config file.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(base) = &self.api_base {
            config.api.base_url = base.clone();
        }
        if let Some(page_size) = self.page_size {
            config.feed.page_size = page_size;
        }
        if let Some(Commands::Comments {
            depth: Some(depth), ..
        }) = &self.command
        {
            config.comments.depth = *depth;
        }
    }
}
