use std::fs;
use std::sync::{Arc, Mutex};

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ripple::app::AppContext;
use ripple::cli::{commands, Cli, Commands};
use ripple::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.as_ref().unwrap_or(&Commands::Tui);

    init_tracing(matches!(command, Commands::Tui));

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    cli.apply_overrides(&mut config);

    let ctx = AppContext::new(config)?;

    match command {
        Commands::Top { pages } => {
            commands::top_stories(&ctx, *pages).await?;
        }
        Commands::Comments { id, .. } => {
            commands::comments(&ctx, *id).await?;
        }
        Commands::Updates { watch } => {
            commands::updates(&ctx, *watch).await?;
        }
        Commands::Tui => {
            ripple::tui::run(Arc::new(ctx)).await?;
        }
    }

    Ok(())
}

/// The TUI owns the terminal, so its logs go to a file in the cache
/// directory instead of stderr.
fn init_tracing(to_file: bool) {
    let log_file = to_file
        .then(|| dirs::cache_dir().map(|d| d.join("ripple")))
        .flatten()
        .and_then(|dir| {
            fs::create_dir_all(&dir).ok()?;
            fs::File::create(dir.join("ripple.log")).ok()
        });

    let registry = tracing_subscriber::registry().with(EnvFilter::from_default_env());

    match log_file {
        Some(file) => registry
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .init(),
        None if to_file => registry.init(),
        None => registry.with(fmt::layer().with_writer(std::io::stderr)).init(),
    }
}
