use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::app::Result;
use crate::config::LiveConfig;
use crate::domain::LiveCounts;
use crate::feed::Surface;
use crate::fetcher::HnApi;

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(5000);

/// Fetches `updates.json` and replaces the displayed counts.
pub async fn check_live_updates<A, S>(api: &A, surface: &mut S) -> Result<LiveCounts>
where
    A: HnApi + ?Sized,
    S: Surface + ?Sized,
{
    let updates = api.updates().await?;
    let counts = LiveCounts::from(&updates);
    surface.show_live_counts(counts);
    Ok(counts)
}

/// Outcome of one background poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveEvent {
    Counts(LiveCounts),
    Failed(String),
}

/// Polls the update counts on a fixed interval for the whole session.
///
/// A failed cycle is reported and forgotten; the next tick tries again.
#[derive(Debug, Clone)]
pub struct LivePoller {
    interval: Duration,
}

impl Default for LivePoller {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

impl LivePoller {
    /// `interval` is raised to at least one millisecond.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
        }
    }

    pub fn from_config(config: &LiveConfig) -> Self {
        Self::new(Duration::from_millis(config.interval_ms))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Polls forever, rendering straight into `surface`.
    pub async fn run<A, S>(&self, api: &A, surface: &mut S)
    where
        A: HnApi + ?Sized,
        S: Surface + ?Sized,
    {
        let mut timer = self.timer();
        timer.tick().await;

        loop {
            timer.tick().await;
            if let Err(e) = check_live_updates(api, surface).await {
                tracing::warn!("Live update failed: {}", e);
                surface.show_error(&format!("Live update failed: {}", e));
            }
        }
    }

    /// Polls on a background task and delivers each outcome over a channel.
    /// The task ends once the receiver is dropped.
    pub fn spawn<A>(self, api: Arc<A>) -> (JoinHandle<()>, mpsc::Receiver<LiveEvent>)
    where
        A: HnApi + Send + Sync + ?Sized + 'static,
    {
        let (tx, rx) = mpsc::channel(16);

        let handle = tokio::spawn(async move {
            let mut timer = self.timer();
            timer.tick().await;

            loop {
                timer.tick().await;

                let event = match api.updates().await {
                    Ok(updates) => {
                        let counts = LiveCounts::from(&updates);
                        tracing::debug!(
                            "Live counts: {} items, {} profiles",
                            counts.items,
                            counts.profiles
                        );
                        LiveEvent::Counts(counts)
                    }
                    Err(e) => {
                        tracing::warn!("Live update failed: {}", e);
                        LiveEvent::Failed(e.to_string())
                    }
                };

                if tx.send(event).await.is_err() {
                    tracing::debug!("Live update receiver closed");
                    break;
                }
            }
        });

        (handle, rx)
    }

    fn timer(&self) -> tokio::time::Interval {
        let mut timer = interval(self.interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        timer
    }
}
