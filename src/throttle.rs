//! Call suppression for bursty triggers such as scroll events.
//!
//! A [`Throttle`] lets the first call through, then drops every call until
//! its window has elapsed. Dropped calls are lost, not deferred.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// A latch that admits at most one call per window.
///
/// Each instance owns its own latch and reset timer, so two throttles never
/// share suppression state. The reset timer runs on the tokio runtime, so
/// [`Throttle::call`] must be used from within one.
#[derive(Debug)]
pub struct Throttle {
    limit: Duration,
    latched: Arc<AtomicBool>,
}

impl Throttle {
    pub fn new(limit: Duration) -> Self {
        Self {
            limit,
            latched: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_latched(&self) -> bool {
        self.latched.load(Ordering::SeqCst)
    }

    /// Runs `f` and returns its result if the latch is open, otherwise drops
    /// the call and returns `None`.
    pub fn call<R>(&self, f: impl FnOnce() -> R) -> Option<R> {
        if self.is_latched() {
            tracing::trace!("throttled call dropped");
            return None;
        }

        let result = f();
        self.latched.store(true, Ordering::SeqCst);

        let latched = self.latched.clone();
        let limit = self.limit;
        tokio::spawn(async move {
            tokio::time::sleep(limit).await;
            latched.store(false, Ordering::SeqCst);
        });

        Some(result)
    }

    /// Claims the window without running anything. Returns false if the
    /// latch was already set.
    pub fn try_acquire(&self) -> bool {
        self.call(|| ()).is_some()
    }
}

/// A callable wrapped in its own [`Throttle`].
pub struct Throttled<F> {
    func: F,
    gate: Throttle,
}

/// Wraps `func` so that it runs at most once per `limit`.
pub fn throttle<F>(func: F, limit: Duration) -> Throttled<F> {
    Throttled {
        func,
        gate: Throttle::new(limit),
    }
}

impl<F> Throttled<F> {
    /// Forwards `args` to the wrapped callable unless the window is closed.
    pub fn call<A, R>(&mut self, args: A) -> Option<R>
    where
        F: FnMut(A) -> R,
    {
        let func = &mut self.func;
        self.gate.call(|| func(args))
    }

    pub fn is_latched(&self) -> bool {
        self.gate.is_latched()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn test_second_call_inside_window_is_dropped() {
        let calls = Cell::new(0);
        let mut throttled = throttle(|_: ()| calls.set(calls.get() + 1), Duration::from_millis(1000));

        assert_eq!(throttled.call(()), Some(()));
        sleep(Duration::from_millis(500)).await;
        assert_eq!(throttled.call(()), None);

        assert_eq!(calls.get(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_call_after_window_runs_again() {
        let calls = Cell::new(0);
        let mut throttled = throttle(|_: ()| calls.set(calls.get() + 1), Duration::from_millis(1000));

        throttled.call(());
        sleep(Duration::from_millis(1500)).await;
        throttled.call(());

        assert_eq!(calls.get(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_call_is_not_replayed() {
        let calls = Cell::new(0);
        let mut throttled = throttle(|_: ()| calls.set(calls.get() + 1), Duration::from_millis(1000));

        throttled.call(());
        throttled.call(());
        sleep(Duration::from_millis(5000)).await;

        assert_eq!(calls.get(), 1);
        assert!(!throttled.is_latched());
    }

    #[tokio::test(start_paused = true)]
    async fn test_arguments_and_result_are_forwarded() {
        let mut double = throttle(|n: u32| n * 2, Duration::from_millis(100));
        assert_eq!(double.call(21), Some(42));
        assert_eq!(double.call(5), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_instances_do_not_share_latch() {
        let calls = Cell::new(0);
        let bump = || calls.set(calls.get() + 1);
        let first = Throttle::new(Duration::from_millis(1000));
        let second = Throttle::new(Duration::from_millis(1000));

        first.call(bump);
        second.call(bump);
        first.call(bump);

        assert_eq!(calls.get(), 2);
        assert!(first.is_latched());
        assert!(second.is_latched());
    }

    #[tokio::test(start_paused = true)]
    async fn test_try_acquire_reopens_after_limit() {
        let gate = Throttle::new(Duration::from_millis(1000));

        assert!(gate.try_acquire());
        assert!(!gate.try_acquire());
        sleep(Duration::from_millis(1001)).await;
        assert!(gate.try_acquire());
    }
}
