//! Repeating, cancellable tick scheduler

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

/// The standard refresh cadence for display state.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// What the callback wants the schedule to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Stop,
}

/// A single repeating callback with a fixed period.
///
/// The first invocation fires immediately on `start`, then once per period.
/// Invocations run sequentially on one task and never overlap, so callbacks
/// may mutate shared display state without extra locking. `start` while
/// running replaces the previous schedule; `stop` on a stopped scheduler is a
/// no-op. After `stop` returns, no further callback for this instance fires:
/// stopping bumps a generation token that is checked before every invocation,
/// so a tick that was already scheduled mid-flight is suppressed.
///
/// Callback errors are logged and the schedule continues; a single missed
/// refresh is not worth losing the loop over.
#[derive(Debug)]
pub struct TickScheduler {
    generation: Arc<AtomicU64>,
    handle: Option<JoinHandle<()>>,
}

impl TickScheduler {
    /// Create a scheduler in the stopped state.
    pub fn new() -> Self {
        Self {
            generation: Arc::new(AtomicU64::new(0)),
            handle: None,
        }
    }

    /// Begin invoking `on_tick` immediately and then once per `period`.
    ///
    /// Any previous schedule on this instance is stopped first, so duplicate
    /// concurrent ticks never coexist.
    pub fn start<F>(&mut self, period: Duration, mut on_tick: F)
    where
        F: FnMut() -> anyhow::Result<TickControl> + Send + 'static,
    {
        self.stop();

        let generation = Arc::clone(&self.generation);
        let started_gen = generation.load(Ordering::SeqCst);

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;

                // A stop may have raced the wakeup; never invoke a stale tick.
                if generation.load(Ordering::SeqCst) != started_gen {
                    break;
                }

                match on_tick() {
                    Ok(TickControl::Continue) => {}
                    Ok(TickControl::Stop) => {
                        debug!("Tick callback requested stop, ending schedule");
                        break;
                    }
                    Err(e) => {
                        warn!("Tick callback failed, continuing schedule: {:#}", e);
                    }
                }
            }
        });

        self.handle = Some(handle);
    }

    /// Cancel all pending and future invocations.
    ///
    /// Safe to call when not running. Once this returns, the callback will
    /// not be invoked again for this instance.
    pub fn stop(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Whether a schedule is currently active.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;
    use tokio::time::sleep;

    fn counting_callback(counter: &Arc<AtomicU32>) -> impl FnMut() -> anyhow::Result<TickControl> {
        let counter = Arc::clone(counter);
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(TickControl::Continue)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn first_tick_fires_immediately_then_once_per_period() {
        let counter = Arc::new(AtomicU32::new(0));
        let mut sched = TickScheduler::new();
        sched.start(TICK_PERIOD, counting_callback(&counter));

        // Ticks land at t=0s, 1s, 2s; nothing at 2.5s yet.
        sleep(Duration::from_millis(2500)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 3);

        sleep(Duration::from_millis(1000)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_without_start_is_a_noop() {
        let mut sched = TickScheduler::new();
        sched.stop();
        sched.stop();
        assert!(!sched.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn no_callbacks_after_stop() {
        let counter = Arc::new(AtomicU32::new(0));
        let mut sched = TickScheduler::new();
        sched.start(TICK_PERIOD, counting_callback(&counter));

        sleep(Duration::from_millis(1500)).await;
        sched.stop();
        let at_stop = counter.load(Ordering::SeqCst);
        assert_eq!(at_stop, 2);

        sleep(Duration::from_secs(5)).await;
        assert_eq!(counter.load(Ordering::SeqCst), at_stop);
        assert!(!sched.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn restart_replaces_the_previous_schedule() {
        let first = Arc::new(AtomicU32::new(0));
        let second = Arc::new(AtomicU32::new(0));
        let mut sched = TickScheduler::new();

        sched.start(TICK_PERIOD, counting_callback(&first));
        sleep(Duration::from_millis(1500)).await;
        assert_eq!(first.load(Ordering::SeqCst), 2);

        sched.start(TICK_PERIOD, counting_callback(&second));
        sleep(Duration::from_millis(2500)).await;

        // Only the most recent schedule advances.
        assert_eq!(first.load(Ordering::SeqCst), 2);
        assert_eq!(second.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn callback_error_does_not_end_the_schedule() {
        let counter = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&counter);
        let mut sched = TickScheduler::new();
        sched.start(TICK_PERIOD, move || {
            let n = c.fetch_add(1, Ordering::SeqCst);
            if n == 0 {
                anyhow::bail!("transient render failure");
            }
            Ok(TickControl::Continue)
        });

        sleep(Duration::from_millis(2500)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 3);
        assert!(sched.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn callback_can_stop_its_own_schedule() {
        let counter = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&counter);
        let mut sched = TickScheduler::new();
        sched.start(TICK_PERIOD, move || {
            let n = c.fetch_add(1, Ordering::SeqCst) + 1;
            if n >= 3 {
                Ok(TickControl::Stop)
            } else {
                Ok(TickControl::Continue)
            }
        });

        sleep(Duration::from_secs(10)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 3);
        assert!(!sched.is_running());
    }
}
