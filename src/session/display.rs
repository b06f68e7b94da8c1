//! Ambient standby display session

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::power::BatteryProbe;
use crate::sched::{TickControl, TickScheduler, TICK_PERIOD};
use crate::style::{self, ClockStyle, StyleStore, Theme};
use crate::wake::WakeResource;

/// One render payload, published once per tick for the display layer.
#[derive(Debug, Clone, Serialize)]
pub struct RenderFrame {
    /// Wall clock, "HH:MM".
    pub time_text: String,
    /// Full date, e.g. "Friday, 28 August".
    pub date_text: String,
    /// Battery status line.
    pub battery_text: String,
    pub style: ClockStyle,
    pub theme: Theme,
    pub generated_at: DateTime<Utc>,
}

impl RenderFrame {
    fn compose(store: &StyleStore, battery: &dyn BatteryProbe) -> Self {
        let style = store.get();
        let now = Local::now();
        Self {
            time_text: now.format("%H:%M").to_string(),
            date_text: now.format("%A, %-d %B").to_string(),
            battery_text: battery.read().display_text(),
            style,
            theme: style::resolve(style),
            generated_at: Utc::now(),
        }
    }
}

/// The externally visible standby session.
///
/// Construction acquires the wake resource and starts the render tick; every
/// tick re-reads the stored style, resolves its theme, reads clock and
/// battery, and publishes a [`RenderFrame`] on the watch channel. Teardown
/// stops the scheduler first and releases the wake resource second, exactly
/// once; after `stop` returns no further frame is published. Dropping an
/// active session tears it down.
pub struct DisplaySession {
    ticker: TickScheduler,
    wake: WakeResource,
    torn_down: bool,
}

impl DisplaySession {
    /// Acquire the wake resource and begin ticking at the 1-second cadence.
    pub fn start(
        store: StyleStore,
        battery: Arc<dyn BatteryProbe>,
        mut wake: WakeResource,
        frames: watch::Sender<Option<RenderFrame>>,
        max_hold: Duration,
    ) -> Self {
        wake.acquire(max_hold);

        let mut ticker = TickScheduler::new();
        ticker.start(TICK_PERIOD, move || {
            let frame = RenderFrame::compose(&store, battery.as_ref());
            frames.send(Some(frame)).ok();
            Ok(TickControl::Continue)
        });
        info!("Standby display session started");

        Self {
            ticker,
            wake,
            torn_down: false,
        }
    }

    /// Tear the session down: scheduler stop, then wake release.
    ///
    /// Idempotent; every later call is a no-op.
    pub fn stop(&mut self) {
        if self.torn_down {
            debug!("Display session already torn down");
            return;
        }
        self.ticker.stop();
        self.wake.release();
        self.torn_down = true;
        info!("Standby display session stopped");
    }

    pub fn is_active(&self) -> bool {
        !self.torn_down && self.ticker.is_running()
    }
}

impl Drop for DisplaySession {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::power::BatteryReading;
    use crate::wake::{WakePlatform, AMBIENT_MAX_HOLD};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;
    use tokio::time::sleep;

    #[derive(Default)]
    struct CountingProbe {
        reads: AtomicUsize,
    }

    impl BatteryProbe for CountingProbe {
        fn read(&self) -> BatteryReading {
            self.reads.fetch_add(1, Ordering::SeqCst);
            BatteryReading {
                percent: Some(77),
                charging: true,
            }
        }
    }

    #[derive(Default)]
    struct PairCountingPlatform {
        acquires: AtomicUsize,
        releases: AtomicUsize,
    }

    impl WakePlatform for PairCountingPlatform {
        fn request_stay_awake(&self, _max_hold: Duration) -> Result<(), String> {
            self.acquires.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn release_stay_awake(&self) {
            self.releases.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn session_lifecycle_pairs_acquire_with_release() {
        let dir = tempdir().unwrap();
        let store = StyleStore::new(dir.path().join("style.json"));
        store.set(ClockStyle::Neon);

        let probe = Arc::new(CountingProbe::default());
        let platform = Arc::new(PairCountingPlatform::default());
        let (frame_tx, frame_rx) = watch::channel(None);

        let mut session = DisplaySession::start(
            store,
            Arc::clone(&probe) as Arc<dyn BatteryProbe>,
            WakeResource::new(Arc::clone(&platform) as Arc<dyn WakePlatform>),
            frame_tx,
            AMBIENT_MAX_HOLD,
        );

        // Ticks at 0s..4s inclusive.
        sleep(Duration::from_millis(4500)).await;
        assert!(session.is_active());
        assert_eq!(probe.reads.load(Ordering::SeqCst), 5);

        let frame = frame_rx.borrow().clone().expect("frame published");
        assert_eq!(frame.style, ClockStyle::Neon);
        assert_eq!(frame.battery_text, "Charging — 77%");
        assert!(frame.theme.glow_radius > 0.0);

        session.stop();
        session.stop();
        assert!(!session.is_active());
        assert_eq!(platform.acquires.load(Ordering::SeqCst), 1);
        assert_eq!(platform.releases.load(Ordering::SeqCst), 1);

        // No frames after teardown.
        let at_stop = frame_rx.borrow().clone().unwrap().generated_at;
        sleep(Duration::from_secs(10)).await;
        assert_eq!(frame_rx.borrow().clone().unwrap().generated_at, at_stop);
        assert_eq!(probe.reads.load(Ordering::SeqCst), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_tears_the_session_down() {
        let dir = tempdir().unwrap();
        let store = StyleStore::new(dir.path().join("style.json"));
        let platform = Arc::new(PairCountingPlatform::default());
        let (frame_tx, _frame_rx) = watch::channel(None);

        {
            let _session = DisplaySession::start(
                store,
                Arc::new(CountingProbe::default()) as Arc<dyn BatteryProbe>,
                WakeResource::new(Arc::clone(&platform) as Arc<dyn WakePlatform>),
                frame_tx,
                AMBIENT_MAX_HOLD,
            );
            sleep(Duration::from_millis(1500)).await;
        }
        assert_eq!(platform.releases.load(Ordering::SeqCst), 1);
    }
}
