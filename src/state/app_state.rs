//! Main application state management

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, watch};
use tracing::{info, warn};

use crate::power::{BatteryProbe, PowerEvent};
use crate::session::{CountdownEngine, CountdownSnapshot, DisplaySession, RenderFrame};
use crate::style::{ClockStyle, StyleStore};
use crate::wake::{WakePlatform, WakeResource};

/// Main application state shared between the HTTP layer and background tasks.
///
/// At most one ambient display session and one countdown exist at a time;
/// both live behind mutexes here and are driven through the methods below.
pub struct AppState {
    /// Durable clock style selection
    pub style_store: StyleStore,
    /// Collaborators injected into sessions
    battery: Arc<dyn BatteryProbe>,
    wake_platform: Arc<dyn WakePlatform>,
    /// The currently active ambient session, if any
    session: Mutex<Option<DisplaySession>>,
    /// Countdown engine and the wake resource backing a timer run
    countdown: Mutex<CountdownEngine>,
    timer_wake: Mutex<WakeResource>,
    /// Latest render frame for status reporting
    pub frame_tx: watch::Sender<Option<RenderFrame>>,
    pub frame_rx: watch::Receiver<Option<RenderFrame>>,
    /// Power trigger channel into the supervisor task
    pub power_tx: mpsc::UnboundedSender<PowerEvent>,
    /// Last trigger tracking
    last_trigger: Mutex<Option<String>>,
    last_trigger_time: Mutex<Option<DateTime<Utc>>>,
    /// Server metadata
    pub start_time: Instant,
    pub host: String,
    pub port: u16,
    /// Wake hold caps
    pub ambient_hold: Duration,
    pub timer_hold: Duration,
}

impl AppState {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        style_store: StyleStore,
        battery: Arc<dyn BatteryProbe>,
        wake_platform: Arc<dyn WakePlatform>,
        countdown: CountdownEngine,
        power_tx: mpsc::UnboundedSender<PowerEvent>,
        host: String,
        port: u16,
        ambient_hold: Duration,
        timer_hold: Duration,
    ) -> Self {
        let (frame_tx, frame_rx) = watch::channel(None);
        let timer_wake = WakeResource::new(Arc::clone(&wake_platform));

        Self {
            style_store,
            battery,
            wake_platform,
            session: Mutex::new(None),
            countdown: Mutex::new(countdown),
            timer_wake: Mutex::new(timer_wake),
            frame_tx,
            frame_rx,
            power_tx,
            last_trigger: Mutex::new(None),
            last_trigger_time: Mutex::new(None),
            start_time: Instant::now(),
            host,
            port,
            ambient_hold,
            timer_hold,
        }
    }

    /// Record the most recent external trigger for status reporting.
    pub fn record_trigger(&self, trigger: &str) {
        if let Ok(mut last) = self.last_trigger.lock() {
            *last = Some(trigger.to_string());
        }
        if let Ok(mut last_time) = self.last_trigger_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Forward a power event to the supervisor task.
    pub fn send_power_event(&self, event: PowerEvent) -> Result<(), String> {
        self.record_trigger(event.as_str());
        self.power_tx
            .send(event)
            .map_err(|e| format!("Supervisor is not running: {}", e))
    }

    /// Start a fresh ambient session, superseding any active one.
    pub fn start_session(&self) -> Result<(), String> {
        let mut slot = self
            .session
            .lock()
            .map_err(|e| format!("Failed to lock session slot: {}", e))?;

        if let Some(mut previous) = slot.take() {
            info!("Superseding the active display session");
            previous.stop();
        }

        let session = DisplaySession::start(
            self.style_store.clone(),
            Arc::clone(&self.battery),
            WakeResource::new(Arc::clone(&self.wake_platform)),
            self.frame_tx.clone(),
            self.ambient_hold,
        );
        *slot = Some(session);
        Ok(())
    }

    /// Tear down the active ambient session, if any.
    pub fn stop_session(&self) -> Result<(), String> {
        let mut slot = self
            .session
            .lock()
            .map_err(|e| format!("Failed to lock session slot: {}", e))?;

        match slot.take() {
            Some(mut session) => {
                session.stop();
            }
            None => {
                info!("No active display session to stop");
            }
        }
        Ok(())
    }

    pub fn session_active(&self) -> bool {
        self.session
            .lock()
            .map(|slot| slot.as_ref().is_some_and(|s| s.is_active()))
            .unwrap_or(false)
    }

    /// Start a countdown run. Non-positive totals are rejected here, before
    /// any wake or engine state changes.
    ///
    /// Lock order is engine before wake, matching
    /// [`handle_countdown_finished`], so a queued finish event can never
    /// interleave between the wake acquire and the run switch.
    ///
    /// [`handle_countdown_finished`]: AppState::handle_countdown_finished
    pub fn start_countdown(&self, total_seconds: i64) -> Result<(), String> {
        if total_seconds <= 0 {
            return Err(format!(
                "total_seconds must be positive, got {}",
                total_seconds
            ));
        }

        let mut engine = self
            .countdown
            .lock()
            .map_err(|e| format!("Failed to lock countdown engine: {}", e))?;

        {
            let mut wake = self
                .timer_wake
                .lock()
                .map_err(|e| format!("Failed to lock timer wake: {}", e))?;
            wake.acquire(self.timer_hold);
        }

        engine.start(total_seconds);
        Ok(())
    }

    /// Cancel the countdown without a finish event and drop the timer wake.
    pub fn stop_countdown(&self) -> Result<(), String> {
        {
            let mut engine = self
                .countdown
                .lock()
                .map_err(|e| format!("Failed to lock countdown engine: {}", e))?;
            engine.stop();
        }
        self.release_timer_wake();
        Ok(())
    }

    /// Release the timer wake resource. Called on finish and on stop; safe
    /// either way because release is idempotent.
    fn release_timer_wake(&self) {
        match self.timer_wake.lock() {
            Ok(mut wake) => wake.release(),
            Err(e) => warn!("Failed to lock timer wake for release: {}", e),
        }
    }

    /// React to a countdown finish event for the given run.
    ///
    /// Only the current run may drop the timer wake: a finish that was still
    /// queued when a newer run started must not strip the wake out from
    /// under it. The engine lock is held across the release so no new run
    /// can begin in between.
    pub fn handle_countdown_finished(&self, run: u64) {
        let engine = match self.countdown.lock() {
            Ok(engine) => engine,
            Err(e) => {
                warn!("Failed to lock countdown engine: {}", e);
                return;
            }
        };

        if engine.current_run() != run {
            info!(
                "Ignoring finish event from superseded countdown run {} (current is {})",
                run,
                engine.current_run()
            );
            return;
        }

        self.release_timer_wake();
    }

    /// Whether the timer wake is held, and how long until the platform may
    /// reclaim it.
    pub fn timer_wake_status(&self) -> (bool, Option<u64>) {
        match self.timer_wake.lock() {
            Ok(wake) => (
                wake.is_held(),
                wake.expires_at()
                    .map(|at| at.saturating_duration_since(Instant::now()).as_secs()),
            ),
            Err(_) => (false, None),
        }
    }

    pub fn countdown_snapshot(&self) -> CountdownSnapshot {
        match self.countdown.lock() {
            Ok(engine) => engine.snapshot(),
            Err(_) => CountdownSnapshot {
                phase: crate::session::CountdownPhase::Idle,
                remaining_seconds: None,
                total_seconds: None,
            },
        }
    }

    /// Current style, with the store's default fallback.
    pub fn current_style(&self) -> ClockStyle {
        self.style_store.get()
    }

    pub fn latest_frame(&self) -> Option<RenderFrame> {
        self.frame_rx.borrow().clone()
    }

    /// Calculate server uptime as a formatted string.
    pub fn uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last trigger information.
    pub fn last_trigger(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let trigger = self.last_trigger.lock().ok().and_then(|t| t.clone());
        let time = self.last_trigger_time.lock().ok().and_then(|t| *t);
        (trigger, time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::power::BatteryReading;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;
    use tokio::time::sleep;

    struct StubProbe;

    impl BatteryProbe for StubProbe {
        fn read(&self) -> BatteryReading {
            BatteryReading::unavailable()
        }
    }

    #[derive(Default)]
    struct CountingPlatform {
        acquires: AtomicUsize,
        releases: AtomicUsize,
    }

    impl WakePlatform for CountingPlatform {
        fn request_stay_awake(&self, _max_hold: Duration) -> Result<(), String> {
            self.acquires.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn release_stay_awake(&self) {
            self.releases.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn test_state(
        dir: &std::path::Path,
        platform: Arc<CountingPlatform>,
    ) -> (Arc<AppState>, mpsc::UnboundedReceiver<PowerEvent>) {
        let (power_tx, power_rx) = mpsc::unbounded_channel();
        let (cd_tx, _cd_rx) = mpsc::unbounded_channel();
        let state = AppState::new(
            StyleStore::new(dir.join("style.json")),
            Arc::new(StubProbe),
            platform as Arc<dyn WakePlatform>,
            CountdownEngine::new(cd_tx),
            power_tx,
            "127.0.0.1".to_string(),
            0,
            Duration::from_secs(600),
            Duration::from_secs(86400),
        );
        (Arc::new(state), power_rx)
    }

    #[tokio::test(start_paused = true)]
    async fn session_start_and_stop_pair_wake_calls() {
        let dir = tempdir().unwrap();
        let platform = Arc::new(CountingPlatform::default());
        let (state, _power_rx) = test_state(dir.path(), Arc::clone(&platform));

        state.start_session().unwrap();
        assert!(state.session_active());
        sleep(Duration::from_millis(1500)).await;

        state.stop_session().unwrap();
        state.stop_session().unwrap();
        assert!(!state.session_active());
        assert_eq!(platform.acquires.load(Ordering::SeqCst), 1);
        assert_eq!(platform.releases.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn new_session_supersedes_the_previous_one() {
        let dir = tempdir().unwrap();
        let platform = Arc::new(CountingPlatform::default());
        let (state, _power_rx) = test_state(dir.path(), Arc::clone(&platform));

        state.start_session().unwrap();
        state.start_session().unwrap();
        assert!(state.session_active());
        // The superseded session released its own wake resource.
        assert_eq!(platform.acquires.load(Ordering::SeqCst), 2);
        assert_eq!(platform.releases.load(Ordering::SeqCst), 1);

        state.stop_session().unwrap();
        assert_eq!(platform.releases.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_rejection_leaves_wake_untouched() {
        let dir = tempdir().unwrap();
        let platform = Arc::new(CountingPlatform::default());
        let (state, _power_rx) = test_state(dir.path(), Arc::clone(&platform));

        assert!(state.start_countdown(0).is_err());
        assert!(state.start_countdown(-5).is_err());
        assert_eq!(platform.acquires.load(Ordering::SeqCst), 0);
        assert_eq!(state.timer_wake_status(), (false, None));

        state.start_countdown(30).unwrap();
        assert_eq!(platform.acquires.load(Ordering::SeqCst), 1);
        let (held, expires_in) = state.timer_wake_status();
        assert!(held);
        assert!(expires_in.is_some_and(|secs| secs <= 86400));

        state.stop_countdown().unwrap();
        assert_eq!(platform.releases.load(Ordering::SeqCst), 1);
        assert_eq!(state.timer_wake_status(), (false, None));
    }
}
