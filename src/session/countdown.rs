//! Countdown timer state machine

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::sched::{TickControl, TickScheduler, TICK_PERIOD};

/// Where a countdown run currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownPhase {
    Idle,
    Running,
    Finished,
}

/// Events emitted by a running countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEvent {
    /// One per second while running, carrying the value to display.
    Tick { remaining_seconds: u64 },
    /// Exactly once when a run reaches zero. Never emitted on `stop`.
    ///
    /// Carries the run identity so a consumer that drains the channel late
    /// can tell a stale finish from the current run's.
    Finished { run: u64 },
}

/// Snapshot of the countdown for status reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountdownSnapshot {
    pub phase: CountdownPhase,
    pub remaining_seconds: Option<u64>,
    pub total_seconds: Option<u64>,
}

#[derive(Debug)]
struct CountdownState {
    phase: CountdownPhase,
    remaining_seconds: u64,
    total_seconds: u64,
}

/// A single-purpose countdown built on [`TickScheduler`].
///
/// Each tick emits the remaining value first, then decrements, so the value
/// shown at second N is N. When the counter reaches zero the engine stops its
/// own scheduler, emits [`CountdownEvent::Finished`] once, and goes terminal
/// for that run; a fresh `start` begins a new run. `start` with a
/// non-positive total is rejected without any state change.
///
/// Every run gets a fresh identity, reported by [`current_run`]; finish
/// events carry the identity of the run that produced them.
///
/// [`current_run`]: CountdownEngine::current_run
pub struct CountdownEngine {
    state: Arc<Mutex<CountdownState>>,
    ticker: TickScheduler,
    events: mpsc::UnboundedSender<CountdownEvent>,
    run: u64,
}

impl CountdownEngine {
    pub fn new(events: mpsc::UnboundedSender<CountdownEvent>) -> Self {
        Self {
            state: Arc::new(Mutex::new(CountdownState {
                phase: CountdownPhase::Idle,
                remaining_seconds: 0,
                total_seconds: 0,
            })),
            ticker: TickScheduler::new(),
            events,
            run: 0,
        }
    }

    /// Identity of the most recently started run. Zero before any run.
    pub fn current_run(&self) -> u64 {
        self.run
    }

    /// Begin a new run of `total_seconds`. Non-positive totals are a no-op.
    pub fn start(&mut self, total_seconds: i64) {
        if total_seconds <= 0 {
            warn!("Rejected countdown start with total_seconds={}", total_seconds);
            return;
        }
        let total = total_seconds as u64;

        // Replace any in-flight run before touching the counter.
        self.ticker.stop();
        self.run += 1;
        let run = self.run;

        if let Ok(mut state) = self.state.lock() {
            state.phase = CountdownPhase::Running;
            state.remaining_seconds = total;
            state.total_seconds = total;
        }
        info!("Countdown run {} started for {} seconds", run, total);

        let state = Arc::clone(&self.state);
        let events = self.events.clone();
        self.ticker.start(TICK_PERIOD, move || {
            let mut state = state
                .lock()
                .map_err(|e| anyhow::anyhow!("countdown state poisoned: {}", e))?;

            if state.phase != CountdownPhase::Running {
                return Ok(TickControl::Stop);
            }

            if state.remaining_seconds > 0 {
                // Emit first, then decrement: second N displays N.
                events
                    .send(CountdownEvent::Tick {
                        remaining_seconds: state.remaining_seconds,
                    })
                    .ok();
                state.remaining_seconds -= 1;
                Ok(TickControl::Continue)
            } else {
                state.phase = CountdownPhase::Finished;
                events.send(CountdownEvent::Finished { run }).ok();
                Ok(TickControl::Stop)
            }
        });
    }

    /// Cancel the current run without emitting a finish event.
    ///
    /// Safe to call when idle or finished.
    pub fn stop(&mut self) {
        self.ticker.stop();
        if let Ok(mut state) = self.state.lock() {
            if state.phase == CountdownPhase::Running {
                debug!(
                    "Countdown stopped with {} seconds remaining",
                    state.remaining_seconds
                );
            }
            state.phase = CountdownPhase::Idle;
            state.remaining_seconds = 0;
        }
    }

    pub fn phase(&self) -> CountdownPhase {
        self.state
            .lock()
            .map(|s| s.phase)
            .unwrap_or(CountdownPhase::Idle)
    }

    pub fn snapshot(&self) -> CountdownSnapshot {
        match self.state.lock() {
            Ok(state) => CountdownSnapshot {
                phase: state.phase,
                remaining_seconds: match state.phase {
                    CountdownPhase::Running => Some(state.remaining_seconds),
                    _ => None,
                },
                total_seconds: match state.phase {
                    CountdownPhase::Idle => None,
                    _ => Some(state.total_seconds),
                },
            },
            Err(_) => CountdownSnapshot {
                phase: CountdownPhase::Idle,
                remaining_seconds: None,
                total_seconds: None,
            },
        }
    }
}
