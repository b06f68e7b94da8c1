//! Countdown event monitor background task

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{info, trace};

use crate::session::CountdownEvent;
use crate::state::AppState;

/// Background task that watches countdown events.
///
/// Ticks are only traced; the interesting transition is Finished, which must
/// drop the timer wake resource so the display is no longer pinned on after
/// the run completes. The finish is forwarded with its run identity and the
/// state layer ignores it when a newer run has already started, so a finish
/// that sat in the queue cannot strip the wake from the next run. Stop paths
/// release the same resource themselves, which is safe because release is
/// idempotent.
pub async fn countdown_monitor_task(
    state: Arc<AppState>,
    mut events_rx: mpsc::UnboundedReceiver<CountdownEvent>,
) {
    info!("Starting countdown monitor task");

    while let Some(event) = events_rx.recv().await {
        match event {
            CountdownEvent::Tick { remaining_seconds } => {
                trace!("Countdown tick: {}s remaining", remaining_seconds);
            }
            CountdownEvent::Finished { run } => {
                info!("Countdown run {} finished", run);
                state.handle_countdown_finished(run);
            }
        }
    }

    info!("Countdown event channel closed, monitor exiting");
}
