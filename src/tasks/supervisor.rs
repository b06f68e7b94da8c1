//! Power event supervisor background task

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{error, info};

use crate::power::PowerEvent;
use crate::state::AppState;

/// Background task that owns the display session lifecycle.
///
/// Consumes power trigger events and maps them onto the session: Connected
/// starts a fresh session (superseding any active one), Disconnected tears
/// the current one down, BootCompleted only means triggers can now arrive.
/// Runs until the trigger channel closes.
pub async fn power_supervisor_task(
    state: Arc<AppState>,
    mut power_rx: mpsc::UnboundedReceiver<PowerEvent>,
) {
    info!("Starting power supervisor task");

    while let Some(event) = power_rx.recv().await {
        info!("Supervisor received trigger: {}", event.as_str());
        match event {
            PowerEvent::Connected => {
                if let Err(e) = state.start_session() {
                    error!("Failed to start display session: {}", e);
                }
            }
            PowerEvent::Disconnected => {
                if let Err(e) = state.stop_session() {
                    error!("Failed to stop display session: {}", e);
                }
            }
            PowerEvent::BootCompleted => {
                info!("Boot completed, ready for power events");
            }
        }
    }

    info!("Power trigger channel closed, supervisor exiting");
}
