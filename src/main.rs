//! Dockwatch - a state-managed daemon for an always-on standby display
//!
//! This is the main entry point for the dockwatch application.

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::info;

use dockwatch::{
    api::create_router,
    config::Config,
    power::SysfsBatteryProbe,
    session::CountdownEngine,
    state::AppState,
    style::StyleStore,
    tasks::{countdown_monitor_task, power_supervisor_task},
    utils::shutdown_signal,
    wake::LogOnlyWakePlatform,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("dockwatch={},tower_http=info", config.log_level()))
        .init();

    info!("Starting dockwatch v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, style_file={}, ambient_hold={}min, timer_hold={}h",
        config.host,
        config.port,
        config.style_file().display(),
        config.ambient_hold_minutes,
        config.timer_hold_hours
    );

    // Wire up the channels between the HTTP layer and the background tasks
    let (power_tx, power_rx) = mpsc::unbounded_channel();
    let (countdown_tx, countdown_rx) = mpsc::unbounded_channel();

    // Create application state
    let state = Arc::new(AppState::new(
        StyleStore::new(config.style_file()),
        Arc::new(SysfsBatteryProbe::new(config.battery_root.clone())),
        Arc::new(LogOnlyWakePlatform),
        CountdownEngine::new(countdown_tx),
        power_tx,
        config.host.clone(),
        config.port,
        config.ambient_hold(),
        config.timer_hold(),
    ));

    // Start the background tasks
    let supervisor_state = Arc::clone(&state);
    tokio::spawn(async move {
        power_supervisor_task(supervisor_state, power_rx).await;
    });
    let monitor_state = Arc::clone(&state);
    tokio::spawn(async move {
        countdown_monitor_task(monitor_state, countdown_rx).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /power/connected     - Start the standby session");
    info!("  POST /power/disconnected  - Stop the standby session");
    info!("  POST /power/boot-completed - Informational trigger");
    info!("  POST /timer/start         - Start a countdown");
    info!("  POST /timer/stop          - Stop the countdown");
    info!("  GET  /style, PUT /style   - Read or update the clock style");
    info!("  GET  /status              - Check session and countdown state");
    info!("  GET  /health              - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    // Tear everything down before exit so wake resources are released
    if let Err(e) = state.stop_session() {
        tracing::error!("Failed to stop session during shutdown: {}", e);
    }
    if let Err(e) = state.stop_countdown() {
        tracing::error!("Failed to stop countdown during shutdown: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
