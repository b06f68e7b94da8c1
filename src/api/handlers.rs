//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::power::PowerEvent;
use crate::state::AppState;
use crate::style::ClockStyle;

use super::responses::{format_remaining, ApiResponse, HealthResponse, StatusResponse, StyleResponse};

fn trigger_response(
    state: &AppState,
    event: PowerEvent,
    message: &str,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.send_power_event(event) {
        Ok(()) => {
            info!("{} trigger accepted", event.as_str());
            Ok(Json(ApiResponse::accepted(
                message.to_string(),
                state.session_active(),
                state.countdown_snapshot(),
            )))
        }
        Err(e) => {
            error!("Failed to forward {} trigger: {}", event.as_str(), e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /power/connected - start a standby session
pub async fn power_connected_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    trigger_response(&state, PowerEvent::Connected, "Standby session starting")
}

/// Handle POST /power/disconnected - tear the session down
pub async fn power_disconnected_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    trigger_response(&state, PowerEvent::Disconnected, "Standby session stopping")
}

/// Handle POST /power/boot-completed - informational only
pub async fn boot_completed_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    trigger_response(&state, PowerEvent::BootCompleted, "Ready for power events")
}

/// Request body for POST /timer/start
#[derive(Debug, Deserialize)]
pub struct TimerStartRequest {
    pub total_seconds: i64,
}

/// Handle POST /timer/start - begin a countdown run
pub async fn timer_start_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TimerStartRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    state.record_trigger("timer-start");

    match state.start_countdown(request.total_seconds) {
        Ok(()) => {
            info!(
                "Countdown started: {} ({} seconds)",
                format_remaining(request.total_seconds as u64),
                request.total_seconds
            );
            Ok(Json(ApiResponse::accepted(
                format!("Countdown started for {} seconds", request.total_seconds),
                state.session_active(),
                state.countdown_snapshot(),
            )))
        }
        Err(e) => {
            warn!("Countdown start rejected: {}", e);
            Ok(Json(ApiResponse::error(
                e,
                state.session_active(),
                state.countdown_snapshot(),
            )))
        }
    }
}

/// Handle POST /timer/stop - cancel the countdown without finishing it
pub async fn timer_stop_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    state.record_trigger("timer-stop");

    match state.stop_countdown() {
        Ok(()) => {
            info!("Countdown stopped");
            Ok(Json(ApiResponse::accepted(
                "Countdown stopped".to_string(),
                state.session_active(),
                state.countdown_snapshot(),
            )))
        }
        Err(e) => {
            error!("Failed to stop countdown: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /style - read the persisted style
pub async fn style_get_handler(State(state): State<Arc<AppState>>) -> Json<StyleResponse> {
    Json(StyleResponse::new(state.current_style()))
}

/// Request body for PUT /style
#[derive(Debug, Deserialize)]
pub struct StylePutRequest {
    pub style: ClockStyle,
}

/// Handle PUT /style - update the persisted style
///
/// The write is fire-and-forget; the next render tick picks the new style up.
pub async fn style_put_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StylePutRequest>,
) -> Json<StyleResponse> {
    info!("Style set to {}", request.style.as_str());
    state.style_store.set(request.style);
    Json(StyleResponse::new(state.current_style()))
}

/// Handle GET /status - check session, countdown, and render state
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let countdown = state.countdown_snapshot();
    let (timer_wake_held, timer_wake_expires_in_seconds) = state.timer_wake_status();
    let (last_trigger, last_trigger_time) = state.last_trigger();

    Json(StatusResponse {
        session_active: state.session_active(),
        countdown_display: countdown.remaining_seconds.map(format_remaining),
        countdown,
        timer_wake_held,
        timer_wake_expires_in_seconds,
        style: state.current_style(),
        frame: state.latest_frame(),
        uptime: state.uptime(),
        port: state.port,
        host: state.host.clone(),
        last_trigger,
        last_trigger_time,
    })
}

/// Handle GET /health - health check
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
