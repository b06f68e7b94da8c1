//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/power/connected", post(power_connected_handler))
        .route("/power/disconnected", post(power_disconnected_handler))
        .route("/power/boot-completed", post(boot_completed_handler))
        .route("/timer/start", post(timer_start_handler))
        .route("/timer/stop", post(timer_stop_handler))
        .route("/style", get(style_get_handler).put(style_put_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
