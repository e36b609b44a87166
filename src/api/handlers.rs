//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, Json},
};
use chrono::Utc;
use tracing::debug;

use crate::state::AppState;

use super::responses::{HealthResponse, StatusResponse};

/// Handle GET / - Render the page with its countdowns
pub async fn page_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    debug!("Rendering countdown page");
    Html(state.render_page())
}

/// Handle GET /status - Return the status of every countdown
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        selector: state.selector.clone(),
        widgets: state.widget_statuses(),
        all_expired: state.all_expired(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        timestamp: Utc::now(),
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
