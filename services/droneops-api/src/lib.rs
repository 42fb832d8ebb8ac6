//! DroneOps HTTP service
//!
//! Serves the pilot roster, drone fleet and mission sheets, flags
//! assignment conflicts and recommends pilots for a mission.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub mod config;
pub mod error;
pub mod handlers;
pub mod state;

pub use config::Config;
pub use error::ApiError;
pub use state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/pilots", get(handlers::list_pilots))
        .route("/drones", get(handlers::list_drones))
        .route("/missions", get(handlers::list_missions))
        .route("/missions/:project_id/matches", get(handlers::mission_matches))
        .route("/pilot/:row/status", post(handlers::update_pilot_status))
        .route("/conflicts", get(handlers::detect_conflicts))
        .route("/suggest-pilot/:project_id", get(handlers::suggest_pilot))
        .with_state(state)
}
