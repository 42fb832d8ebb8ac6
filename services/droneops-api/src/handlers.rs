use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use droneops_domain::{
    find_mission, match_pilots, recommend_pilot, scan_conflicts, Conflict, DomainError,
    PilotMatch, Recommendation, Record,
};
use droneops_store::CellRef;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConflictReport {
    pub conflicts: Vec<Conflict>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MatchReport {
    pub project_id: String,
    pub matches: Vec<PilotMatch>,
}

pub async fn root() -> Json<Value> {
    Json(json!({ "status": "Drone Ops Agent running" }))
}

pub async fn list_pilots(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Record>>, ApiError> {
    Ok(Json(state.pilot_records().await?))
}

pub async fn list_drones(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Record>>, ApiError> {
    Ok(Json(state.drone_records().await?))
}

pub async fn list_missions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Record>>, ApiError> {
    Ok(Json(state.mission_records().await?))
}

/// Write a pilot's status straight through to the roster sheet. `row` is the
/// sheet's own 1-based row number, header row included.
pub async fn update_pilot_status(
    State(state): State<Arc<AppState>>,
    Path(row): Path<u32>,
    Query(update): Query<StatusUpdate>,
) -> Result<Json<Value>, ApiError> {
    if row == 0 {
        return Err(ApiError::BadRequest("rows start at 1".to_string()));
    }

    let cell = CellRef::new(
        state.layout.pilots.sheet.clone(),
        &state.layout.pilot_status_column,
        row,
    )?;
    state.store.write_cell(&cell, &update.status).await?;

    info!(cell = %cell, status = %update.status, "pilot status updated");
    Ok(Json(json!({ "message": "Pilot status updated successfully" })))
}

pub async fn detect_conflicts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ConflictReport>, ApiError> {
    let pilots = state.pilots().await?;
    let drones = state.drones().await?;
    let missions = state.missions().await?;

    let conflicts = scan_conflicts(&pilots, &drones, &missions, state.now())?;
    info!(conflicts = conflicts.len(), "conflict scan complete");
    Ok(Json(ConflictReport { conflicts }))
}

pub async fn suggest_pilot(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<String>,
) -> Result<Json<Recommendation>, ApiError> {
    let pilots = state.pilots().await?;
    let missions = state.missions().await?;

    Ok(Json(recommend_pilot(&project_id, &pilots, &missions)?))
}

pub async fn mission_matches(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<String>,
) -> Result<Json<MatchReport>, ApiError> {
    let pilots = state.pilots().await?;
    let missions = state.missions().await?;

    let mission = find_mission(&project_id, &missions)
        .ok_or_else(|| DomainError::MissionNotFound(project_id.clone()))?;

    Ok(Json(MatchReport {
        matches: match_pilots(&pilots, mission),
        project_id,
    }))
}
