//! REST API handlers.
//!
//! Each handler delegates to the [`VpsService`](crate::VpsService) and
//! returns JSON responses; [`ApiError`] carries the error-body mapping.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use vps_core::{CreateVps, PatchVps, VpsRecord};

use crate::ApiState;
use crate::error::ApiError;
use crate::filter::VpsFilter;

/// List response: the records are wrapped under a `servers` key, never
/// returned as a bare array.
#[derive(serde::Serialize)]
pub struct ServerList {
    pub servers: Vec<VpsRecord>,
}

/// GET /api/v1/vps
pub async fn list_vps(
    State(state): State<ApiState>,
    Query(filter): Query<VpsFilter>,
) -> Result<Json<ServerList>, ApiError> {
    let servers = state.service.list(&filter)?;
    Ok(Json(ServerList { servers }))
}

/// POST /api/v1/vps
pub async fn create_vps(
    State(state): State<ApiState>,
    Json(input): Json<CreateVps>,
) -> Result<(StatusCode, Json<VpsRecord>), ApiError> {
    let record = state.service.create(&input)?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/v1/vps/{id}
pub async fn get_vps(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<VpsRecord>, ApiError> {
    let record = state.service.get(&id)?;
    Ok(Json(record))
}

/// PATCH /api/v1/vps/{id}
pub async fn update_vps(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(patch): Json<PatchVps>,
) -> Result<Json<VpsRecord>, ApiError> {
    let record = state.service.update_status(&id, &patch)?;
    Ok(Json(record))
}
