use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::error::ApiError;
use crate::rest::AppState;
use shared::{Cattle, CreateCattleRequest, UpdateCattleRequest};

#[derive(Deserialize, Debug)]
pub struct CattleListQuery {
    pub farm_id: Option<String>,
}

/// Axum handler for GET /api/cattle
pub async fn list_cattle(
    State(state): State<AppState>,
    Query(query): Query<CattleListQuery>,
) -> Result<(StatusCode, Json<Vec<Cattle>>), ApiError> {
    info!("GET /api/cattle - query: {:?}", query);

    let herd = state
        .cattle_service
        .list_cattle(query.farm_id.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(herd)))
}

/// Axum handler for POST /api/cattle
pub async fn create_cattle(
    State(state): State<AppState>,
    Json(request): Json<CreateCattleRequest>,
) -> Result<(StatusCode, Json<Cattle>), ApiError> {
    info!("POST /api/cattle - farm: {}", request.farm_id);

    let cattle = state.cattle_service.create_cattle(request).await?;
    Ok((StatusCode::CREATED, Json(cattle)))
}

/// Axum handler for PUT /api/cattle/:id
pub async fn update_cattle(
    State(state): State<AppState>,
    Path(cattle_id): Path<String>,
    Json(changes): Json<UpdateCattleRequest>,
) -> Result<(StatusCode, Json<Cattle>), ApiError> {
    info!("PUT /api/cattle/{}", cattle_id);

    let cattle = state
        .cattle_service
        .update_cattle(&cattle_id, changes)
        .await?;
    Ok((StatusCode::OK, Json(cattle)))
}

/// Axum handler for DELETE /api/cattle/:id
pub async fn delete_cattle(
    State(state): State<AppState>,
    Path(cattle_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    info!("DELETE /api/cattle/{}", cattle_id);

    state.cattle_service.delete_cattle(&cattle_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
