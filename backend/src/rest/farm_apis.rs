use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::error::ApiError;
use crate::rest::AppState;
use shared::{CreateFarmRequest, Farm};

#[derive(Deserialize, Debug)]
pub struct FarmQuery {
    pub id: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct FarmListQuery {
    pub owner_id: Option<String>,
}

/// Axum handler for GET /api/farm
pub async fn get_farm(
    State(state): State<AppState>,
    Query(query): Query<FarmQuery>,
) -> Result<(StatusCode, Json<Farm>), ApiError> {
    info!("GET /api/farm - query: {:?}", query);

    let farm = state.farm_service.get_farm(query.id.as_deref()).await?;
    Ok((StatusCode::OK, Json(farm)))
}

/// Axum handler for GET /api/farms
pub async fn list_farms(
    State(state): State<AppState>,
    Query(query): Query<FarmListQuery>,
) -> Result<(StatusCode, Json<Vec<Farm>>), ApiError> {
    info!("GET /api/farms - query: {:?}", query);

    let farms = state
        .farm_service
        .list_farms(query.owner_id.as_deref())
        .await?;
    Ok((StatusCode::OK, Json(farms)))
}

/// Axum handler for POST /api/farm
pub async fn create_farm(
    State(state): State<AppState>,
    Json(request): Json<CreateFarmRequest>,
) -> Result<(StatusCode, Json<Farm>), ApiError> {
    info!("POST /api/farm - name: {}", request.name);

    let farm = state.farm_service.create_farm(request).await?;
    Ok((StatusCode::CREATED, Json(farm)))
}
