//! Handlers for the four per-animal record collections. Lists take the
//! cattle id as the `id` query parameter; creates take it in the body.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::error::ApiError;
use crate::rest::AppState;
use shared::{
    CreateHealthRecordRequest, CreateMilkRecordRequest, CreateReproductiveRecordRequest,
    CreateWeightRecordRequest, HealthRecord, MilkRecord, ReproductiveRecord, WeightRecord,
};

#[derive(Deserialize, Debug)]
pub struct RecordQuery {
    pub id: Option<String>,
}

/// Axum handler for GET /api/cattle-health
pub async fn list_health_records(
    State(state): State<AppState>,
    Query(query): Query<RecordQuery>,
) -> Result<(StatusCode, Json<Vec<HealthRecord>>), ApiError> {
    info!("GET /api/cattle-health - query: {:?}", query);
    let records = state
        .record_service
        .list_health_records(query.id.as_deref())
        .await?;
    Ok((StatusCode::OK, Json(records)))
}

/// Axum handler for POST /api/cattle-health
pub async fn create_health_record(
    State(state): State<AppState>,
    Json(request): Json<CreateHealthRecordRequest>,
) -> Result<(StatusCode, Json<HealthRecord>), ApiError> {
    info!("POST /api/cattle-health - cattle: {}", request.cattle_id);
    let record = state.record_service.add_health_record(request).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Axum handler for GET /api/cattle-weight
pub async fn list_weight_records(
    State(state): State<AppState>,
    Query(query): Query<RecordQuery>,
) -> Result<(StatusCode, Json<Vec<WeightRecord>>), ApiError> {
    info!("GET /api/cattle-weight - query: {:?}", query);
    let records = state
        .record_service
        .list_weight_records(query.id.as_deref())
        .await?;
    Ok((StatusCode::OK, Json(records)))
}

/// Axum handler for POST /api/cattle-weight
pub async fn create_weight_record(
    State(state): State<AppState>,
    Json(request): Json<CreateWeightRecordRequest>,
) -> Result<(StatusCode, Json<WeightRecord>), ApiError> {
    info!("POST /api/cattle-weight - cattle: {}", request.cattle_id);
    let record = state.record_service.add_weight_record(request).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Axum handler for GET /api/cattle-milk
pub async fn list_milk_records(
    State(state): State<AppState>,
    Query(query): Query<RecordQuery>,
) -> Result<(StatusCode, Json<Vec<MilkRecord>>), ApiError> {
    info!("GET /api/cattle-milk - query: {:?}", query);
    let records = state
        .record_service
        .list_milk_records(query.id.as_deref())
        .await?;
    Ok((StatusCode::OK, Json(records)))
}

/// Axum handler for POST /api/cattle-milk
pub async fn create_milk_record(
    State(state): State<AppState>,
    Json(request): Json<CreateMilkRecordRequest>,
) -> Result<(StatusCode, Json<MilkRecord>), ApiError> {
    info!("POST /api/cattle-milk - cattle: {}", request.cattle_id);
    let record = state.record_service.add_milk_record(request).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Axum handler for GET /api/cattle-reproductive-history
pub async fn list_reproductive_records(
    State(state): State<AppState>,
    Query(query): Query<RecordQuery>,
) -> Result<(StatusCode, Json<Vec<ReproductiveRecord>>), ApiError> {
    info!("GET /api/cattle-reproductive-history - query: {:?}", query);
    let records = state
        .record_service
        .list_reproductive_records(query.id.as_deref())
        .await?;
    Ok((StatusCode::OK, Json(records)))
}

/// Axum handler for POST /api/cattle-reproductive-history
pub async fn create_reproductive_record(
    State(state): State<AppState>,
    Json(request): Json<CreateReproductiveRecordRequest>,
) -> Result<(StatusCode, Json<ReproductiveRecord>), ApiError> {
    info!(
        "POST /api/cattle-reproductive-history - cattle: {}",
        request.cattle_id
    );
    let record = state
        .record_service
        .add_reproductive_record(request)
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}
