use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiError;
use crate::rest::AppState;
use shared::{CreateUserRequest, User};

#[derive(Deserialize, Debug)]
pub struct UserQuery {
    pub provider_user_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct UserRoleResponse {
    pub role: Option<String>,
}

/// Axum handler for GET /api/user
pub async fn get_user(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    info!("GET /api/user - query: {:?}", query);

    let user = state
        .user_service
        .get_user(query.provider_user_id.as_deref())
        .await?;
    Ok((StatusCode::OK, Json(user)))
}

/// Axum handler for POST /api/user
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    info!("POST /api/user - provider id: {}", request.provider_user_id);

    let user = state.user_service.create_user(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Axum handler for GET /api/user-role
pub async fn get_user_role(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<(StatusCode, Json<UserRoleResponse>), ApiError> {
    info!("GET /api/user-role - query: {:?}", query);

    let role = state
        .user_service
        .get_user_role(query.provider_user_id.as_deref())
        .await?;
    Ok((StatusCode::OK, Json(UserRoleResponse { role })))
}
