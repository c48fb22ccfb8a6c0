use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::error::ApiError;
use crate::rest::AppState;
use shared::CattleProfile;

#[derive(Deserialize, Debug)]
pub struct ProfileQuery {
    pub id: Option<String>,
}

/// Axum handler for GET /api/cattle-profile
pub async fn get_cattle_profile(
    State(state): State<AppState>,
    Query(query): Query<ProfileQuery>,
) -> Result<(StatusCode, Json<CattleProfile>), ApiError> {
    info!("GET /api/cattle-profile - query: {:?}", query);

    let cattle_id = query.id.as_deref().unwrap_or_default();
    let profile = state.profile_service.get_cattle_profile(cattle_id).await?;

    Ok((StatusCode::OK, Json(profile)))
}
