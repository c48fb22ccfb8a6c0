pub mod cattle_apis;
pub mod farm_apis;
pub mod profile_apis;
pub mod record_apis;
pub mod upload_apis;
pub mod user_apis;
pub mod webhook_apis;

use axum::routing::{get, post};
use axum::Router;

use crate::domain::{CattleService, FarmService, ProfileService, RecordService, UserService};
use crate::upload::ImageHostClient;

/// Application state shared across handlers. Constructed once in `main`
/// with the store client injected; handlers never reach for globals.
#[derive(Clone)]
pub struct AppState {
    pub profile_service: ProfileService,
    pub cattle_service: CattleService,
    pub farm_service: FarmService,
    pub record_service: RecordService,
    pub user_service: UserService,
    pub image_host: ImageHostClient,
    pub webhook_secret: String,
}

/// All API routes; nested under /api by the caller
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/cattle-profile", get(profile_apis::get_cattle_profile))
        .route(
            "/cattle",
            get(cattle_apis::list_cattle).post(cattle_apis::create_cattle),
        )
        .route(
            "/cattle/:id",
            axum::routing::put(cattle_apis::update_cattle).delete(cattle_apis::delete_cattle),
        )
        .route(
            "/farm",
            get(farm_apis::get_farm).post(farm_apis::create_farm),
        )
        .route("/farms", get(farm_apis::list_farms))
        .route(
            "/cattle-health",
            get(record_apis::list_health_records).post(record_apis::create_health_record),
        )
        .route(
            "/cattle-weight",
            get(record_apis::list_weight_records).post(record_apis::create_weight_record),
        )
        .route(
            "/cattle-milk",
            get(record_apis::list_milk_records).post(record_apis::create_milk_record),
        )
        .route(
            "/cattle-reproductive-history",
            get(record_apis::list_reproductive_records)
                .post(record_apis::create_reproductive_record),
        )
        .route(
            "/user",
            get(user_apis::get_user).post(user_apis::create_user),
        )
        .route("/user-role", get(user_apis::get_user_role))
        .route("/identity-webhook", post(webhook_apis::identity_webhook))
        .route("/upload", post(upload_apis::upload_image))
}
