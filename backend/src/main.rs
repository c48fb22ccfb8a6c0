use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

mod config;
mod db;
mod domain;
mod error;
mod rest;
mod storage;
mod upload;

use config::Config;
use db::DbConnection;
use domain::{CattleService, FarmService, ProfileService, RecordService, UserService};
use rest::AppState;
use storage::{CattleRepository, FarmRepository, RecordRepository, UserRepository};
use upload::ImageHostClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::from_env()?;

    info!("Setting up database at {}", config.database_url);
    let db = DbConnection::new(&config.database_url).await?;

    let cattle_repo = Arc::new(CattleRepository::new(db.clone()));
    let record_repo = Arc::new(RecordRepository::new(db.clone()));

    let state = AppState {
        profile_service: ProfileService::new(cattle_repo.clone(), record_repo.clone()),
        cattle_service: CattleService::new(cattle_repo),
        farm_service: FarmService::new(Arc::new(FarmRepository::new(db.clone()))),
        record_service: RecordService::new(record_repo),
        user_service: UserService::new(Arc::new(UserRepository::new(db))),
        image_host: ImageHostClient::new(config.image_host_url, config.image_host_key),
        webhook_secret: config.webhook_secret,
    };

    let cors = CorsLayer::new()
        .allow_origin(config.frontend_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let app = Router::new()
        .nest("/api", rest::api_routes())
        .layer(cors)
        .with_state(state);

    info!("Starting server on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
