use std::env;
use std::net::SocketAddr;

/// Process configuration, read once at startup and injected from `main`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to
    pub bind_addr: SocketAddr,
    /// SQLite database URL
    pub database_url: String,
    /// Origin the CORS layer allows the frontend to call from
    pub frontend_origin: String,
    /// Shared secret for verifying identity-provider webhook signatures
    pub webhook_secret: String,
    /// Base URL of the external image-hosting service
    pub image_host_url: String,
    /// API key sent to the image host, if it requires one
    pub image_host_key: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr = env::var("FARM_TRACKER_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()?;

        // An empty secret would let anyone forge webhook signatures, so
        // unlike the other settings it gets no default
        let webhook_secret = env::var("WEBHOOK_SECRET").unwrap_or_default();
        if webhook_secret.trim().is_empty() {
            anyhow::bail!("WEBHOOK_SECRET must be set to a non-empty value");
        }

        Ok(Self {
            bind_addr,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:farmtracker.db".to_string()),
            frontend_origin: env::var("FRONTEND_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            webhook_secret,
            image_host_url: env::var("IMAGE_HOST_URL")
                .unwrap_or_else(|_| "https://images.example.com".to_string()),
            image_host_key: env::var("IMAGE_HOST_KEY").ok(),
        })
    }
}
