use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::storage::traits::CattleStorage;
use shared::{Cattle, CreateCattleRequest, UpdateCattleRequest};

/// Service for cattle CRUD. Validates input, then performs exactly one
/// store operation per call.
#[derive(Clone)]
pub struct CattleService {
    storage: Arc<dyn CattleStorage>,
}

impl CattleService {
    pub fn new(storage: Arc<dyn CattleStorage>) -> Self {
        Self { storage }
    }

    pub async fn create_cattle(&self, request: CreateCattleRequest) -> Result<Cattle, ApiError> {
        for (field, value) in [
            ("farm_id", &request.farm_id),
            ("breed", &request.breed),
            ("dob", &request.dob),
            ("status", &request.status),
        ] {
            if value.trim().is_empty() {
                return Err(ApiError::InvalidRequest(format!(
                    "Missing required field: {field}"
                )));
            }
        }

        let cattle = self.storage.store_cattle(&request).await?;
        info!("Registered cattle {} on farm {}", cattle.id, cattle.farm_id);
        Ok(cattle)
    }

    pub async fn list_cattle(&self, farm_id: Option<&str>) -> Result<Vec<Cattle>, ApiError> {
        let farm_id = farm_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                ApiError::InvalidRequest("Missing or invalid farm_id parameter".to_string())
            })?;

        Ok(self.storage.list_cattle(farm_id).await?)
    }

    pub async fn update_cattle(
        &self,
        cattle_id: &str,
        changes: UpdateCattleRequest,
    ) -> Result<Cattle, ApiError> {
        if cattle_id.trim().is_empty() {
            return Err(ApiError::InvalidRequest("Missing cattle_id".to_string()));
        }

        self.storage
            .update_cattle(cattle_id, &changes)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Cattle not found: {cattle_id}")))
    }

    pub async fn delete_cattle(&self, cattle_id: &str) -> Result<(), ApiError> {
        if cattle_id.trim().is_empty() {
            return Err(ApiError::InvalidRequest("Missing cattle_id".to_string()));
        }

        let deleted = self.storage.delete_cattle(cattle_id).await?;
        if !deleted {
            return Err(ApiError::NotFound(format!("Cattle not found: {cattle_id}")));
        }

        info!("Deleted cattle {}", cattle_id);
        Ok(())
    }
}
