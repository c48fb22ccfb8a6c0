use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::storage::traits::FarmStorage;
use shared::{CreateFarmRequest, Farm};

/// Service for farm operations
#[derive(Clone)]
pub struct FarmService {
    storage: Arc<dyn FarmStorage>,
}

impl FarmService {
    pub fn new(storage: Arc<dyn FarmStorage>) -> Self {
        Self { storage }
    }

    pub async fn create_farm(&self, request: CreateFarmRequest) -> Result<Farm, ApiError> {
        if request.name.trim().is_empty()
            || request.location.trim().is_empty()
            || request.owner_id.trim().is_empty()
        {
            return Err(ApiError::InvalidRequest(
                "Missing required fields: name, location, or owner_id".to_string(),
            ));
        }

        let farm = self.storage.store_farm(&request).await?;
        info!("Created farm {} for owner {}", farm.id, farm.owner_id);
        Ok(farm)
    }

    pub async fn get_farm(&self, farm_id: Option<&str>) -> Result<Farm, ApiError> {
        let farm_id = farm_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ApiError::InvalidRequest("Missing farm id".to_string()))?;

        self.storage
            .get_farm(farm_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Farm not found: {farm_id}")))
    }

    pub async fn list_farms(&self, owner_id: Option<&str>) -> Result<Vec<Farm>, ApiError> {
        let owner_id = owner_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ApiError::InvalidRequest("Missing owner_id parameter".to_string()))?;

        Ok(self.storage.list_farms(owner_id).await?)
    }
}
