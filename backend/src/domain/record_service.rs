use std::sync::Arc;

use crate::error::ApiError;
use crate::storage::traits::RecordStorage;
use shared::{
    CreateHealthRecordRequest, CreateMilkRecordRequest, CreateReproductiveRecordRequest,
    CreateWeightRecordRequest, HealthRecord, MilkRecord, ReproductiveRecord, WeightRecord,
};

/// Service for the per-animal time-series records. Inserts are
/// append-only; referential integrity against the cattle table is the
/// store's foreign key, not re-checked here.
#[derive(Clone)]
pub struct RecordService {
    storage: Arc<dyn RecordStorage>,
}

impl RecordService {
    pub fn new(storage: Arc<dyn RecordStorage>) -> Self {
        Self { storage }
    }

    fn require_id<'a>(cattle_id: Option<&'a str>) -> Result<&'a str, ApiError> {
        cattle_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ApiError::InvalidRequest("Missing id".to_string()))
    }

    fn validate_base(cattle_id: &str, date: &str) -> Result<(), ApiError> {
        if cattle_id.trim().is_empty() {
            return Err(ApiError::InvalidRequest("Missing cattle_id".to_string()));
        }
        if date.trim().is_empty() {
            return Err(ApiError::InvalidRequest("Missing date".to_string()));
        }
        Ok(())
    }

    pub async fn list_health_records(
        &self,
        cattle_id: Option<&str>,
    ) -> Result<Vec<HealthRecord>, ApiError> {
        let id = Self::require_id(cattle_id)?;
        Ok(self.storage.list_health_records(id).await?)
    }

    pub async fn add_health_record(
        &self,
        request: CreateHealthRecordRequest,
    ) -> Result<HealthRecord, ApiError> {
        Self::validate_base(&request.cattle_id, &request.date)?;
        if request.category.trim().is_empty() {
            return Err(ApiError::InvalidRequest("Missing category".to_string()));
        }
        Ok(self.storage.insert_health_record(&request).await?)
    }

    pub async fn list_weight_records(
        &self,
        cattle_id: Option<&str>,
    ) -> Result<Vec<WeightRecord>, ApiError> {
        let id = Self::require_id(cattle_id)?;
        Ok(self.storage.list_weight_records(id).await?)
    }

    pub async fn add_weight_record(
        &self,
        request: CreateWeightRecordRequest,
    ) -> Result<WeightRecord, ApiError> {
        Self::validate_base(&request.cattle_id, &request.date)?;
        if request.weight <= 0.0 {
            return Err(ApiError::InvalidRequest(
                "weight must be positive".to_string(),
            ));
        }
        Ok(self.storage.insert_weight_record(&request).await?)
    }

    pub async fn list_milk_records(
        &self,
        cattle_id: Option<&str>,
    ) -> Result<Vec<MilkRecord>, ApiError> {
        let id = Self::require_id(cattle_id)?;
        Ok(self.storage.list_milk_records(id).await?)
    }

    pub async fn add_milk_record(
        &self,
        request: CreateMilkRecordRequest,
    ) -> Result<MilkRecord, ApiError> {
        Self::validate_base(&request.cattle_id, &request.date)?;
        if request.volume < 0.0 {
            return Err(ApiError::InvalidRequest(
                "volume cannot be negative".to_string(),
            ));
        }
        Ok(self.storage.insert_milk_record(&request).await?)
    }

    pub async fn list_reproductive_records(
        &self,
        cattle_id: Option<&str>,
    ) -> Result<Vec<ReproductiveRecord>, ApiError> {
        let id = Self::require_id(cattle_id)?;
        Ok(self.storage.list_reproductive_records(id).await?)
    }

    pub async fn add_reproductive_record(
        &self,
        request: CreateReproductiveRecordRequest,
    ) -> Result<ReproductiveRecord, ApiError> {
        Self::validate_base(&request.cattle_id, &request.date)?;
        Ok(self.storage.insert_reproductive_record(&request).await?)
    }
}
