//! # Storage Traits
//!
//! Abstraction over the record store. Domain services hold trait objects
//! rather than concrete repositories so tests can substitute fakes and
//! the store client stays an injected value instead of a process-wide
//! global.

use anyhow::Result;
use async_trait::async_trait;
use shared::{
    Cattle, CreateCattleRequest, CreateFarmRequest, CreateHealthRecordRequest,
    CreateMilkRecordRequest, CreateReproductiveRecordRequest, CreateUserRequest,
    CreateWeightRecordRequest, Farm, HealthRecord, MilkRecord, ReproductiveRecord,
    UpdateCattleRequest, User, WeightRecord,
};

/// Trait defining the interface for cattle storage operations
#[async_trait]
pub trait CattleStorage: Send + Sync {
    /// Insert a new cattle row, returning the stored row
    async fn store_cattle(&self, request: &CreateCattleRequest) -> Result<Cattle>;

    /// Retrieve a single cattle row by ID
    async fn get_cattle(&self, cattle_id: &str) -> Result<Option<Cattle>>;

    /// List all cattle belonging to a farm
    async fn list_cattle(&self, farm_id: &str) -> Result<Vec<Cattle>>;

    /// Apply a partial update; returns the updated row, or None if the
    /// cattle does not exist
    async fn update_cattle(
        &self,
        cattle_id: &str,
        changes: &UpdateCattleRequest,
    ) -> Result<Option<Cattle>>;

    /// Delete a cattle row. Returns true if a row was deleted.
    async fn delete_cattle(&self, cattle_id: &str) -> Result<bool>;
}

/// Trait defining the interface for the four per-animal record tables
#[async_trait]
pub trait RecordStorage: Send + Sync {
    async fn insert_health_record(
        &self,
        request: &CreateHealthRecordRequest,
    ) -> Result<HealthRecord>;
    async fn list_health_records(&self, cattle_id: &str) -> Result<Vec<HealthRecord>>;

    async fn insert_weight_record(
        &self,
        request: &CreateWeightRecordRequest,
    ) -> Result<WeightRecord>;
    async fn list_weight_records(&self, cattle_id: &str) -> Result<Vec<WeightRecord>>;

    async fn insert_milk_record(&self, request: &CreateMilkRecordRequest) -> Result<MilkRecord>;
    async fn list_milk_records(&self, cattle_id: &str) -> Result<Vec<MilkRecord>>;

    async fn insert_reproductive_record(
        &self,
        request: &CreateReproductiveRecordRequest,
    ) -> Result<ReproductiveRecord>;
    async fn list_reproductive_records(&self, cattle_id: &str)
        -> Result<Vec<ReproductiveRecord>>;
}

/// Trait defining the interface for farm storage operations
#[async_trait]
pub trait FarmStorage: Send + Sync {
    async fn store_farm(&self, request: &CreateFarmRequest) -> Result<Farm>;
    async fn get_farm(&self, farm_id: &str) -> Result<Option<Farm>>;
    async fn list_farms(&self, owner_id: &str) -> Result<Vec<Farm>>;
}

/// Trait defining the interface for user storage operations
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Insert or update a user keyed by the identity provider's user id
    async fn upsert_user(&self, request: &CreateUserRequest) -> Result<User>;
    async fn get_user_by_provider_id(&self, provider_user_id: &str) -> Result<Option<User>>;
}
