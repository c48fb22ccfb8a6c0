use std::sync::Arc;
use tracing::{error, info};

use crate::error::ApiError;
use crate::storage::traits::{CattleStorage, RecordStorage};
use shared::CattleProfile;

/// Service composing one cattle row with its four record histories.
///
/// The five reads are dispatched concurrently and the call waits for all
/// of them to settle. The contract is all-or-nothing: if any read fails,
/// the whole call fails with every failure reason in one message, so a
/// caller can never receive a profile with silently missing sections.
#[derive(Clone)]
pub struct ProfileService {
    cattle: Arc<dyn CattleStorage>,
    records: Arc<dyn RecordStorage>,
}

impl ProfileService {
    pub fn new(cattle: Arc<dyn CattleStorage>, records: Arc<dyn RecordStorage>) -> Self {
        Self { cattle, records }
    }

    pub async fn get_cattle_profile(&self, cattle_id: &str) -> Result<CattleProfile, ApiError> {
        let cattle_id = cattle_id.trim();
        if cattle_id.is_empty() {
            return Err(ApiError::InvalidRequest("Missing cattle_id".to_string()));
        }

        info!("Building cattle profile for {}", cattle_id);

        let (cattle_res, health_res, weight_res, milk_res, reproductive_res) = tokio::join!(
            self.cattle.get_cattle(cattle_id),
            self.records.list_health_records(cattle_id),
            self.records.list_weight_records(cattle_id),
            self.records.list_milk_records(cattle_id),
            self.records.list_reproductive_records(cattle_id),
        );

        match (cattle_res, health_res, weight_res, milk_res, reproductive_res) {
            (Ok(cattle), Ok(health_records), Ok(weight_records), Ok(milk_production), Ok(reproductive_history)) => {
                let cattle = cattle.ok_or_else(|| {
                    ApiError::NotFound(format!("Cattle not found: {cattle_id}"))
                })?;

                Ok(CattleProfile {
                    cattle,
                    health_records,
                    weight_records,
                    milk_production,
                    reproductive_history,
                })
            }
            (cattle_res, health_res, weight_res, milk_res, reproductive_res) => {
                // One combined diagnostic, not just the first failure
                let reasons: Vec<String> = [
                    cattle_res.err().map(|e| e.to_string()),
                    health_res.err().map(|e| e.to_string()),
                    weight_res.err().map(|e| e.to_string()),
                    milk_res.err().map(|e| e.to_string()),
                    reproductive_res.err().map(|e| e.to_string()),
                ]
                .into_iter()
                .flatten()
                .collect();

                let combined = reasons.join(", ");
                error!("Failed to fetch cattle profile data: {}", combined);
                Err(ApiError::Upstream(combined))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbConnection;
    use crate::storage::{CattleRepository, RecordRepository};
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use shared::{
        Cattle, CreateCattleRequest, CreateHealthRecordRequest, CreateMilkRecordRequest,
        CreateReproductiveRecordRequest, CreateWeightRecordRequest, Gender, HealthRecord,
        MilkRecord, ReproductiveRecord, UpdateCattleRequest, WeightRecord,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory store with per-query failure injection and a call counter
    #[derive(Default)]
    struct FakeStore {
        cattle: Option<Cattle>,
        weight_records: Vec<WeightRecord>,
        fail_cattle: Option<String>,
        fail_health: Option<String>,
        fail_weight: Option<String>,
        fail_milk: Option<String>,
        fail_reproductive: Option<String>,
        calls: AtomicUsize,
    }

    impl FakeStore {
        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn bump(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl CattleStorage for FakeStore {
        async fn store_cattle(&self, _request: &CreateCattleRequest) -> Result<Cattle> {
            unimplemented!("not used by profile tests")
        }

        async fn get_cattle(&self, _cattle_id: &str) -> Result<Option<Cattle>> {
            self.bump();
            match &self.fail_cattle {
                Some(msg) => Err(anyhow!("{msg}")),
                None => Ok(self.cattle.clone()),
            }
        }

        async fn list_cattle(&self, _farm_id: &str) -> Result<Vec<Cattle>> {
            unimplemented!("not used by profile tests")
        }

        async fn update_cattle(
            &self,
            _cattle_id: &str,
            _changes: &UpdateCattleRequest,
        ) -> Result<Option<Cattle>> {
            unimplemented!("not used by profile tests")
        }

        async fn delete_cattle(&self, _cattle_id: &str) -> Result<bool> {
            unimplemented!("not used by profile tests")
        }
    }

    #[async_trait]
    impl RecordStorage for FakeStore {
        async fn insert_health_record(
            &self,
            _request: &CreateHealthRecordRequest,
        ) -> Result<HealthRecord> {
            unimplemented!("not used by profile tests")
        }

        async fn list_health_records(&self, _cattle_id: &str) -> Result<Vec<HealthRecord>> {
            self.bump();
            match &self.fail_health {
                Some(msg) => Err(anyhow!("{msg}")),
                None => Ok(vec![]),
            }
        }

        async fn insert_weight_record(
            &self,
            _request: &CreateWeightRecordRequest,
        ) -> Result<WeightRecord> {
            unimplemented!("not used by profile tests")
        }

        async fn list_weight_records(&self, _cattle_id: &str) -> Result<Vec<WeightRecord>> {
            self.bump();
            match &self.fail_weight {
                Some(msg) => Err(anyhow!("{msg}")),
                None => Ok(self.weight_records.clone()),
            }
        }

        async fn insert_milk_record(
            &self,
            _request: &CreateMilkRecordRequest,
        ) -> Result<MilkRecord> {
            unimplemented!("not used by profile tests")
        }

        async fn list_milk_records(&self, _cattle_id: &str) -> Result<Vec<MilkRecord>> {
            self.bump();
            match &self.fail_milk {
                Some(msg) => Err(anyhow!("{msg}")),
                None => Ok(vec![]),
            }
        }

        async fn insert_reproductive_record(
            &self,
            _request: &CreateReproductiveRecordRequest,
        ) -> Result<ReproductiveRecord> {
            unimplemented!("not used by profile tests")
        }

        async fn list_reproductive_records(
            &self,
            _cattle_id: &str,
        ) -> Result<Vec<ReproductiveRecord>> {
            self.bump();
            match &self.fail_reproductive {
                Some(msg) => Err(anyhow!("{msg}")),
                None => Ok(vec![]),
            }
        }
    }

    fn sample_cattle(id: &str) -> Cattle {
        Cattle {
            id: id.to_string(),
            farm_id: "f1".to_string(),
            breed: "Angus".to_string(),
            gender: Gender::Female,
            dob: "2022-01-01".to_string(),
            name: None,
            nick_name: None,
            image_url: None,
            purchase_date: None,
            purchase_price: None,
            status: "Active".to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    fn weight_record(id: &str, date: &str, weight: f64) -> WeightRecord {
        WeightRecord {
            id: id.to_string(),
            cattle_id: "c1".to_string(),
            date: date.to_string(),
            weight,
        }
    }

    fn service_with(store: Arc<FakeStore>) -> ProfileService {
        ProfileService::new(store.clone(), store)
    }

    #[tokio::test]
    async fn test_profile_with_no_child_records() {
        let store = Arc::new(FakeStore {
            cattle: Some(sample_cattle("c1")),
            ..Default::default()
        });
        let service = service_with(store.clone());

        let profile = service
            .get_cattle_profile("c1")
            .await
            .expect("profile should succeed");

        assert_eq!(profile.cattle, sample_cattle("c1"));
        assert!(profile.health_records.is_empty());
        assert!(profile.weight_records.is_empty());
        assert!(profile.milk_production.is_empty());
        assert!(profile.reproductive_history.is_empty());
        // All five reads were issued
        assert_eq!(store.call_count(), 5);
    }

    #[tokio::test]
    async fn test_profile_with_two_weight_records() {
        let store = Arc::new(FakeStore {
            cattle: Some(sample_cattle("c1")),
            weight_records: vec![
                weight_record("w1", "2024-01-01", 400.0),
                weight_record("w2", "2024-02-01", 410.0),
            ],
            ..Default::default()
        });
        let service = service_with(store);

        let profile = service
            .get_cattle_profile("c1")
            .await
            .expect("profile should succeed");

        assert_eq!(profile.weight_records.len(), 2);
        assert!(profile.health_records.is_empty());
        assert!(profile.milk_production.is_empty());
        assert!(profile.reproductive_history.is_empty());
    }

    #[tokio::test]
    async fn test_empty_id_fails_before_any_store_call() {
        let store = Arc::new(FakeStore::default());
        let service = service_with(store.clone());

        for id in ["", "   "] {
            let err = service
                .get_cattle_profile(id)
                .await
                .expect_err("empty id must be rejected");
            assert!(matches!(err, ApiError::InvalidRequest(_)));
        }

        assert_eq!(store.call_count(), 0, "no store query may be issued");
    }

    #[tokio::test]
    async fn test_all_failure_reasons_are_combined() {
        let store = Arc::new(FakeStore {
            cattle: Some(sample_cattle("c1")),
            fail_health: Some("health table locked".to_string()),
            fail_milk: Some("milk query timed out".to_string()),
            ..Default::default()
        });
        let service = service_with(store);

        let err = service
            .get_cattle_profile("c1")
            .await
            .expect_err("must fail when any sub-query fails");

        match err {
            ApiError::Upstream(msg) => {
                assert!(msg.contains("health table locked"));
                assert!(msg.contains("milk query timed out"));
            }
            other => panic!("expected Upstream, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_single_failure_is_still_all_or_nothing() {
        let store = Arc::new(FakeStore {
            cattle: Some(sample_cattle("c1")),
            weight_records: vec![weight_record("w1", "2024-01-01", 400.0)],
            fail_reproductive: Some("reproductive_history unavailable".to_string()),
            ..Default::default()
        });
        let service = service_with(store);

        // Even though four of five reads succeeded, no partial data leaks
        let err = service.get_cattle_profile("c1").await.expect_err("must fail");
        assert!(matches!(err, ApiError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_missing_cattle_row_is_not_found() {
        let store = Arc::new(FakeStore::default());
        let service = service_with(store);

        let err = service
            .get_cattle_profile("missing")
            .await
            .expect_err("absent cattle must be NotFound");
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_repeated_reads_are_structurally_equal() {
        let store = Arc::new(FakeStore {
            cattle: Some(sample_cattle("c1")),
            weight_records: vec![weight_record("w1", "2024-01-01", 400.0)],
            ..Default::default()
        });
        let service = service_with(store);

        let first = service.get_cattle_profile("c1").await.expect("first read");
        let second = service.get_cattle_profile("c1").await.expect("second read");
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_profile_against_sqlite_store() {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");

        sqlx::query("INSERT INTO farms (id, name, location, owner_id, created_at) VALUES ('f1', 'Hill Farm', 'Devon', 'u1', '2024-01-01T00:00:00Z')")
            .execute(db.pool())
            .await
            .expect("Failed to seed farm");

        let cattle_repo = CattleRepository::new(db.clone());
        let record_repo = RecordRepository::new(db.clone());

        let stored = CattleStorage::store_cattle(
            &cattle_repo,
            &CreateCattleRequest {
                farm_id: "f1".to_string(),
                breed: "Jersey".to_string(),
                gender: Gender::Female,
                dob: "2022-01-01".to_string(),
                name: None,
                nick_name: None,
                image_url: None,
                purchase_date: None,
                purchase_price: None,
                status: "Active".to_string(),
            },
        )
        .await
        .expect("store cattle failed");

        RecordStorage::insert_weight_record(
            &record_repo,
            &CreateWeightRecordRequest {
                cattle_id: stored.id.clone(),
                date: "2024-02-01".to_string(),
                weight: 410.0,
            },
        )
        .await
        .expect("insert weight failed");

        let service = ProfileService::new(Arc::new(cattle_repo), Arc::new(record_repo));
        let profile = service
            .get_cattle_profile(&stored.id)
            .await
            .expect("profile failed");

        assert_eq!(profile.cattle, stored);
        assert_eq!(profile.weight_records.len(), 1);
        assert!(profile.health_records.is_empty());
    }
}
