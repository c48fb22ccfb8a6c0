use anyhow::{anyhow, Result};
use async_trait::async_trait;
use sqlx::Row;

use crate::db::DbConnection;
use crate::storage::traits::RecordStorage;
use shared::{
    CreateHealthRecordRequest, CreateMilkRecordRequest, CreateReproductiveRecordRequest,
    CreateWeightRecordRequest, HealthRecord, MilkRecord, ReproductiveRecord, WeightRecord,
};

/// Repository for the four per-animal record tables. Records are
/// append-mostly: inserted and listed, never updated or deleted here --
/// cascade deletion rides on the cattle foreign key.
#[derive(Clone)]
pub struct RecordRepository {
    db: DbConnection,
}

impl RecordRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn new_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

#[async_trait]
impl RecordStorage for RecordRepository {
    async fn insert_health_record(
        &self,
        request: &CreateHealthRecordRequest,
    ) -> Result<HealthRecord> {
        let record = HealthRecord {
            id: Self::new_id(),
            cattle_id: request.cattle_id.clone(),
            date: request.date.clone(),
            category: request.category.clone(),
            description: request.description.clone(),
        };

        sqlx::query(
            r#"
            INSERT INTO cattle_health_records (id, cattle_id, date, category, description)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.cattle_id)
        .bind(&record.date)
        .bind(&record.category)
        .bind(&record.description)
        .execute(self.db.pool())
        .await?;

        Ok(record)
    }

    async fn list_health_records(&self, cattle_id: &str) -> Result<Vec<HealthRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, cattle_id, date, category, description
            FROM cattle_health_records
            WHERE cattle_id = ?
            "#,
        )
        .bind(cattle_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows
            .iter()
            .map(|row| HealthRecord {
                id: row.get("id"),
                cattle_id: row.get("cattle_id"),
                date: row.get("date"),
                category: row.get("category"),
                description: row.get("description"),
            })
            .collect())
    }

    async fn insert_weight_record(
        &self,
        request: &CreateWeightRecordRequest,
    ) -> Result<WeightRecord> {
        let record = WeightRecord {
            id: Self::new_id(),
            cattle_id: request.cattle_id.clone(),
            date: request.date.clone(),
            weight: request.weight,
        };

        sqlx::query(
            r#"
            INSERT INTO cattle_weight_records (id, cattle_id, date, weight)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.cattle_id)
        .bind(&record.date)
        .bind(record.weight)
        .execute(self.db.pool())
        .await?;

        Ok(record)
    }

    async fn list_weight_records(&self, cattle_id: &str) -> Result<Vec<WeightRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, cattle_id, date, weight
            FROM cattle_weight_records
            WHERE cattle_id = ?
            "#,
        )
        .bind(cattle_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows
            .iter()
            .map(|row| WeightRecord {
                id: row.get("id"),
                cattle_id: row.get("cattle_id"),
                date: row.get("date"),
                weight: row.get("weight"),
            })
            .collect())
    }

    async fn insert_milk_record(&self, request: &CreateMilkRecordRequest) -> Result<MilkRecord> {
        let record = MilkRecord {
            id: Self::new_id(),
            cattle_id: request.cattle_id.clone(),
            date: request.date.clone(),
            volume: request.volume,
        };

        sqlx::query(
            r#"
            INSERT INTO milk_production (id, cattle_id, date, volume)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.cattle_id)
        .bind(&record.date)
        .bind(record.volume)
        .execute(self.db.pool())
        .await?;

        Ok(record)
    }

    async fn list_milk_records(&self, cattle_id: &str) -> Result<Vec<MilkRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, cattle_id, date, volume
            FROM milk_production
            WHERE cattle_id = ?
            "#,
        )
        .bind(cattle_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows
            .iter()
            .map(|row| MilkRecord {
                id: row.get("id"),
                cattle_id: row.get("cattle_id"),
                date: row.get("date"),
                volume: row.get("volume"),
            })
            .collect())
    }

    async fn insert_reproductive_record(
        &self,
        request: &CreateReproductiveRecordRequest,
    ) -> Result<ReproductiveRecord> {
        let record = ReproductiveRecord {
            id: Self::new_id(),
            cattle_id: request.cattle_id.clone(),
            date: request.date.clone(),
            breeding_date: request.breeding_date.clone(),
            calving_date: request.calving_date.clone(),
            calf_gender: request.calf_gender,
        };

        sqlx::query(
            r#"
            INSERT INTO reproductive_history (id, cattle_id, date, breeding_date, calving_date, calf_gender)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.cattle_id)
        .bind(&record.date)
        .bind(&record.breeding_date)
        .bind(&record.calving_date)
        .bind(record.calf_gender.map(|g| g.as_str()))
        .execute(self.db.pool())
        .await?;

        Ok(record)
    }

    async fn list_reproductive_records(
        &self,
        cattle_id: &str,
    ) -> Result<Vec<ReproductiveRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, cattle_id, date, breeding_date, calving_date, calf_gender
            FROM reproductive_history
            WHERE cattle_id = ?
            "#,
        )
        .bind(cattle_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter()
            .map(|row| {
                let calf_gender: Option<String> = row.get("calf_gender");
                Ok(ReproductiveRecord {
                    id: row.get("id"),
                    cattle_id: row.get("cattle_id"),
                    date: row.get("date"),
                    breeding_date: row.get("breeding_date"),
                    calving_date: row.get("calving_date"),
                    calf_gender: calf_gender
                        .map(|g| g.parse().map_err(|e| anyhow!("corrupt calf_gender: {e}")))
                        .transpose()?,
                })
            })
            .collect()
    }
}
