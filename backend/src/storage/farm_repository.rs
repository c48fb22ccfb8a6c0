use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

use crate::db::DbConnection;
use crate::storage::traits::FarmStorage;
use shared::{CreateFarmRequest, Farm};

/// Repository for farm operations
#[derive(Clone)]
pub struct FarmRepository {
    db: DbConnection,
}

impl FarmRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

fn row_to_farm(row: &sqlx::sqlite::SqliteRow) -> Farm {
    Farm {
        id: row.get("id"),
        name: row.get("name"),
        location: row.get("location"),
        owner_id: row.get("owner_id"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl FarmStorage for FarmRepository {
    async fn store_farm(&self, request: &CreateFarmRequest) -> Result<Farm> {
        let farm = Farm {
            id: uuid::Uuid::new_v4().to_string(),
            name: request.name.clone(),
            location: request.location.clone(),
            owner_id: request.owner_id.clone(),
            created_at: Utc::now().to_rfc3339(),
        };

        sqlx::query(
            r#"
            INSERT INTO farms (id, name, location, owner_id, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&farm.id)
        .bind(&farm.name)
        .bind(&farm.location)
        .bind(&farm.owner_id)
        .bind(&farm.created_at)
        .execute(self.db.pool())
        .await?;

        Ok(farm)
    }

    async fn get_farm(&self, farm_id: &str) -> Result<Option<Farm>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, location, owner_id, created_at
            FROM farms
            WHERE id = ?
            "#,
        )
        .bind(farm_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(row_to_farm))
    }

    async fn list_farms(&self, owner_id: &str) -> Result<Vec<Farm>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, location, owner_id, created_at
            FROM farms
            WHERE owner_id = ?
            ORDER BY name ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(row_to_farm).collect())
    }
}
