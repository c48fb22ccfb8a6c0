use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::db::DbConnection;
use crate::storage::traits::CattleStorage;
use shared::{Cattle, CreateCattleRequest, UpdateCattleRequest};

/// Repository for cattle operations
#[derive(Clone)]
pub struct CattleRepository {
    db: DbConnection,
}

impl CattleRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

fn row_to_cattle(row: &SqliteRow) -> Result<Cattle> {
    let gender: String = row.get("gender");
    Ok(Cattle {
        id: row.get("id"),
        farm_id: row.get("farm_id"),
        breed: row.get("breed"),
        gender: gender
            .parse()
            .map_err(|e| anyhow!("corrupt gender column: {e}"))?,
        dob: row.get("dob"),
        name: row.get("name"),
        nick_name: row.get("nick_name"),
        image_url: row.get("image_url"),
        purchase_date: row.get("purchase_date"),
        purchase_price: row.get("purchase_price"),
        status: row.get("status"),
        created_at: row.get("created_at"),
    })
}

const CATTLE_COLUMNS: &str =
    "id, farm_id, breed, gender, dob, name, nick_name, image_url, purchase_date, purchase_price, status, created_at";

#[async_trait]
impl CattleStorage for CattleRepository {
    async fn store_cattle(&self, request: &CreateCattleRequest) -> Result<Cattle> {
        let cattle = Cattle {
            id: uuid::Uuid::new_v4().to_string(),
            farm_id: request.farm_id.clone(),
            breed: request.breed.clone(),
            gender: request.gender,
            dob: request.dob.clone(),
            name: request.name.clone(),
            nick_name: request.nick_name.clone(),
            image_url: request.image_url.clone(),
            purchase_date: request.purchase_date.clone(),
            purchase_price: request.purchase_price,
            status: request.status.clone(),
            created_at: Utc::now().to_rfc3339(),
        };

        sqlx::query(
            r#"
            INSERT INTO cattle (id, farm_id, breed, gender, dob, name, nick_name, image_url, purchase_date, purchase_price, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&cattle.id)
        .bind(&cattle.farm_id)
        .bind(&cattle.breed)
        .bind(cattle.gender.as_str())
        .bind(&cattle.dob)
        .bind(&cattle.name)
        .bind(&cattle.nick_name)
        .bind(&cattle.image_url)
        .bind(&cattle.purchase_date)
        .bind(cattle.purchase_price)
        .bind(&cattle.status)
        .bind(&cattle.created_at)
        .execute(self.db.pool())
        .await?;

        Ok(cattle)
    }

    async fn get_cattle(&self, cattle_id: &str) -> Result<Option<Cattle>> {
        let row = sqlx::query(&format!("SELECT {CATTLE_COLUMNS} FROM cattle WHERE id = ?"))
            .bind(cattle_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(row_to_cattle).transpose()
    }

    async fn list_cattle(&self, farm_id: &str) -> Result<Vec<Cattle>> {
        let rows = sqlx::query(&format!(
            "SELECT {CATTLE_COLUMNS} FROM cattle WHERE farm_id = ? ORDER BY created_at ASC"
        ))
        .bind(farm_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(row_to_cattle).collect()
    }

    async fn update_cattle(
        &self,
        cattle_id: &str,
        changes: &UpdateCattleRequest,
    ) -> Result<Option<Cattle>> {
        // Single statement so concurrent partial updates to disjoint
        // columns cannot clobber each other through a stale snapshot
        let result = sqlx::query(
            r#"
            UPDATE cattle
            SET farm_id = COALESCE(?, farm_id),
                breed = COALESCE(?, breed),
                gender = COALESCE(?, gender),
                dob = COALESCE(?, dob),
                name = COALESCE(?, name),
                nick_name = COALESCE(?, nick_name),
                image_url = COALESCE(?, image_url),
                purchase_date = COALESCE(?, purchase_date),
                purchase_price = COALESCE(?, purchase_price),
                status = COALESCE(?, status)
            WHERE id = ?
            "#,
        )
        .bind(&changes.farm_id)
        .bind(&changes.breed)
        .bind(changes.gender.map(|g| g.as_str()))
        .bind(&changes.dob)
        .bind(&changes.name)
        .bind(&changes.nick_name)
        .bind(&changes.image_url)
        .bind(&changes.purchase_date)
        .bind(changes.purchase_price)
        .bind(&changes.status)
        .bind(cattle_id)
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_cattle(cattle_id).await
    }

    async fn delete_cattle(&self, cattle_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM cattle WHERE id = ?")
            .bind(cattle_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
