use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

use crate::db::DbConnection;
use crate::storage::traits::UserStorage;
use shared::{CreateUserRequest, User};

/// Repository for user rows mirrored from the identity provider
#[derive(Clone)]
pub struct UserRepository {
    db: DbConnection,
}

impl UserRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> User {
    User {
        id: row.get("id"),
        provider_user_id: row.get("provider_user_id"),
        email: row.get("email"),
        name: row.get("name"),
        role: row.get("role"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl UserStorage for UserRepository {
    async fn upsert_user(&self, request: &CreateUserRequest) -> Result<User> {
        // Keyed on the provider's user id so repeated webhook deliveries
        // update in place instead of duplicating
        sqlx::query(
            r#"
            INSERT INTO users (id, provider_user_id, email, name, created_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (provider_user_id)
            DO UPDATE SET email = excluded.email, name = excluded.name
            "#,
        )
        .bind(uuid::Uuid::new_v4().to_string())
        .bind(&request.provider_user_id)
        .bind(&request.email)
        .bind(&request.name)
        .bind(Utc::now().to_rfc3339())
        .execute(self.db.pool())
        .await?;

        let user = self
            .get_user_by_provider_id(&request.provider_user_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("upserted user row not found"))?;

        Ok(user)
    }

    async fn get_user_by_provider_id(&self, provider_user_id: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, provider_user_id, email, name, role, created_at
            FROM users
            WHERE provider_user_id = ?
            "#,
        )
        .bind(provider_user_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(row_to_user))
    }
}
