use anyhow::Result;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;
use std::str::FromStr;
use std::sync::Arc;

/// DbConnection manages database operations
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Foreign keys must be on for child-record cascades to fire
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePool::connect_with(options).await?;

        // Setup database schema
        Self::setup_schema(&pool).await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        // Generate a unique database name for tests
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("sqlite:file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                provider_user_id TEXT NOT NULL UNIQUE,
                email TEXT NOT NULL,
                name TEXT NOT NULL,
                role TEXT,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS farms (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                location TEXT NOT NULL,
                owner_id TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cattle (
                id TEXT PRIMARY KEY,
                farm_id TEXT NOT NULL,
                breed TEXT NOT NULL,
                gender TEXT NOT NULL,
                dob TEXT NOT NULL,
                name TEXT,
                nick_name TEXT,
                image_url TEXT,
                purchase_date TEXT,
                purchase_price REAL,
                status TEXT NOT NULL,
                created_at TEXT NOT NULL,
                FOREIGN KEY (farm_id) REFERENCES farms(id)
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_cattle_farm_id ON cattle(farm_id);
            "#,
        )
        .execute(pool)
        .await?;

        // Child-record tables cascade on cattle deletion; orphan cleanup
        // is the store's job, not the application layer's
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cattle_health_records (
                id TEXT PRIMARY KEY,
                cattle_id TEXT NOT NULL,
                date TEXT NOT NULL,
                category TEXT NOT NULL,
                description TEXT NOT NULL,
                FOREIGN KEY (cattle_id) REFERENCES cattle(id) ON DELETE CASCADE
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cattle_weight_records (
                id TEXT PRIMARY KEY,
                cattle_id TEXT NOT NULL,
                date TEXT NOT NULL,
                weight REAL NOT NULL,
                FOREIGN KEY (cattle_id) REFERENCES cattle(id) ON DELETE CASCADE
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS milk_production (
                id TEXT PRIMARY KEY,
                cattle_id TEXT NOT NULL,
                date TEXT NOT NULL,
                volume REAL NOT NULL,
                FOREIGN KEY (cattle_id) REFERENCES cattle(id) ON DELETE CASCADE
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS reproductive_history (
                id TEXT PRIMARY KEY,
                cattle_id TEXT NOT NULL,
                date TEXT NOT NULL,
                breeding_date TEXT,
                calving_date TEXT,
                calf_gender TEXT,
                FOREIGN KEY (cattle_id) REFERENCES cattle(id) ON DELETE CASCADE
            );
            "#,
        )
        .execute(pool)
        .await?;

        for table in [
            "cattle_health_records",
            "cattle_weight_records",
            "milk_production",
            "reproductive_history",
        ] {
            sqlx::query(&format!(
                "CREATE INDEX IF NOT EXISTS idx_{table}_cattle_id ON {table}(cattle_id);"
            ))
            .execute(pool)
            .await?;
        }

        Ok(())
    }

    /// Get the underlying SQLite pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
