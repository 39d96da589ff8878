use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use thiserror::Error;

use crate::core::distance::bounding_box;
use crate::core::ResolveError;
use crate::models::{Airport, BoundingBox, Point};
use crate::services::CandidateProvider;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

impl From<PostgresError> for ResolveError {
    fn from(err: PostgresError) -> Self {
        ResolveError::StorageUnavailable(err.to_string())
    }
}

/// PostgreSQL-backed airport store
///
/// Airports live in a single `airports(id, x, y, iata)` table; lookups are
/// inclusive range queries on `x` and `y`.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// All airports inside the box, bounds inclusive, in id order
    pub async fn find_in_box(&self, bbox: &BoundingBox) -> Result<Vec<Airport>, PostgresError> {
        let query = r#"
            SELECT id, x, y, iata
            FROM airports
            WHERE x >= $1 AND x <= $2
              AND y >= $3 AND y <= $4
            ORDER BY id
        "#;

        let airports: Vec<Airport> = sqlx::query_as(query)
            .bind(bbox.min_x)
            .bind(bbox.max_x)
            .bind(bbox.min_y)
            .bind(bbox.max_y)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(
            "Found {} airports in x [{}, {}], y [{}, {}]",
            airports.len(),
            bbox.min_x,
            bbox.max_x,
            bbox.min_y,
            bbox.max_y
        );

        Ok(airports)
    }

    /// Health check for the database connection
    pub async fn ping(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

#[async_trait]
impl CandidateProvider for PostgresClient {
    async fn find_near(&self, query: Point, radius: f64) -> Result<Vec<Airport>, ResolveError> {
        let bbox = bounding_box(query, radius);
        Ok(self.find_in_box(&bbox).await?)
    }

    async fn health_check(&self) -> bool {
        match self.ping().await {
            Ok(healthy) => healthy,
            Err(e) => {
                tracing::warn!("PostgreSQL health check failed: {}", e);
                false
            }
        }
    }
}
