use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Connection, PgPool, Row};
use std::time::Duration;

use super::{PredictionStore, StoreError};
use crate::config::DbConfig;
use crate::model::FeatureVector;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewPrediction {
    pub features: FeatureVector,
    pub prediction: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionRecord {
    #[serde(flatten)]
    pub features: FeatureVector,
    pub prediction: i32,
    pub id: i32,
    pub created_at: DateTime<Utc>,
}

/// PostgreSQL-backed store over a bounded pool.
///
/// Each operation holds one pooled connection for its own scope; dropping the
/// guard hands it back to the pool on every exit path, and an uncommitted
/// transaction is rolled back when it is dropped.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Builds the pool without connecting; connections are opened on first use.
    pub fn connect_lazy(config: &DbConfig) -> Self {
        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.name)
            .username(&config.user)
            .password(&config.password);

        Self::lazy_with(options, config.max_connections, config.acquire_timeout)
    }

    fn lazy_with(options: PgConnectOptions, max_connections: u32, acquire_timeout: Duration) -> Self {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect_lazy_with(options);

        Self::new(pool)
    }

    async fn acquire(&self) -> Result<sqlx::pool::PoolConnection<sqlx::Postgres>, StoreError> {
        self.pool.acquire().await.map_err(StoreError::Unavailable)
    }

    /// Creates the `predictions` table if it does not exist yet.
    pub async fn init_db(&self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        let mut conn = self.acquire().await?;
        sqlx::raw_sql(schema).execute(&mut *conn).await?;
        Ok(())
    }
}

impl PredictionStore for PgStore {
    async fn insert_prediction(&self, record: &NewPrediction) -> Result<i32, StoreError> {
        let mut conn = self.acquire().await?;
        let mut tx = conn.begin().await?;

        let f = &record.features;
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO predictions (
                sex_code, pclass, embarked_code, title_code,
                familysize, agebin_code, farebin_code, prediction
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(f.sex_code)
        .bind(f.pclass)
        .bind(f.embarked_code)
        .bind(f.title_code)
        .bind(f.family_size)
        .bind(f.age_bin_code)
        .bind(f.fare_bin_code)
        .bind(record.prediction)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(id)
    }

    async fn list_predictions(&self) -> Result<Vec<PredictionRecord>, StoreError> {
        let mut conn = self.acquire().await?;
        let rows = sqlx::query(
            r#"
            SELECT
                id,
                sex_code,
                pclass,
                embarked_code,
                title_code,
                familysize,
                agebin_code,
                farebin_code,
                prediction,
                created_at
            FROM predictions
            ORDER BY id
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.push(PredictionRecord {
                features: FeatureVector {
                    sex_code: row.try_get("sex_code")?,
                    pclass: row.try_get("pclass")?,
                    embarked_code: row.try_get("embarked_code")?,
                    title_code: row.try_get("title_code")?,
                    family_size: row.try_get("familysize")?,
                    age_bin_code: row.try_get("agebin_code")?,
                    fare_bin_code: row.try_get("farebin_code")?,
                },
                prediction: row.try_get("prediction")?,
                id: row.try_get("id")?,
                created_at: row.try_get("created_at")?,
            });
        }

        Ok(records)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.acquire().await?;
        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        Ok(())
    }
}
