pub mod models;

#[cfg(test)]
pub mod memory;

pub use models::{NewPrediction, PgStore, PredictionRecord};

use std::future::Future;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// No connection could be obtained from the pool.
    #[error("database unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),

    #[error("database query failed: {0}")]
    Query(#[from] sqlx::Error),
}

/// Durable storage for predictions.
pub trait PredictionStore: Send + Sync + 'static {
    /// Stores one row and returns its storage-assigned id.
    fn insert_prediction(
        &self,
        record: &NewPrediction,
    ) -> impl Future<Output = Result<i32, StoreError>> + Send;

    /// Every stored row, oldest first.
    fn list_predictions(&self)
    -> impl Future<Output = Result<Vec<PredictionRecord>, StoreError>> + Send;

    fn ping(&self) -> impl Future<Output = Result<(), StoreError>> + Send;
}
