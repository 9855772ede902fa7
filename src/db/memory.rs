use chrono::Utc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use super::{NewPrediction, PredictionRecord, PredictionStore, StoreError};

/// In-process store for exercising the router without PostgreSQL.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<PredictionRecord>>,
    down: AtomicBool,
    failing_writes: AtomicBool,
}

impl MemoryStore {
    /// A store whose every operation fails as if the server were unreachable.
    pub fn unreachable() -> Self {
        let store = Self::default();
        store.down.store(true, Ordering::SeqCst);
        store
    }

    /// A reachable store that rejects inserts.
    pub fn rejecting_writes() -> Self {
        let store = Self::default();
        store.failing_writes.store(true, Ordering::SeqCst);
        store
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn check_up(&self) -> Result<(), StoreError> {
        if self.down.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

impl PredictionStore for MemoryStore {
    async fn insert_prediction(&self, record: &NewPrediction) -> Result<i32, StoreError> {
        self.check_up()?;
        if self.failing_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Query(sqlx::Error::Protocol(
                "relation \"predictions\" does not exist".to_string(),
            )));
        }

        let mut rows = self.rows.lock().unwrap();
        let id = rows.len() as i32 + 1;
        rows.push(PredictionRecord {
            features: record.features,
            prediction: record.prediction,
            id,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn list_predictions(&self) -> Result<Vec<PredictionRecord>, StoreError> {
        self.check_up()?;
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_up()
    }
}
