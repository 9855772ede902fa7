use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::StoreError;
use crate::model::PredictError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid value for {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Invalid form body: {0}")]
    InvalidForm(String),

    #[error("Model is not loaded")]
    ModelNotLoaded,

    #[error("{0}")]
    Prediction(#[from] PredictError),

    #[error("Database connection failed")]
    DatabaseUnavailable {
        prediction: Option<i32>,
        #[source]
        source: sqlx::Error,
    },

    #[error("Database error: {source}")]
    Database {
        prediction: Option<i32>,
        #[source]
        source: sqlx::Error,
    },
}

impl AppError {
    /// Wraps a storage failure, keeping the label that was computed before it.
    pub fn from_store(err: StoreError, prediction: Option<i32>) -> Self {
        match err {
            StoreError::Unavailable(source) => AppError::DatabaseUnavailable { prediction, source },
            StoreError::Query(source) => AppError::Database { prediction, source },
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            AppError::InvalidField { .. } => "invalid_field",
            AppError::InvalidForm(_) => "invalid_form",
            AppError::ModelNotLoaded => "model_not_loaded",
            AppError::Prediction(_) => "prediction_failed",
            AppError::DatabaseUnavailable { .. } => "database_unavailable",
            AppError::Database { .. } => "database_error",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidField { .. } | AppError::InvalidForm(_) => StatusCode::BAD_REQUEST,
            AppError::ModelNotLoaded | AppError::DatabaseUnavailable { .. } => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Prediction(_) | AppError::Database { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::from_store(err, None)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::InvalidField { .. } | AppError::InvalidForm(_) => {
                tracing::warn!("Rejected prediction request: {}", self)
            }
            AppError::DatabaseUnavailable { source, .. } => {
                tracing::error!("Error connecting to database: {}", source)
            }
            _ => tracing::error!("{}", self),
        }

        let mut body = json!({
            "error": self.to_string(),
            "kind": self.kind(),
        });
        match &self {
            AppError::InvalidField { field, .. } => {
                body["field"] = json!(field);
            }
            AppError::DatabaseUnavailable {
                prediction: Some(label),
                ..
            }
            | AppError::Database {
                prediction: Some(label),
                ..
            } => {
                body["prediction"] = json!(label);
            }
            _ => {}
        }

        (status, Json(body)).into_response()
    }
}
