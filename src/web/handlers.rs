use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection},
    response::Html,
};
use serde_json::{Value, json};
use std::sync::Arc;

use super::AppState;
use super::form::PredictForm;
use super::render::index_page;
use crate::db::{NewPrediction, PredictionRecord, PredictionStore};
use crate::error::AppError;
use crate::model::FeatureVector;

pub async fn index() -> Html<String> {
    index_page(None)
}

pub async fn predict<S: PredictionStore>(
    State(state): State<Arc<AppState<S>>>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<Html<String>, AppError> {
    let Form(pairs) = form.map_err(|e| AppError::InvalidForm(e.body_text()))?;
    let features = FeatureVector::try_from(PredictForm::from_pairs(pairs))?;
    tracing::info!(?features, "Received features");

    let prediction = state.model.predict(&features)?;
    tracing::info!("Prediction: {}", prediction);

    let record = NewPrediction {
        features,
        prediction,
    };
    let id = state
        .store
        .insert_prediction(&record)
        .await
        .map_err(|e| AppError::from_store(e, Some(prediction)))?;
    tracing::info!("Prediction saved to database with id {}", id);

    Ok(index_page(Some(prediction)))
}

pub async fn list_predictions<S: PredictionStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<PredictionRecord>>, AppError> {
    let records = state.store.list_predictions().await?;
    Ok(Json(records))
}

pub async fn health_check<S: PredictionStore>(State(state): State<Arc<AppState<S>>>) -> Json<Value> {
    let model_loaded = state.model.is_loaded();
    let database = match state.store.ping().await {
        Ok(()) => "ok",
        Err(e) => {
            tracing::warn!("Health check could not reach the database: {}", e);
            "unavailable"
        }
    };
    let status = if model_loaded && database == "ok" {
        "ok"
    } else {
        "degraded"
    };

    Json(json!({
        "status": status,
        "service": "titanic_predictor",
        "model_loaded": model_loaded,
        "database": database,
    }))
}
