pub mod form;
pub mod handlers;
pub mod render;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::db::PredictionStore;
use crate::model::ModelService;

pub struct AppState<S> {
    pub model: ModelService,
    pub store: S,
}

pub fn router<S: PredictionStore>(state: Arc<AppState<S>>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/predict", post(handlers::predict::<S>))
        .route("/predictions", get(handlers::list_predictions::<S>))
        .route("/health", get(handlers::health_check::<S>))
        .with_state(state)
}
