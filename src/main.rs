mod config;
mod db;
mod error;
mod model;
mod web;

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::db::PgStore;
use crate::model::ModelService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "titanic_predictor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    tracing::info!(
        "Starting prediction service on port {} with database {}@{}:{}/{}",
        config.port,
        config.db.user,
        config.db.host,
        config.db.port,
        config.db.name
    );

    // A missing or broken model leaves the service up; /predict reports it.
    let model = ModelService::load(&config.model_path);

    // The pool connects lazily so the service starts while PostgreSQL is still down.
    let store = PgStore::connect_lazy(&config.db);
    match store.init_db().await {
        Ok(()) => tracing::info!("Database connection successful, predictions table ready"),
        Err(e) => tracing::warn!("Database not ready at startup: {}", e),
    }

    let state = Arc::new(web::AppState { model, store });
    let app = web::router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!("Listening on 0.0.0.0:{}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
