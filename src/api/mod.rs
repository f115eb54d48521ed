pub mod catalysts;
pub mod health;
pub mod import;
pub mod settings;

use crate::db::Repository;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/catalysts", get(catalysts::list_catalysts))
        .route("/v1/catalysts/import", post(import::import_catalog))
        .route("/v1/catalysts/import/latest", get(import::latest_import))
        .route("/v1/catalysts/:catalyst_id", get(catalysts::get_catalyst))
        .route(
            "/v1/settings",
            get(settings::get_settings).put(settings::put_settings),
        )
        .layer(cors)
        .with_state(state)
}
