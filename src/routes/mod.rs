//! HTTP routes for the portal preview server

pub mod health;
pub mod metrics;
pub mod portal;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::{INDEX_FILE_NAME, SPECS_DIR_NAME};
use crate::shell::{PORTAL_SCRIPT_PATH, SIDEBAR_PREFERENCES_PATH};
use crate::AppState;

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let portal_routes = Router::new()
        .route("/", get(portal::portal_page))
        .route("/index.html", get(portal::portal_page))
        .route(PORTAL_SCRIPT_PATH, get(portal::portal_script))
        .route(SIDEBAR_PREFERENCES_PATH, post(portal::resize_sidebar))
        .route(&format!("/{INDEX_FILE_NAME}"), get(portal::sidebar_data))
        .nest_service(
            &format!("/{SPECS_DIR_NAME}"),
            ServeDir::new(&state.config.specs_dir),
        );

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .route("/metrics", get(metrics::prometheus_metrics));

    Router::new()
        .merge(portal_routes)
        .merge(public_routes)
        // Remaining assets (CSS, images) straight from the site directory
        .fallback_service(ServeDir::new(&state.config.site_dir))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
