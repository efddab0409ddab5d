//! Router configuration for the web server.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Index page hosting the asset-listing controller
        .route("/", get(handlers::index))
        // Assets
        .route("/assets", post(handlers::create_asset))
        .route("/assets/new", get(handlers::asset_new))
        .route("/assets/:asset_id", get(handlers::asset_detail))
        .route("/assets/:asset_id/assign", post(handlers::assign_asset))
        .route("/assets/:asset_id/reclaim", post(handlers::reclaim_asset))
        .route("/assets/:asset_id/lost", post(handlers::mark_lost))
        // Users
        .route(
            "/users",
            get(handlers::users_index).post(handlers::create_user),
        )
        .route("/users/new", get(handlers::user_new))
        // JSON API
        .route("/api/assets", get(handlers::api_assets))
        .route("/api/users", get(handlers::api_users))
        .route("/api/status", get(handlers::api_status))
        .route("/api/health", get(handlers::health))
        // Static assets (CSS/JS)
        .route("/static/style.css", get(handlers::serve_css))
        .route("/static/app.js", get(handlers::serve_js))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
