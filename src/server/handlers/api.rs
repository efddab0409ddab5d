//! JSON API endpoint handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use super::super::AppState;
use crate::models::AssetDisplay;
use crate::repository::DieselError;

/// Health check endpoint for container orchestration.
pub async fn health() -> impl IntoResponse {
    StatusCode::OK
}

/// Asset listing filter parameters.
#[derive(Debug, Deserialize)]
pub struct AssetFilterParams {
    /// Restrict the listing to assets assigned to this user id.
    pub user: Option<String>,
}

/// Asset listing endpoint fetched by the index page controller.
pub async fn api_assets(
    State(state): State<AppState>,
    Query(params): Query<AssetFilterParams>,
) -> impl IntoResponse {
    let result = match params.user.as_deref() {
        Some(user_id) => state.asset_repo.get_assigned_to(user_id).await,
        None => state.asset_repo.get_all().await,
    };

    match result {
        Ok(assets) => {
            let displays: Vec<AssetDisplay> = assets.iter().map(|a| a.display()).collect();
            Json(displays).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to list assets: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// User directory endpoint.
pub async fn api_users(State(state): State<AppState>) -> impl IntoResponse {
    match state.user_repo.get_all().await {
        Ok(users) => Json(users).into_response(),
        Err(e) => {
            tracing::error!("Failed to list users: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Inventory counts.
pub async fn api_status(State(state): State<AppState>) -> impl IntoResponse {
    let counts: Result<_, DieselError> = async {
        Ok((
            state.user_repo.count().await?,
            state.asset_repo.count().await?,
            state.asset_repo.count_assigned().await?,
            state.asset_repo.count_lost().await?,
        ))
    }
    .await;

    match counts {
        Ok((users, assets, assigned, lost)) => Json(serde_json::json!({
            "users": users,
            "assets": assets,
            "assigned": assigned,
            "lost": lost,
        }))
        .into_response(),
        Err(e) => {
            tracing::error!("Failed to count inventory: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
