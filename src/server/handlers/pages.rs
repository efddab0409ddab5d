//! HTML page handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse},
};

use super::super::{templates, AppState};

/// Index page hosting the asset-listing controller.
pub async fn index() -> Html<String> {
    Html(templates::index_page())
}

/// Asset detail page with assignment controls.
pub async fn asset_detail(
    State(state): State<AppState>,
    Path(asset_id): Path<String>,
) -> impl IntoResponse {
    let asset = match state.asset_repo.get(&asset_id).await {
        Ok(Some(asset)) => asset,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Html(templates::error_page("Asset not found")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!("Failed to load asset {}: {}", asset_id, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(templates::error_page("Failed to load asset")),
            )
                .into_response();
        }
    };

    // Assignee and adder names for display, if any
    let assignee = match &asset.assigned_to {
        Some(user_id) => state.user_repo.get(user_id).await.ok().flatten(),
        None => None,
    };
    let adder = match &asset.added_by {
        Some(user_id) => state.user_repo.get(user_id).await.ok().flatten(),
        None => None,
    };

    // Candidate assignees for the assign form (only needed when unassigned)
    let users = if asset.is_assigned() {
        Vec::new()
    } else {
        state.user_repo.get_all().await.unwrap_or_default()
    };

    Html(templates::asset_detail_page(
        &asset.display(),
        assignee.as_ref().map(|u| u.name.as_str()),
        adder.as_ref().map(|u| u.name.as_str()),
        &users,
    ))
    .into_response()
}

/// Add-asset form page.
pub async fn asset_new() -> Html<String> {
    Html(templates::asset_form_page(
        None,
        &templates::AssetFormValues::default(),
    ))
}

/// User directory page with assigned-asset counts.
pub async fn users_index(State(state): State<AppState>) -> impl IntoResponse {
    let users = match state.user_repo.get_all().await {
        Ok(users) => users,
        Err(e) => {
            tracing::error!("Failed to list users: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(templates::error_page("Failed to load users")),
            )
                .into_response();
        }
    };

    let mut rows = Vec::with_capacity(users.len());
    for user in users {
        let assigned = state
            .asset_repo
            .get_assigned_to(&user.id)
            .await
            .map(|assets| assets.len() as u64)
            .unwrap_or(0);
        rows.push((user, assigned));
    }

    Html(templates::users_page(&rows)).into_response()
}

/// Add-user form page.
pub async fn user_new() -> Html<String> {
    Html(templates::user_form_page(
        None,
        &templates::UserFormValues::default(),
    ))
}
