//! Form submission handlers.
//!
//! All POST endpoints redirect back to a page on success and render an
//! error page otherwise. Date inputs arrive as `YYYY-MM-DD` strings.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
    Form,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use super::super::templates::{self, AssetFormValues, UserFormValues};
use super::super::AppState;
use crate::models::{Asset, User};
use crate::repository::is_unique_violation;

/// Parse an HTML date input value (empty means none).
fn parse_date_input(value: &str) -> Option<DateTime<Utc>> {
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Fields of the add-asset form.
#[derive(Debug, Deserialize)]
pub struct AssetForm {
    pub name: String,
    pub asset_type: String,
    #[serde(default)]
    pub description: String,
    pub serial_no: String,
    pub code: String,
    #[serde(default)]
    pub purchased: String,
}

/// Create an asset from the add form.
///
/// The save upserts on id only, so a duplicate code surfaces as a unique
/// violation; the form is re-rendered with the submitted values intact.
pub async fn create_asset(
    State(state): State<AppState>,
    Form(form): Form<AssetForm>,
) -> impl IntoResponse {
    let values = AssetFormValues {
        name: form.name.clone(),
        asset_type: form.asset_type.clone(),
        description: form.description.clone(),
        serial_no: form.serial_no.clone(),
        code: form.code.clone(),
        purchased: form.purchased.clone(),
    };

    let asset = Asset::new(
        form.name,
        form.asset_type,
        form.description,
        form.serial_no,
        form.code,
        parse_date_input(&form.purchased),
        None,
    );

    match state.asset_repo.save(&asset).await {
        Ok(()) => Redirect::to(&format!("/assets/{}", asset.id)).into_response(),
        Err(e) if is_unique_violation(&e) => (
            StatusCode::CONFLICT,
            Html(templates::asset_form_page(
                Some("An asset with this code already exists"),
                &values,
            )),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to save asset: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(templates::error_page("Failed to add asset")),
            )
                .into_response()
        }
    }
}

/// Fields of the assign form.
#[derive(Debug, Deserialize)]
pub struct AssignForm {
    pub user_id: String,
    #[serde(default)]
    pub return_date: String,
}

/// Assign an asset to a user.
pub async fn assign_asset(
    State(state): State<AppState>,
    Path(asset_id): Path<String>,
    Form(form): Form<AssignForm>,
) -> impl IntoResponse {
    match state.user_repo.get(&form.user_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Html(templates::error_page("No such user")),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!("Failed to look up user {}: {}", form.user_id, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(templates::error_page("Failed to assign asset")),
            )
                .into_response();
        }
    }

    let due = parse_date_input(&form.return_date);
    match state.asset_repo.assign(&asset_id, &form.user_id, due).await {
        Ok(()) => Redirect::to(&format!("/assets/{}", asset_id)).into_response(),
        Err(e) => {
            tracing::error!("Failed to assign asset {}: {}", asset_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(templates::error_page("Failed to assign asset")),
            )
                .into_response()
        }
    }
}

/// Reclaim an asset from its assignee.
pub async fn reclaim_asset(
    State(state): State<AppState>,
    Path(asset_id): Path<String>,
) -> impl IntoResponse {
    match state.asset_repo.reclaim(&asset_id).await {
        Ok(()) => Redirect::to(&format!("/assets/{}", asset_id)).into_response(),
        Err(e) => {
            tracing::error!("Failed to reclaim asset {}: {}", asset_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(templates::error_page("Failed to reclaim asset")),
            )
                .into_response()
        }
    }
}

/// Fields of the lost/found toggle form.
#[derive(Debug, Deserialize)]
pub struct LostForm {
    pub lost: bool,
}

/// Mark an asset lost or found.
pub async fn mark_lost(
    State(state): State<AppState>,
    Path(asset_id): Path<String>,
    Form(form): Form<LostForm>,
) -> impl IntoResponse {
    match state.asset_repo.set_lost(&asset_id, form.lost).await {
        Ok(()) => Redirect::to(&format!("/assets/{}", asset_id)).into_response(),
        Err(e) => {
            tracing::error!("Failed to update asset {}: {}", asset_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(templates::error_page("Failed to update asset")),
            )
                .into_response()
        }
    }
}

/// Fields of the add-user form.
#[derive(Debug, Deserialize)]
pub struct UserForm {
    pub name: String,
    pub email: String,
}

/// Create a user from the add form.
pub async fn create_user(
    State(state): State<AppState>,
    Form(form): Form<UserForm>,
) -> impl IntoResponse {
    let values = UserFormValues {
        name: form.name.clone(),
        email: form.email.clone(),
    };

    let user = User::new(form.email, form.name);
    match state.user_repo.save(&user).await {
        Ok(()) => Redirect::to("/users").into_response(),
        Err(e) if is_unique_violation(&e) => (
            StatusCode::CONFLICT,
            Html(templates::user_form_page(
                Some("Email already in use"),
                &values,
            )),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to save user: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(templates::error_page("Failed to add user")),
            )
                .into_response()
        }
    }
}
