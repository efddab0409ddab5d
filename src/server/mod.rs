//! Web server for the asset inventory.
//!
//! Serves the HTML pages, the embedded static assets (including the
//! asset-listing controller), and the JSON API the controller fetches.

mod assets;
mod handlers;
mod routes;
mod templates;

pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Settings;
use crate::repository::{AssetRepository, UserRepository};

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub asset_repo: Arc<AssetRepository>,
    pub user_repo: Arc<UserRepository>,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        let ctx = settings.create_db_context();
        Self {
            asset_repo: Arc::new(ctx.assets()),
            user_repo: Arc::new(ctx.users()),
        }
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings);
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tempfile::tempdir;
    use tower::ServiceExt;

    use crate::models::{Asset, User};
    use crate::repository::DbContext;

    async fn setup_test_app() -> (axum::Router, DbContext, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let ctx = DbContext::from_path(&dir.path().join("test.db"));
        ctx.init_schema().await.unwrap();

        let state = AppState {
            asset_repo: Arc::new(ctx.assets()),
            user_repo: Arc::new(ctx.users()),
        };

        (create_router(state), ctx, dir)
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_index_hosts_controller() {
        let (app, _ctx, _dir) = setup_test_app().await;

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains(r#"id="assetsUrl" value="/api/assets""#));
        assert!(body.contains("/static/app.js"));
    }

    #[tokio::test]
    async fn test_api_assets_empty() {
        let (app, _ctx, _dir) = setup_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/assets")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "[]");
    }

    #[tokio::test]
    async fn test_api_assets_listing() {
        let (app, ctx, _dir) = setup_test_app().await;

        let asset = Asset::new(
            "ThinkPad".to_string(),
            "laptop".to_string(),
            String::new(),
            "SN-1".to_string(),
            "ORG-1".to_string(),
            None,
            None,
        );
        ctx.assets().save(&asset).await.unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/assets")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        let list = json.as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["name"], "ThinkPad");
        assert_eq!(list[0]["status"], "available");
    }

    #[tokio::test]
    async fn test_api_assets_user_filter() {
        let (app, ctx, _dir) = setup_test_app().await;

        let user = User::new("ada@example.com".to_string(), "Ada".to_string());
        ctx.users().save(&user).await.unwrap();

        let asset = Asset::new(
            "Monitor".to_string(),
            "display".to_string(),
            String::new(),
            "SN-2".to_string(),
            "ORG-2".to_string(),
            None,
            None,
        );
        ctx.assets().save(&asset).await.unwrap();
        ctx.assets().assign(&asset.id, &user.id, None).await.unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/assets?user={}", user.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 1);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/assets?user=nobody")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert!(json.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_user_form_and_duplicate() {
        let (app, ctx, _dir) = setup_test_app().await;

        let request = || {
            Request::builder()
                .method("POST")
                .uri("/users")
                .header(
                    header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                )
                .body(Body::from("name=Ada&email=ada%40example.com"))
                .unwrap()
        };

        let response = app.clone().oneshot(request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(ctx.users().count().await.unwrap(), 1);

        let response = app.oneshot(request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(ctx.users().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_asset_and_detail_page() {
        let (app, ctx, _dir) = setup_test_app().await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/assets")
                    .header(
                        header::CONTENT_TYPE,
                        "application/x-www-form-urlencoded",
                    )
                    .body(Body::from(
                        "name=ThinkPad&asset_type=laptop&description=&serial_no=SN-1&code=ORG-1&purchased=2024-03-01",
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let asset = ctx.assets().get_by_code("ORG-1").await.unwrap().unwrap();
        assert!(asset.purchased.is_some());

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/assets/{}", asset.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("ThinkPad"));
        assert!(body.contains("Assign"));
    }

    #[tokio::test]
    async fn test_duplicate_asset_code_keeps_existing_and_form_data() {
        let (app, ctx, _dir) = setup_test_app().await;

        let post = |name: &str| {
            Request::builder()
                .method("POST")
                .uri("/assets")
                .header(
                    header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                )
                .body(Body::from(format!(
                    "name={}&asset_type=laptop&description=&serial_no=SN-9&code=ORG-9&purchased=",
                    name
                )))
                .unwrap()
        };

        let response = app.clone().oneshot(post("First")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let response = app.oneshot(post("Second")).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = body_string(response).await;
        assert!(body.contains("already exists"));
        // The rejected submission is re-rendered, not discarded
        assert!(body.contains(r#"value="Second""#));
        assert!(body.contains(r#"value="ORG-9""#));

        // The original asset survives the collision
        assert_eq!(ctx.assets().count().await.unwrap(), 1);
        let kept = ctx.assets().get_by_code("ORG-9").await.unwrap().unwrap();
        assert_eq!(kept.name, "First");
    }

    #[tokio::test]
    async fn test_detail_page_shows_adder() {
        let (app, ctx, _dir) = setup_test_app().await;

        let user = User::new("grace@example.com".to_string(), "Grace".to_string());
        ctx.users().save(&user).await.unwrap();

        let asset = Asset::new(
            "Keyboard".to_string(),
            "peripheral".to_string(),
            String::new(),
            "SN-3".to_string(),
            "ORG-3".to_string(),
            None,
            Some(user.id.clone()),
        );
        ctx.assets().save(&asset).await.unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/assets/{}", asset.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("Added by"));
        assert!(body.contains("Grace"));
    }

    #[tokio::test]
    async fn test_api_status_database_error() {
        // Point at a database that cannot be opened
        let ctx = DbContext::from_path(std::path::Path::new(
            "/nonexistent-assetman-dir/test.db",
        ));
        let state = AppState {
            asset_repo: Arc::new(ctx.assets()),
            user_repo: Arc::new(ctx.users()),
        };
        let app = create_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/status")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_asset_not_found() {
        let (app, _ctx, _dir) = setup_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/assets/does-not-exist")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _ctx, _dir) = setup_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
