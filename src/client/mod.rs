//! Native asset list fetch controller.
//!
//! Mirrors the browser-side controller served from `/static/app.js`: one
//! GET against an asset-listing URL, with loading and error state exposed
//! to whatever renders the view. Asset records are kept opaque; the
//! payload is never validated or transformed beyond JSON parsing.

use serde_json::Value;
use thiserror::Error;

/// Why a fetch failed. Logged only; the view sees a single error flag.
#[derive(Debug, Error)]
enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// View state driven by the controller.
///
/// `loading` is true only between invocation and completion of the
/// request. A failure is surfaced solely as the `error` flag; detail goes
/// to the log.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub loading: bool,
    pub error: bool,
    pub assets: Vec<Value>,
}

impl ViewState {
    /// Enter the loading state, clearing any previous results.
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = false;
        self.assets.clear();
    }

    /// Record a successful load.
    pub fn loaded(&mut self, assets: Vec<Value>) {
        self.loading = false;
        self.assets = assets;
    }

    /// Record a failed load.
    pub fn failed(&mut self) {
        self.loading = false;
        self.error = true;
    }
}

/// Controller that fetches the asset list and drives a [`ViewState`].
///
/// At most one request is in flight: `load_assets` takes `&mut self`, so
/// overlapping invocations cannot be expressed.
pub struct AssetsController {
    client: reqwest::Client,
    assets_url: String,
    pub view: ViewState,
}

impl AssetsController {
    /// Create a controller targeting the given asset-listing URL.
    ///
    /// No timeout and no retry policy: the request runs until the runtime
    /// delivers success or failure.
    pub fn new(assets_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            assets_url: assets_url.into(),
            view: ViewState::default(),
        }
    }

    /// The URL this controller fetches from.
    pub fn assets_url(&self) -> &str {
        &self.assets_url
    }

    /// Fetch the asset list once, updating the view state.
    pub async fn load_assets(&mut self) {
        self.view.begin_load();

        match self.fetch().await {
            Ok(assets) => self.view.loaded(assets),
            Err(e) => {
                tracing::warn!("Failed to load assets from {}: {}", self.assets_url, e);
                self.view.failed();
            }
        }
    }

    async fn fetch(&self) -> Result<Vec<Value>, FetchError> {
        let body = self
            .client
            .get(&self.assets_url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    #[test]
    fn test_view_state_transitions() {
        let mut view = ViewState::default();
        assert!(!view.loading);
        assert!(!view.error);

        view.begin_load();
        assert!(view.loading);
        assert!(!view.error);
        assert!(view.assets.is_empty());

        view.loaded(vec![json!({"id": 1})]);
        assert!(!view.loading);
        assert!(!view.error);
        assert_eq!(view.assets.len(), 1);

        view.begin_load();
        assert!(view.assets.is_empty(), "begin_load clears previous results");
        view.failed();
        assert!(!view.loading);
        assert!(view.error);
        assert!(view.assets.is_empty());
    }

    /// Serve a router on an ephemeral port, returning its base URL.
    async fn spawn_server(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_load_assets_success() {
        let app = Router::new().route(
            "/api/assets",
            get(|| async { Json(json!([{"id": 1}])) }),
        );
        let base = spawn_server(app).await;

        let mut controller = AssetsController::new(format!("{}/api/assets", base));
        controller.load_assets().await;

        assert!(!controller.view.loading);
        assert!(!controller.view.error);
        assert_eq!(controller.view.assets, vec![json!({"id": 1})]);
    }

    #[tokio::test]
    async fn test_load_assets_http_error() {
        let app = Router::new().route(
            "/api/assets",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let base = spawn_server(app).await;

        let mut controller = AssetsController::new(format!("{}/api/assets", base));
        controller.load_assets().await;

        assert!(!controller.view.loading);
        assert!(controller.view.error);
        assert!(controller.view.assets.is_empty());
    }

    #[tokio::test]
    async fn test_load_assets_connection_refused() {
        // Bind then drop a listener so the port is unoccupied.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let mut controller = AssetsController::new(format!("http://{}/api/assets", addr));
        controller.load_assets().await;

        assert!(!controller.view.loading);
        assert!(controller.view.error);
        assert!(controller.view.assets.is_empty());
    }

    #[tokio::test]
    async fn test_load_assets_non_array_payload() {
        let app = Router::new().route(
            "/api/assets",
            get(|| async { Json(json!({"not": "an array"})) }),
        );
        let base = spawn_server(app).await;

        let mut controller = AssetsController::new(format!("{}/api/assets", base));
        controller.load_assets().await;

        assert!(controller.view.error);
        assert!(controller.view.assets.is_empty());
    }

    #[tokio::test]
    async fn test_reload_replaces_results() {
        let app = Router::new().route(
            "/api/assets",
            get(|| async { Json(json!([{"id": 1}, {"id": 2}])) }),
        );
        let base = spawn_server(app).await;

        let mut controller = AssetsController::new(format!("{}/api/assets", base));
        controller.load_assets().await;
        controller.load_assets().await;

        assert_eq!(controller.view.assets.len(), 2, "reload does not accumulate");
    }
}
