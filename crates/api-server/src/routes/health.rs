//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use beedoo_core::storage::BackendSelector;

use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: String,
    version: String,
    storage: String,
    data_dir: String,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let config = state.gateway().config();
    let storage = match config.backend {
        BackendSelector::File => "file",
        BackendSelector::JsonBin => "jsonbin",
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: storage.to_string(),
        data_dir: config.data_dir.to_string_lossy().to_string(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use beedoo_core::storage::StorageConfig;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_reports_backend() {
        let app = router().with_state(AppState::new(StorageConfig::default()));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["storage"], "file");
    }
}
