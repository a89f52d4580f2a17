//! API Server for Beedoo
//!
//! Exposes the two collection endpoints (/api/tasks, /api/notes) over the
//! storage gateway. Storage configuration is read from the environment once
//! at startup.

mod routes;
mod state;

use axum::http::Method;
use axum::Router;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use beedoo_core::storage::StorageConfig;

use crate::state::AppState;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api_server=debug,beedoo_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Storage configuration, read once
    let config = StorageConfig::from_env();
    tracing::info!(
        backend = ?config.backend,
        data_dir = %config.data_dir.display(),
        tasks_remote = config.bin_id(beedoo_core::storage::CollectionKind::Tasks).is_some(),
        notes_remote = config.bin_id(beedoo_core::storage::CollectionKind::Notes).is_some(),
        "storage configured"
    );

    let app_state = AppState::new(config);

    let app = Router::new()
        .merge(routes::health::router())
        .merge(routes::collection::router())
        .with_state(app_state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    let port = std::env::var("BEEDOO_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8081);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");
    axum::serve(listener, app).await.expect("server error");
}
