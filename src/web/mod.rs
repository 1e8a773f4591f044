// src/web/mod.rs — Chat UI server

pub mod handlers;
pub mod markdown;
pub mod page;
pub mod sessions;
pub mod types;

use std::sync::Arc;

use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::core::Assistant;
use crate::infra::config::ServerConfig;
use crate::service::FetchParameters;
use page::PageRenderer;
pub use sessions::SessionStore;

/// Shared state for handlers.
#[derive(Clone)]
pub struct AppState {
    pub assistant: Assistant,
    pub sessions: SessionStore,
    pub page: Arc<PageRenderer>,
    /// Initial values of the sidebar fields for new sessions.
    pub defaults: FetchParameters,
}

/// Build the axum router with the page and API routes.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/v1/session", get(handlers::get_session))
        .route("/api/v1/health", get(handlers::health))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET])
                .allow_headers(Any),
        );

    Router::new()
        .route("/", get(handlers::index))
        .route("/fetch", post(handlers::fetch))
        .route("/chat", post(handlers::chat))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server and serve until Ctrl-C.
pub async fn start_server(config: &ServerConfig, state: AppState) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.bind, config.port);
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("{} listening on http://{addr}", config.title);
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("failed to listen for shutdown signal: {e}");
                std::future::pending::<()>().await;
            }
            tracing::info!("shutting down");
        })
        .await?;
    Ok(())
}
