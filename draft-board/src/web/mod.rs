// HTTP surface: router, shared state and the serve loop.

pub mod error;
pub mod handlers;
pub mod html;

use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_sessions::cookie::SameSite;
use tower_sessions::{MemoryStore, SessionManagerLayer};
use tracing::info;

use crate::config::Config;
use crate::players::PlayerTables;

/// Read-only state shared by every request. Per-user draft state lives in
/// the session, never here.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub tables: Arc<PlayerTables>,
}

impl AppState {
    pub fn new(config: Config, tables: PlayerTables) -> Self {
        AppState {
            config: Arc::new(config),
            tables: Arc::new(tables),
        }
    }
}

/// Build the application router with its session layer.
///
/// Sessions live in memory and end with the browser session; the cookie is
/// http-only, `SameSite=Lax`, and `Secure` only when configured.
pub fn router(state: AppState) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(state.config.server.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_http_only(true);

    Router::new()
        .route("/", get(handlers::index))
        .route("/api/view", get(handlers::api_view))
        .route("/remove", post(handlers::remove))
        .route("/undo", post(handlers::undo))
        .route("/pick", post(handlers::pick))
        .route("/health", get(handlers::health))
        .layer(session_layer)
        .with_state(state)
}

/// Bind `host:port` from the config and serve until `shutdown` resolves.
pub async fn serve<F>(state: AppState, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .context("server error")?;

    Ok(())
}
