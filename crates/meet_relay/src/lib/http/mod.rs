//! REST API server for the relay.
//!
//! Provides HTTP endpoints for:
//! - The video-platform webhook receiver (POST /api/webhooks/video)
//! - Room creation (POST /api/rooms)
//! - Meeting token issuance (POST /api/meeting-tokens)
//! - Transcript browsing and export (GET /api/transcripts...)

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::{
    http::{header, HeaderMap},
    response::Json,
    routing::get,
    Router,
};
use meet_datastore::DataStore;
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::{
    auth::{AuthUser, IdentityProvider},
    http::error::ApiError,
    llm::summarizer::Summarizer,
    video::VideoPlatform,
    TranscriptPipeline,
};

/// Shared state handed to every route.
pub struct AppState<D, V, S, A>
where
    D: DataStore + Send + Sync + 'static,
    V: VideoPlatform + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    A: IdentityProvider + Send + Sync + 'static,
{
    pub store: D,
    pub video: V,
    pub auth: A,
    pub pipeline: Arc<TranscriptPipeline<D, V, S>>,
}

impl<D, V, S, A> Clone for AppState<D, V, S, A>
where
    D: DataStore + Clone + Send + Sync + 'static,
    V: VideoPlatform + Clone + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    A: IdentityProvider + Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            video: self.video.clone(),
            auth: self.auth.clone(),
            pipeline: Arc::clone(&self.pipeline),
        }
    }
}

/// Assembles the full application router.
pub fn router<D, V, S, A>(state: AppState<D, V, S, A>) -> Router
where
    D: DataStore + Clone + Send + Sync + 'static,
    V: VideoPlatform + Clone + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    A: IdentityProvider + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(service_info))
        .merge(routes::webhooks::router(state.clone()))
        .merge(routes::rooms::router(state.clone()))
        .merge(routes::tokens::router(state.clone()))
        .merge(routes::transcripts::router(state))
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
}

/// Binds the listener and serves the router until shutdown.
pub async fn serve<D, V, S, A>(state: AppState<D, V, S, A>, port: u16) -> anyhow::Result<()>
where
    D: DataStore + Clone + Send + Sync + 'static,
    V: VideoPlatform + Clone + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    A: IdentityProvider + Clone + Send + Sync + 'static,
{
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;

    tracing::info!("API server listening on http://0.0.0.0:{port}");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /                            - Service info");
    tracing::info!("  POST /api/webhooks/video          - Video platform webhook receiver");
    tracing::info!("  POST /api/rooms                   - Create a room");
    tracing::info!("  POST /api/meeting-tokens          - Issue a meeting token");
    tracing::info!("  GET  /api/transcripts             - List the caller's transcripts");
    tracing::info!("  GET  /api/transcripts/:id         - Get a stored transcript");
    tracing::info!("  GET  /api/transcripts/:id/entries - Parsed caption entries");
    tracing::info!("  GET  /api/transcripts/:id/export  - Briefing as plain text");

    axum::serve(listener, app).await?;

    Ok(())
}

async fn service_info() -> Json<Value> {
    Json(json!({
        "service": "meet-relay",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

/// Resolves the caller's session from the `Authorization` header. Any
/// failure, including auth-service trouble, reads as "no session".
pub(crate) async fn require_user<A: IdentityProvider>(
    auth: &A,
    headers: &HeaderMap,
) -> Result<AuthUser, ApiError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(ApiError::unauthorized)?;

    auth.verify_session(token)
        .await
        .map_err(|e| {
            tracing::debug!(error = %e, "Session verification failed");
            ApiError::unauthorized()
        })
}
