//! Webhook receiver for video-platform events.

use axum::{extract::State, response::Json, routing::post, Router};
use meet_datastore::DataStore;
use serde_json::{json, Value};

use crate::{
    auth::IdentityProvider,
    http::{
        error::{ApiError, ApiResult},
        AppState,
    },
    llm::summarizer::Summarizer,
    pipeline::WebhookDisposition,
    video::{VideoPlatform, WebhookEvent},
};

pub fn router<D, V, S, A>(state: AppState<D, V, S, A>) -> Router
where
    D: DataStore + Clone + Send + Sync + 'static,
    V: VideoPlatform + Clone + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    A: IdentityProvider + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/api/webhooks/video", post(receive::<D, V, S, A>))
        .with_state(state)
}

/// POST /api/webhooks/video - react to a platform event.
///
/// Always acknowledges with `{"received": true}` so the sender stops
/// retrying, except when the payload is missing its identifiers.
async fn receive<D, V, S, A>(
    State(state): State<AppState<D, V, S, A>>,
    Json(event): Json<WebhookEvent>,
) -> ApiResult<Json<Value>>
where
    D: DataStore + Clone + Send + Sync + 'static,
    V: VideoPlatform + Clone + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    A: IdentityProvider + Clone + Send + Sync + 'static,
{
    match state.pipeline.handle_event(&event).await {
        WebhookDisposition::InvalidPayload => Err(ApiError::bad_request("Invalid payload")),
        WebhookDisposition::Handled | WebhookDisposition::Ignored => {
            Ok(Json(json!({ "received": true })))
        }
    }
}
