//! Room creation endpoint.

use axum::{
    extract::State,
    http::HeaderMap,
    response::Json,
    routing::post,
    Router,
};
use meet_datastore::DataStore;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    auth::IdentityProvider,
    http::{error::ApiResult, require_user, AppState},
    llm::summarizer::Summarizer,
    video::VideoPlatform,
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub room_name: Option<String>,
}

pub fn router<D, V, S, A>(state: AppState<D, V, S, A>) -> Router
where
    D: DataStore + Clone + Send + Sync + 'static,
    V: VideoPlatform + Clone + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    A: IdentityProvider + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/api/rooms", post(create_room::<D, V, S, A>))
        .with_state(state)
}

/// POST /api/rooms - create a room on the video platform.
///
/// The ownership record is a best-effort side-write: if it fails, room
/// creation is still reported as successful.
async fn create_room<D, V, S, A>(
    State(state): State<AppState<D, V, S, A>>,
    headers: HeaderMap,
    body: Option<Json<CreateRoomRequest>>,
) -> ApiResult<Json<Value>>
where
    D: DataStore + Clone + Send + Sync + 'static,
    V: VideoPlatform + Clone + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    A: IdentityProvider + Clone + Send + Sync + 'static,
{
    let user = require_user(&state.auth, &headers).await?;
    let request = body.map(|Json(b)| b).unwrap_or_default();

    let room = state.video.create_room(request.room_name.as_deref()).await?;

    if let Err(e) = state.store.insert_room(&room.name, &user.id).await {
        tracing::error!(
            error = ?e,
            room_name = %room.name,
            "Failed to record room ownership"
        );
    }

    Ok(Json(json!({ "room": room })))
}
