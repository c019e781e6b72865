//! Meeting token issuance.

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
    http::{
        error::{ApiError, ApiResult},
        require_user, AppState,
    },
    llm::summarizer::Summarizer,
    video::VideoPlatform,
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingTokenRequest {
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
        .route("/api/meeting-tokens", post(create_token::<D, V, S, A>))
        .with_state(state)
}

/// POST /api/meeting-tokens - issue a join token for a room.
///
/// The caller's ownership of the room decides the token's `is_owner`
/// permission claim; no ownership record means non-owner, never an error.
async fn create_token<D, V, S, A>(
    State(state): State<AppState<D, V, S, A>>,
    headers: HeaderMap,
    body: Option<Json<MeetingTokenRequest>>,
) -> ApiResult<Json<Value>>
where
    D: DataStore + Clone + Send + Sync + 'static,
    V: VideoPlatform + Clone + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    A: IdentityProvider + Clone + Send + Sync + 'static,
{
    let user = require_user(&state.auth, &headers).await?;

    let room_name = body
        .and_then(|Json(b)| b.room_name)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::bad_request("Room name is required"))?;

    let is_owner = match state.store.room_creator(&room_name).await {
        Ok(creator) => creator.is_some_and(|c| c == user.id),
        Err(e) => {
            tracing::error!(error = ?e, room_name = %room_name, "Failed to check room creator");
            false
        }
    };

    let token = state
        .video
        .create_meeting_token(&room_name, is_owner, user.display_name())
        .await?;

    Ok(Json(json!({
        "token": token,
        "isOwner": is_owner,
    })))
}
