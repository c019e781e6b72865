//! Transcript browsing, viewing and export.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Json,
    routing::get,
    Router,
};
use meet_datastore::{DataStore, Transcript};
use serde_json::{json, Value};

use crate::{
    auth::{AuthUser, IdentityProvider},
    briefing::format_briefing_text,
    captions::parse_captions_to_vec,
    http::{
        error::{ApiError, ApiResult},
        require_user, AppState,
    },
    llm::summarizer::Summarizer,
    video::VideoPlatform,
};

pub fn router<D, V, S, A>(state: AppState<D, V, S, A>) -> Router
where
    D: DataStore + Clone + Send + Sync + 'static,
    V: VideoPlatform + Clone + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    A: IdentityProvider + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/api/transcripts", get(list_transcripts::<D, V, S, A>))
        .route("/api/transcripts/:id", get(get_transcript::<D, V, S, A>))
        .route(
            "/api/transcripts/:id/entries",
            get(get_transcript_entries::<D, V, S, A>),
        )
        .route(
            "/api/transcripts/:id/export",
            get(export_briefing::<D, V, S, A>),
        )
        .with_state(state)
}

/// GET /api/transcripts - the platform's transcript list, narrowed to the
/// rooms the caller created.
async fn list_transcripts<D, V, S, A>(
    State(state): State<AppState<D, V, S, A>>,
    headers: HeaderMap,
) -> ApiResult<Json<Value>>
where
    D: DataStore + Clone + Send + Sync + 'static,
    V: VideoPlatform + Clone + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    A: IdentityProvider + Clone + Send + Sync + 'static,
{
    let user = require_user(&state.auth, &headers).await?;

    let room_names = state
        .store
        .rooms_by_creator(&user.id)
        .await
        .map_err(|e| {
            tracing::error!(error = ?e, "Failed to fetch user rooms");
            ApiError::internal("Failed to fetch rooms")
        })?;

    let transcripts: Vec<_> = state
        .video
        .list_transcripts()
        .await?
        .into_iter()
        .filter(|t| {
            t.room_name
                .as_deref()
                .is_some_and(|name| room_names.iter().any(|r| r == name))
        })
        .collect();

    Ok(Json(json!({ "transcripts": transcripts })))
}

/// GET /api/transcripts/:id - a stored transcript with its briefing fields.
async fn get_transcript<D, V, S, A>(
    State(state): State<AppState<D, V, S, A>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>>
where
    D: DataStore + Clone + Send + Sync + 'static,
    V: VideoPlatform + Clone + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    A: IdentityProvider + Clone + Send + Sync + 'static,
{
    let user = require_user(&state.auth, &headers).await?;
    let transcript = load_owned_transcript(&state.store, &user, &id).await?;

    Ok(Json(json!({ "transcript": transcript })))
}

/// GET /api/transcripts/:id/entries - the caption track parsed into
/// structured entries for display. Null content yields an empty list.
async fn get_transcript_entries<D, V, S, A>(
    State(state): State<AppState<D, V, S, A>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>>
where
    D: DataStore + Clone + Send + Sync + 'static,
    V: VideoPlatform + Clone + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    A: IdentityProvider + Clone + Send + Sync + 'static,
{
    let user = require_user(&state.auth, &headers).await?;
    let transcript = load_owned_transcript(&state.store, &user, &id).await?;

    let entries = transcript
        .content
        .as_deref()
        .map(parse_captions_to_vec)
        .unwrap_or_default();

    Ok(Json(json!({ "entries": entries })))
}

/// GET /api/transcripts/:id/export - the briefing as a plain-text document.
async fn export_briefing<D, V, S, A>(
    State(state): State<AppState<D, V, S, A>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<String>
where
    D: DataStore + Clone + Send + Sync + 'static,
    V: VideoPlatform + Clone + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    A: IdentityProvider + Clone + Send + Sync + 'static,
{
    let user = require_user(&state.auth, &headers).await?;
    let transcript = load_owned_transcript(&state.store, &user, &id).await?;

    Ok(format_briefing_text(&transcript))
}

/// Fetches a transcript and enforces ownership: the caller must be the
/// creator of the matching room. A transcript whose room has no ownership
/// record is reported as not found rather than leaked.
async fn load_owned_transcript<D: DataStore>(
    store: &D,
    user: &AuthUser,
    transcript_id: &str,
) -> Result<Transcript, ApiError> {
    let transcript = store
        .get_transcript(transcript_id)
        .await
        .map_err(|e| {
            tracing::error!(error = ?e, "Failed to fetch transcript");
            ApiError::internal("Failed to fetch transcript")
        })?
        .ok_or_else(|| ApiError::not_found("Transcript not found"))?;

    match store.room_creator(&transcript.room_name).await {
        Ok(Some(creator)) if creator == user.id => Ok(transcript),
        Ok(Some(_)) => Err(ApiError::forbidden()),
        Ok(None) => Err(ApiError::not_found("Transcript not found")),
        Err(e) => {
            tracing::error!(error = ?e, "Failed to check room ownership");
            Err(ApiError::internal("Failed to check room ownership"))
        }
    }
}
