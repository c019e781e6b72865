//! Video platform integration.
//!
//! The room/recording/transcription engine lives entirely in the hosted
//! video platform; this module only issues REST calls against it and types
//! the handful of payloads the service reads back.

pub mod client;

use std::future::Future;

use serde::{Deserialize, Serialize};

pub use client::{VideoApiClient, VideoApiError};

/// The one inbound event kind the webhook receiver reacts to.
pub const TRANSCRIPT_READY_EVENT: &str = "transcript.ready-to-download";

pub trait VideoPlatform {
    fn create_room(
        &self,
        room_name: Option<&str>,
    ) -> impl Future<Output = Result<RoomDescriptor, VideoApiError>> + Send;

    fn create_meeting_token(
        &self,
        room_name: &str,
        is_owner: bool,
        user_name: &str,
    ) -> impl Future<Output = Result<String, VideoApiError>> + Send;

    fn list_transcripts(
        &self,
    ) -> impl Future<Output = Result<Vec<TranscriptMetadata>, VideoApiError>> + Send;

    fn transcript_metadata(
        &self,
        transcript_id: &str,
    ) -> impl Future<Output = Result<TranscriptMetadata, VideoApiError>> + Send;

    /// Fetch a short-lived download link for the transcript's caption track.
    fn transcript_access_link(
        &self,
        transcript_id: &str,
    ) -> impl Future<Output = Result<String, VideoApiError>> + Send;

    fn download_text(&self, url: &str)
        -> impl Future<Output = Result<String, VideoApiError>> + Send;

    fn list_webhooks(
        &self,
    ) -> impl Future<Output = Result<Vec<RegisteredWebhook>, VideoApiError>> + Send;

    fn create_webhook(
        &self,
        url: &str,
        event_types: &[&str],
    ) -> impl Future<Output = Result<RegisteredWebhook, VideoApiError>> + Send;

    fn delete_webhook(
        &self,
        webhook_id: &str,
    ) -> impl Future<Output = Result<(), VideoApiError>> + Send;
}

/// Room object as returned by the platform on creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDescriptor {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub privacy: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Transcript object from the platform's transcript endpoints.
///
/// The same shape serves both the list endpoint and the per-id metadata
/// fetch; the platform uses camelCase field names on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptMetadata {
    pub transcript_id: String,
    #[serde(default)]
    pub room_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisteredWebhook {
    #[serde(default)]
    pub uuid: Option<String>,
    pub url: String,
    #[serde(default, rename = "eventTypes")]
    pub event_types: Vec<String>,
    #[serde(default)]
    pub state: Option<String>,
}

/// Inbound webhook envelope. Payloads of event types the service does not
/// handle still deserialize here; their fields simply come out empty, and a
/// missing `type` reads as an event nobody reacts to.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type", default)]
    pub event_type: String,
    #[serde(default)]
    pub payload: Option<TranscriptReadyPayload>,
}

/// Payload of a `transcript.ready-to-download` event.
///
/// Everything is optional on the wire; the handler validates that
/// `room_name` and `id` are present before acting.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranscriptReadyPayload {
    #[serde(default)]
    pub room_name: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    /// Meeting duration in seconds.
    #[serde(default)]
    pub duration: Option<f64>,
}
