use reqwest::Client;
use serde::Deserialize;

use crate::video::{RegisteredWebhook, RoomDescriptor, TranscriptMetadata, VideoPlatform};

/// REST client for the hosted video platform.
#[derive(Debug, Clone)]
pub struct VideoApiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum VideoApiError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// List endpoints wrap their items in a `data` envelope.
#[derive(Debug, Deserialize)]
struct ListEnvelope<T> {
    #[serde(default)]
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct AccessLinkResponse {
    link: String,
}

#[derive(Debug, Deserialize)]
struct MeetingTokenResponse {
    token: String,
}

impl VideoApiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.daily.co/v1".into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, VideoApiError> {
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(VideoApiError::Api { status, message });
        }
        Ok(resp)
    }
}

impl VideoPlatform for VideoApiClient {
    async fn create_room(
        &self,
        room_name: Option<&str>,
    ) -> Result<RoomDescriptor, VideoApiError> {
        let body = serde_json::json!({
            "name": room_name,
            "properties": {
                "enable_chat": true,
                "enable_screenshare": true,
                "enable_recording": "cloud",
                "enable_advanced_chat": true,
                "enable_emoji_reactions": true,
                "enable_hand_raising": true,
                "enable_breakout_rooms": true,
                "enable_pip_ui": true,
                "enable_people_ui": true,
                "enable_prejoin_ui": true,
                "enable_network_ui": true,
                "enable_noise_cancellation_ui": true,
                "enable_live_captions_ui": true,
                "start_video_off": false,
                "start_audio_off": false,
                "max_participants": 10,
            }
        });

        let resp = self
            .client
            .post(format!("{}/rooms", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        Ok(Self::check(resp).await?.json::<RoomDescriptor>().await?)
    }

    async fn create_meeting_token(
        &self,
        room_name: &str,
        is_owner: bool,
        user_name: &str,
    ) -> Result<String, VideoApiError> {
        let body = serde_json::json!({
            "properties": {
                "room_name": room_name,
                "is_owner": is_owner,
                "user_name": user_name,
            }
        });

        let resp = self
            .client
            .post(format!("{}/meeting-tokens", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        let token_resp = Self::check(resp).await?.json::<MeetingTokenResponse>().await?;
        Ok(token_resp.token)
    }

    async fn list_transcripts(&self) -> Result<Vec<TranscriptMetadata>, VideoApiError> {
        let resp = self
            .client
            .get(format!("{}/transcript", self.base_url))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        let envelope = Self::check(resp)
            .await?
            .json::<ListEnvelope<TranscriptMetadata>>()
            .await?;
        Ok(envelope.data)
    }

    async fn transcript_metadata(
        &self,
        transcript_id: &str,
    ) -> Result<TranscriptMetadata, VideoApiError> {
        let resp = self
            .client
            .get(format!("{}/transcript/{}", self.base_url, transcript_id))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        Ok(Self::check(resp).await?.json::<TranscriptMetadata>().await?)
    }

    async fn transcript_access_link(
        &self,
        transcript_id: &str,
    ) -> Result<String, VideoApiError> {
        let resp = self
            .client
            .get(format!(
                "{}/transcript/{}/access-link",
                self.base_url, transcript_id
            ))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        let link_resp = Self::check(resp).await?.json::<AccessLinkResponse>().await?;
        Ok(link_resp.link)
    }

    async fn download_text(&self, url: &str) -> Result<String, VideoApiError> {
        // The access link is pre-signed; no auth header here.
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        Ok(Self::check(resp).await?.text().await?)
    }

    async fn list_webhooks(&self) -> Result<Vec<RegisteredWebhook>, VideoApiError> {
        let resp = self
            .client
            .get(format!("{}/webhooks", self.base_url))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        let envelope = Self::check(resp)
            .await?
            .json::<ListEnvelope<RegisteredWebhook>>()
            .await?;
        Ok(envelope.data)
    }

    async fn create_webhook(
        &self,
        url: &str,
        event_types: &[&str],
    ) -> Result<RegisteredWebhook, VideoApiError> {
        let body = serde_json::json!({
            "url": url,
            "eventTypes": event_types,
        });

        let resp = self
            .client
            .post(format!("{}/webhooks", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        Ok(Self::check(resp).await?.json::<RegisteredWebhook>().await?)
    }

    async fn delete_webhook(&self, webhook_id: &str) -> Result<(), VideoApiError> {
        let resp = self
            .client
            .delete(format!("{}/webhooks/{}", self.base_url, webhook_id))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        Self::check(resp).await?;
        Ok(())
    }
}
