use std::sync::{Arc, Mutex};

use meet_relay::video::{
    RegisteredWebhook, RoomDescriptor, TranscriptMetadata, VideoApiError, VideoPlatform,
};

fn mock_failure(what: &str) -> VideoApiError {
    VideoApiError::Api {
        status: 500,
        message: format!("mock {what} failure"),
    }
}

#[derive(Clone)]
pub struct MockVideoPlatform {
    pub content: String,
    pub status: Option<String>,
    pub transcript_list: Arc<Vec<TranscriptMetadata>>,
    pub fail_metadata: bool,
    pub fail_access_link: bool,
    pub fail_download: bool,
    pub metadata_calls: Arc<Mutex<Vec<String>>>,
    pub download_calls: Arc<Mutex<Vec<String>>>,
    pub created_rooms: Arc<Mutex<Vec<Option<String>>>>,
    /// (room_name, is_owner, user_name) per token request
    pub token_requests: Arc<Mutex<Vec<(String, bool, String)>>>,
}

impl Default for MockVideoPlatform {
    fn default() -> Self {
        Self {
            content: "WEBVTT\n\n00:00:01.000 --> 00:00:03.000\n<v>Alice:</v>Hello there\n"
                .to_string(),
            status: Some("finished".to_string()),
            transcript_list: Arc::new(Vec::new()),
            fail_metadata: false,
            fail_access_link: false,
            fail_download: false,
            metadata_calls: Arc::new(Mutex::new(Vec::new())),
            download_calls: Arc::new(Mutex::new(Vec::new())),
            created_rooms: Arc::new(Mutex::new(Vec::new())),
            token_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl MockVideoPlatform {
    pub fn with_content(mut self, content: &str) -> Self {
        self.content = content.to_string();
        self
    }

    pub fn with_transcript_list(mut self, list: Vec<TranscriptMetadata>) -> Self {
        self.transcript_list = Arc::new(list);
        self
    }
}

impl VideoPlatform for MockVideoPlatform {
    async fn create_room(
        &self,
        room_name: Option<&str>,
    ) -> Result<RoomDescriptor, VideoApiError> {
        self.created_rooms
            .lock()
            .unwrap()
            .push(room_name.map(str::to_string));
        let name = room_name.unwrap_or("generated-room").to_string();
        Ok(RoomDescriptor {
            id: Some("room-id-1".to_string()),
            url: Some(format!("https://meet.example/{name}")),
            name,
            privacy: Some("public".to_string()),
            created_at: None,
        })
    }

    async fn create_meeting_token(
        &self,
        room_name: &str,
        is_owner: bool,
        user_name: &str,
    ) -> Result<String, VideoApiError> {
        self.token_requests.lock().unwrap().push((
            room_name.to_string(),
            is_owner,
            user_name.to_string(),
        ));
        Ok("mock-token".to_string())
    }

    async fn list_transcripts(&self) -> Result<Vec<TranscriptMetadata>, VideoApiError> {
        Ok(self.transcript_list.as_ref().clone())
    }

    async fn transcript_metadata(
        &self,
        transcript_id: &str,
    ) -> Result<TranscriptMetadata, VideoApiError> {
        self.metadata_calls
            .lock()
            .unwrap()
            .push(transcript_id.to_string());
        if self.fail_metadata {
            return Err(mock_failure("metadata"));
        }
        Ok(TranscriptMetadata {
            transcript_id: transcript_id.to_string(),
            room_name: None,
            status: self.status.clone(),
            duration: None,
        })
    }

    async fn transcript_access_link(
        &self,
        transcript_id: &str,
    ) -> Result<String, VideoApiError> {
        if self.fail_access_link {
            return Err(mock_failure("access link"));
        }
        Ok(format!("https://storage.example/{transcript_id}.vtt"))
    }

    async fn download_text(&self, url: &str) -> Result<String, VideoApiError> {
        self.download_calls.lock().unwrap().push(url.to_string());
        if self.fail_download {
            return Err(mock_failure("download"));
        }
        Ok(self.content.clone())
    }

    async fn list_webhooks(&self) -> Result<Vec<RegisteredWebhook>, VideoApiError> {
        Ok(Vec::new())
    }

    async fn create_webhook(
        &self,
        url: &str,
        event_types: &[&str],
    ) -> Result<RegisteredWebhook, VideoApiError> {
        Ok(RegisteredWebhook {
            uuid: Some("hook-1".to_string()),
            url: url.to_string(),
            event_types: event_types.iter().map(|e| e.to_string()).collect(),
            state: Some("ACTIVE".to_string()),
        })
    }

    async fn delete_webhook(&self, _webhook_id: &str) -> Result<(), VideoApiError> {
        Ok(())
    }
}
