use chrono::{DateTime, Utc};

/// Ownership record linking a room to the user who created it.
///
/// Rows are written once when room creation succeeds and never updated;
/// the room's lifecycle itself is owned by the video platform.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, serde::Serialize)]
pub struct Room {
    pub room_name: String,
    pub creator_id: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// A meeting transcript record, keyed by the platform-assigned transcript id.
///
/// `content` holds the raw caption track as downloaded; the briefing fields
/// (`title` through `open_questions`) are filled in when summary generation
/// succeeds and stay null otherwise. Repeated webhook deliveries for the same
/// id overwrite the row rather than duplicating it.
#[derive(Debug, Clone, Default, PartialEq, sqlx::FromRow, serde::Serialize)]
pub struct Transcript {
    pub transcript_id: String,
    pub room_name: String,
    pub meeting_date: Option<DateTime<Utc>>,
    /// Meeting duration in seconds, as reported by the webhook payload.
    pub duration: Option<i32>,
    pub status: String,
    pub content: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub executive_summary: Option<String>,
    pub key_points: Option<Vec<String>>,
    pub important_numbers: Option<Vec<String>>,
    pub action_items: Option<Vec<String>>,
    pub speaker_insights: Option<String>,
    pub questions_raised: Option<Vec<String>>,
    pub open_questions: Option<Vec<String>>,
    pub participants: Option<String>,
    pub transcript_language: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
