pub mod rooms;
pub mod tokens;
pub mod transcripts;
pub mod webhooks;
