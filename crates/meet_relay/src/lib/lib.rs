pub mod auth;
pub mod briefing;
pub mod captions;
pub mod http;
mod llm;
mod pipeline;
pub mod tracing;
pub mod video;

pub use llm::gemini::{GeminiClient, GeminiError};
pub use llm::summarizer::{MeetingBriefing, Summarizer};
pub use pipeline::{
    builder::TranscriptPipelineBuilder, TranscriptPipeline, WebhookDisposition,
};
