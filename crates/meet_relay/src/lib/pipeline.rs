use chrono::Utc;
use meet_datastore::{DataStore, Transcript};

use crate::{
    captions::flatten_to_text,
    llm::summarizer::{MeetingBriefing, Summarizer},
    video::{VideoPlatform, WebhookEvent, TRANSCRIPT_READY_EVENT},
};

pub mod builder;

/// How an inbound webhook delivery was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookDisposition {
    /// A `transcript.ready-to-download` event that was processed (possibly
    /// partially; partial failures are logged, not surfaced).
    Handled,
    /// An event type the service does not react to.
    Ignored,
    /// A `transcript.ready-to-download` event missing its room or
    /// transcript identifier. Nothing is persisted.
    InvalidPayload,
}

/// Orchestrates the reaction to a "transcript ready" notification: fetch
/// metadata and content from the video platform, generate a briefing, and
/// upsert the result.
///
/// Every step past payload validation is best-effort; whatever was obtained
/// is persisted, and a re-delivery for the same transcript id re-fetches and
/// overwrites.
pub struct TranscriptPipeline<D, V, S>
where
    D: DataStore + Send + Sync + 'static,
    V: VideoPlatform + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    store: D,
    video: V,
    summarizer: S,
}

impl<D, V, S> TranscriptPipeline<D, V, S>
where
    D: DataStore + Send + Sync + 'static,
    V: VideoPlatform + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    #[tracing::instrument(skip(self, event), fields(event_type = %event.event_type))]
    pub async fn handle_event(&self, event: &WebhookEvent) -> WebhookDisposition {
        if event.event_type != TRANSCRIPT_READY_EVENT {
            tracing::debug!("Ignoring unhandled webhook event type");
            return WebhookDisposition::Ignored;
        }

        let payload = event.payload.clone().unwrap_or_default();
        let (Some(room_name), Some(transcript_id)) = (payload.room_name, payload.id) else {
            tracing::error!("Missing required fields in webhook payload");
            return WebhookDisposition::InvalidPayload;
        };

        if let Err(e) = self
            .process_ready_transcript(&room_name, &transcript_id, payload.duration)
            .await
        {
            // The sender is acknowledged regardless; a failed delivery is
            // logged rather than bounced back for retry.
            tracing::error!(
                error = ?e,
                transcript_id = %transcript_id,
                "Failed to process transcript-ready event"
            );
        }

        WebhookDisposition::Handled
    }

    #[tracing::instrument(skip(self))]
    async fn process_ready_transcript(
        &self,
        room_name: &str,
        transcript_id: &str,
        duration: Option<f64>,
    ) -> anyhow::Result<()> {
        let metadata = match self.video.transcript_metadata(transcript_id).await {
            Ok(metadata) => metadata,
            Err(e) => {
                // Known best-effort gap: the event is acknowledged to stop
                // sender retries, but nothing is saved.
                tracing::error!(
                    error = %e,
                    transcript_id = %transcript_id,
                    "Failed to fetch transcript details; acknowledging without persisting"
                );
                return Ok(());
            }
        };

        let content = self.fetch_transcript_content(transcript_id).await;

        let briefing = match &content {
            Some(content) => self.generate_briefing(content).await,
            None => None,
        };

        let mut record = Transcript {
            transcript_id: transcript_id.to_string(),
            room_name: room_name.to_string(),
            meeting_date: Some(Utc::now()),
            duration: duration.map(|d| d.round() as i32),
            status: metadata.status.unwrap_or_else(|| "finished".to_string()),
            content,
            ..Default::default()
        };

        if let Some(briefing) = briefing {
            apply_briefing(&mut record, briefing);
        }

        self.store.upsert_transcript(&record).await?;

        tracing::info!(
            transcript_id = %transcript_id,
            room_name = %room_name,
            has_content = record.content.is_some(),
            has_briefing = record.title.is_some(),
            "Saved transcript"
        );

        Ok(())
    }

    /// Resolves the access link and downloads the caption track. Either step
    /// failing leaves the content null; never fatal.
    async fn fetch_transcript_content(&self, transcript_id: &str) -> Option<String> {
        let link = self
            .video
            .transcript_access_link(transcript_id)
            .await
            .inspect_err(|e| {
                tracing::error!(error = %e, "Failed to fetch transcript access link")
            })
            .ok()?;

        self.video
            .download_text(&link)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to download transcript content"))
            .ok()
    }

    /// Flattens the caption track and asks the model for a briefing. A
    /// failure here never blocks persistence of the raw content.
    async fn generate_briefing(&self, content: &str) -> Option<MeetingBriefing> {
        let dialogue = flatten_to_text(content);
        if dialogue.trim().is_empty() {
            tracing::debug!("Caption track flattened to nothing; skipping briefing");
            return None;
        }

        self.summarizer
            .summarize(&dialogue)
            .await
            .inspect_err(|e| tracing::error!(error = ?e, "Failed to generate meeting briefing"))
            .ok()
    }
}

fn apply_briefing(record: &mut Transcript, briefing: MeetingBriefing) {
    let non_empty = |items: Vec<String>| (!items.is_empty()).then_some(items);

    record.title = Some(briefing.title);
    record.description = briefing.description;
    record.executive_summary = Some(briefing.executive_summary);
    record.key_points = non_empty(briefing.key_points);
    record.important_numbers = non_empty(briefing.important_numbers);
    record.action_items = non_empty(briefing.action_items);
    record.speaker_insights = non_empty(briefing.speaker_insights).map(|i| i.join("\n"));
    record.questions_raised = non_empty(briefing.questions_raised);
    record.open_questions = non_empty(briefing.open_questions);
}
