use std::sync::{Arc, Mutex};

use meet_relay::{MeetingBriefing, Summarizer};

#[derive(Clone)]
pub struct MockSummarizer {
    pub briefing: MeetingBriefing,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockSummarizer {
    pub fn new(briefing: MeetingBriefing) -> Self {
        Self {
            briefing,
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            briefing: MeetingBriefing::default(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

pub fn sample_briefing() -> MeetingBriefing {
    MeetingBriefing {
        title: "Weekly Sync".to_string(),
        description: Some("Team sync about the release.".to_string()),
        executive_summary: "The team reviewed release status.".to_string(),
        key_points: vec!["release is on track".to_string()],
        important_numbers: vec!["v2.1 ships Friday".to_string()],
        action_items: vec!["update the changelog".to_string()],
        speaker_insights: vec!["ship smaller batches".to_string()],
        questions_raised: vec!["who owns QA?".to_string()],
        open_questions: vec![],
    }
}

impl Summarizer for MockSummarizer {
    const SUMMARIZER_MODEL: &'static str = "mock-model";

    type Error = anyhow::Error;

    async fn summarize(&self, transcript_text: &str) -> Result<MeetingBriefing, Self::Error> {
        self.calls.lock().unwrap().push(transcript_text.to_string());
        if let Some(ref msg) = self.fail_with {
            anyhow::bail!("{}", msg);
        }
        Ok(self.briefing.clone())
    }
}
