use std::{fmt::Debug, future::Future};

use serde::{Deserialize, Serialize};

pub trait Summarizer {
    const SUMMARIZER_MODEL: &'static str;

    type Error: Debug;

    /// Produce a structured briefing from flattened dialogue text.
    ///
    /// One request, no retries: summarization is best-effort and callers
    /// treat any failure as "no briefing".
    fn summarize(
        &self,
        transcript_text: &str,
    ) -> impl Future<Output = Result<MeetingBriefing, Self::Error>> + Send;
}

/// The structured summary the model is asked to return.
///
/// List fields default to empty when the model omits them; the datastore
/// keeps absent sections as nulls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeetingBriefing {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub executive_summary: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub important_numbers: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<String>,
    #[serde(default)]
    pub speaker_insights: Vec<String>,
    #[serde(default)]
    pub questions_raised: Vec<String>,
    #[serde(default)]
    pub open_questions: Vec<String>,
}

/// Builds the fixed instruction template for the summary request.
pub fn build_briefing_prompt(transcript_text: &str) -> String {
    format!(
        r#"Please create a detailed summary of this meeting transcript. The transcript may mix several languages. Please:

Title: Generate a concise, descriptive title for this meeting (3-8 words)

Description: Provide a brief description of the meeting's purpose and agenda. (1 sentence)

Executive Summary: Provide a 2-3 sentence overview of the main discussion

Key Points Discussed: Extract and organize the main topics covered

Important Numbers/Metrics: Highlight any significant figures, dates, or statistics mentioned

Action Items: If any next steps or follow-ups are mentioned, list them

Speaker Insights: Summarize the key insights or lessons shared by the speakers

Questions Raised: List any questions that were asked during the meeting by any participants.

Open Questions: If there are any unresolved questions or topics that need further discussion, list them.

Please translate any non-English portions to English and provide the summary in clear, professional English.

<transcript>
{transcript_text}
</transcript>

Please structure your response as a JSON object with the following format:
{{
    "title": "...",
    "description": "...",
    "executive_summary": "...",
    "key_points": ["point 1", "point 2", "..."],
    "important_numbers": ["metric 1", "metric 2", "..."],
    "action_items": ["action 1", "action 2", "..."],
    "speaker_insights": ["insight 1", "insight 2", "..."],
    "questions_raised": ["question 1", "question 2", "..."],
    "open_questions": ["open question 1", "open question 2", "..."]
}}

IMPORTANT: Return ONLY the JSON object, no markdown formatting, no code blocks, just pure JSON."#
    )
}

/// Strips a fenced-code-block wrapper (```json ... ``` or ``` ... ```) that
/// models sometimes add despite being told not to.
pub fn strip_code_fences(reply: &str) -> &str {
    let mut s = reply.trim();
    if let Some(rest) = s.strip_prefix("```json") {
        s = rest;
    } else if let Some(rest) = s.strip_prefix("```") {
        s = rest;
    }
    if let Some(rest) = s.strip_suffix("```") {
        s = rest;
    }
    s.trim()
}

/// Parses a model reply into a [`MeetingBriefing`], tolerating code fences.
pub fn parse_briefing(reply: &str) -> Result<MeetingBriefing, serde_json::Error> {
    serde_json::from_str(strip_code_fences(reply))
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPLY_BODY: &str = r#"{
        "title": "Q3 Planning",
        "description": "Quarterly planning session.",
        "executive_summary": "The team planned Q3.",
        "key_points": ["budget", "hiring"],
        "important_numbers": ["$40k"],
        "action_items": ["send recap"],
        "speaker_insights": ["ship earlier"],
        "questions_raised": ["when do we start?"],
        "open_questions": []
    }"#;

    #[test]
    fn test_parses_bare_json_reply() {
        let briefing = parse_briefing(REPLY_BODY).expect("bare JSON should parse");
        assert_eq!(briefing.title, "Q3 Planning");
        assert_eq!(briefing.key_points, vec!["budget", "hiring"]);
    }

    #[test]
    fn test_strips_json_code_fence() {
        let wrapped = format!("```json\n{REPLY_BODY}\n```");
        let briefing = parse_briefing(&wrapped).expect("fenced JSON should parse");
        assert_eq!(briefing.title, "Q3 Planning");
    }

    #[test]
    fn test_strips_anonymous_code_fence() {
        let wrapped = format!("```\n{REPLY_BODY}\n```");
        let briefing = parse_briefing(&wrapped).expect("fenced JSON should parse");
        assert_eq!(briefing.executive_summary, "The team planned Q3.");
    }

    #[test]
    fn test_missing_list_fields_default_to_empty() {
        let reply = r#"{"title": "t", "executive_summary": "s"}"#;
        let briefing = parse_briefing(reply).expect("minimal reply should parse");
        assert!(briefing.key_points.is_empty());
        assert!(briefing.description.is_none());
    }

    #[test]
    fn test_non_json_reply_is_an_error() {
        assert!(parse_briefing("I could not summarize this meeting.").is_err());
    }

    #[test]
    fn test_prompt_embeds_transcript() {
        let prompt = build_briefing_prompt("Alice: hello");
        assert!(prompt.contains("<transcript>\nAlice: hello\n</transcript>"));
        assert!(prompt.contains("ONLY the JSON object"));
    }
}
