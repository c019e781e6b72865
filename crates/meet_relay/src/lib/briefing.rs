//! Plain-text rendering of a stored briefing, used by the export endpoint.

use meet_datastore::Transcript;

/// Renders `3661` as `1h 1m 1s`, `61` as `1m 1s`, `9` as `9s`.
pub fn format_duration(seconds: Option<i32>) -> String {
    let Some(seconds) = seconds.filter(|s| *s > 0) else {
        return "N/A".to_string();
    };

    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

/// Renders a transcript's briefing as a plain-text document: header block
/// first, then each populated section as a numbered list. Empty sections are
/// left out entirely.
pub fn format_briefing_text(transcript: &Transcript) -> String {
    let mut text = String::from("Meeting Briefing\n\n");

    text.push_str(&format!(
        "Title: {}\n",
        transcript.title.as_deref().unwrap_or("N/A")
    ));
    text.push_str(&format!("Room: {}\n", transcript.room_name));
    if let Some(date) = transcript.meeting_date.or(transcript.created_at) {
        text.push_str(&format!("Date: {}\n", date.format("%B %-d, %Y %H:%M")));
    }
    text.push_str(&format!(
        "Duration: {}\n\n",
        format_duration(transcript.duration)
    ));

    if let Some(description) = &transcript.description {
        text.push_str(&format!("Description:\n{description}\n\n"));
    }
    if let Some(summary) = &transcript.executive_summary {
        text.push_str(&format!("Executive Summary:\n{summary}\n\n"));
    }

    push_numbered_section(&mut text, "Key Points", &transcript.key_points);
    push_numbered_section(&mut text, "Action Items", &transcript.action_items);
    push_numbered_section(&mut text, "Important Numbers", &transcript.important_numbers);
    push_numbered_section(&mut text, "Questions Raised", &transcript.questions_raised);
    push_numbered_section(&mut text, "Open Questions", &transcript.open_questions);

    if let Some(insights) = &transcript.speaker_insights {
        text.push_str(&format!("Speaker Insights:\n{insights}\n\n"));
    }

    text
}

fn push_numbered_section(text: &mut String, heading: &str, items: &Option<Vec<String>>) {
    let Some(items) = items.as_ref().filter(|i| !i.is_empty()) else {
        return;
    };

    text.push_str(&format!("{heading}:\n"));
    for (i, item) in items.iter().enumerate() {
        text.push_str(&format!("{}. {}\n", i + 1, item));
    }
    text.push('\n');
}
