//! # Caption Track Parser
//!
//! This module parses the WebVTT-style caption tracks produced by the video
//! platform's transcription engine into speaker-attributed, timestamped
//! entries, and flattens them into plain dialogue text for summarization.
//!
//! Both the webhook pipeline and the transcript viewer endpoint consume the
//! same parser, so the two can never drift apart.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Matches `<v>Speaker Name:</v>rest of line`.
static TAGGED_SPEAKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<v>([^<]+):</v>(.*)$").unwrap());

/// Matches `<v Speaker Name>rest of line`.
static INLINE_SPEAKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<v\s+([^>]+)>(.*)$").unwrap());

/// Matches a cue timing value at the start of a line, e.g. `00:01:02.345`.
static LEADING_TIMESTAMP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}:\d{2}\.\d{3}").unwrap());

/// Fallback speaker label for untagged cue text.
const UNKNOWN_SPEAKER: &str = "Unknown";

/// One spoken entry extracted from a caption track, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptionEntry {
    /// Cue start time as written in the source, e.g. `00:00:01.000`.
    pub timestamp: String,
    pub speaker: String,
    pub text: String,
}

/// Parses caption text into an ordered sequence of [`CaptionEntry`].
///
/// The returned iterator is lazy and borrows the input; parsing the same
/// text again yields an identical sequence. Entries come out in source
/// order, which is chronological for well-formed tracks; the parser never
/// reorders, even when two cues carry the same timing value.
pub fn parse_captions(content: &str) -> CaptionEntries<'_> {
    CaptionEntries {
        lines: content.lines(),
        timestamp: None,
        speaker: None,
        text: String::new(),
    }
}

/// Convenience wrapper collecting [`parse_captions`] into a `Vec`.
pub fn parse_captions_to_vec(content: &str) -> Vec<CaptionEntry> {
    parse_captions(content).collect()
}

/// Lazy iterator over the entries of a caption track.
///
/// Carries a partially-built entry between lines: a timing line opens a cue,
/// speaker-tagged lines fill in speaker and text, and the entry is emitted
/// once all three pieces are present. Untagged text under a pending timing
/// line is emitted immediately, one entry per physical line, with the
/// speaker defaulting to `"Unknown"`. A partial entry left over at end of
/// input is dropped.
pub struct CaptionEntries<'a> {
    lines: std::str::Lines<'a>,
    timestamp: Option<String>,
    speaker: Option<String>,
    text: String,
}

impl CaptionEntries<'_> {
    /// Emits the accumulated entry if timestamp, speaker and text are all
    /// present, clearing speaker and text. The timestamp stays pending so
    /// that further lines under the same cue reuse it.
    fn take_complete(&mut self) -> Option<CaptionEntry> {
        let timestamp = self.timestamp.as_ref()?;
        if self.speaker.as_deref().map_or(true, str::is_empty) || self.text.is_empty() {
            return None;
        }
        let entry = CaptionEntry {
            timestamp: timestamp.clone(),
            speaker: self.speaker.take().unwrap_or_default(),
            text: std::mem::take(&mut self.text),
        };
        Some(entry)
    }
}

impl Iterator for CaptionEntries<'_> {
    type Item = CaptionEntry;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(line) = self.lines.next() {
            let line = line.trim();

            if line.is_empty()
                || line.starts_with("WEBVTT")
                || line.starts_with("NOTE")
                || line.starts_with("transcript:")
            {
                continue;
            }

            // Timing line opens a new cue and discards any partial entry.
            if let Some((start, _)) = line.split_once("-->") {
                self.timestamp = Some(start.trim().to_string());
                self.speaker = None;
                self.text.clear();
                continue;
            }

            if let Some(caps) = TAGGED_SPEAKER_RE.captures(line) {
                self.speaker = Some(caps[1].trim().to_string());
                self.text = caps[2].trim().to_string();
                if let Some(entry) = self.take_complete() {
                    return Some(entry);
                }
                continue;
            }

            if let Some(caps) = INLINE_SPEAKER_RE.captures(line) {
                self.speaker = Some(caps[1].trim().to_string());
                self.text = caps[2].trim().to_string();
                if let Some(entry) = self.take_complete() {
                    return Some(entry);
                }
                continue;
            }

            // Untagged text only counts once a timing line has been seen.
            // Each physical line yields its own entry rather than being
            // folded into a single multi-line cue.
            if let Some(timestamp) = &self.timestamp {
                if self.speaker.is_none() {
                    self.speaker = Some(UNKNOWN_SPEAKER.to_string());
                }
                if !self.text.is_empty() {
                    self.text.push(' ');
                }
                self.text.push_str(line);

                return Some(CaptionEntry {
                    timestamp: timestamp.clone(),
                    speaker: self.speaker.take().unwrap_or_default(),
                    text: std::mem::take(&mut self.text),
                });
            }
        }

        None
    }
}

/// Flattens caption text into plain dialogue for the summary prompt.
///
/// One line per cue: `Speaker: text` where a speaker tag was present, the
/// raw line otherwise. Header, `NOTE`, `transcript:`-prefixed, blank and
/// timing lines are dropped. This is deliberately a separate single-pass
/// scan rather than a projection of [`parse_captions`]: the prompt only
/// needs reading text, not structured entries.
pub fn flatten_to_text(content: &str) -> String {
    let mut out = Vec::new();

    for line in content.lines() {
        let line = line.trim();

        if line.is_empty()
            || line.starts_with("WEBVTT")
            || line.starts_with("NOTE")
            || line.starts_with("transcript:")
            || LEADING_TIMESTAMP_RE.is_match(line)
        {
            continue;
        }

        if let Some(caps) = TAGGED_SPEAKER_RE.captures(line) {
            out.push(format!("{}: {}", caps[1].trim(), caps[2].trim()));
        } else {
            out.push(line.to_string());
        }
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_tagged_cue() {
        let vtt = "WEBVTT\n\n00:00:01.000 --> 00:00:03.000\n<v>Alice:</v>Hello there\n";
        let entries = parse_captions_to_vec(vtt);

        assert_eq!(
            entries,
            vec![CaptionEntry {
                timestamp: "00:00:01.000".to_string(),
                speaker: "Alice".to_string(),
                text: "Hello there".to_string(),
            }]
        );
    }

    #[test]
    fn test_inline_speaker_attribute() {
        let vtt = "WEBVTT\n\n00:00:05.000 --> 00:00:07.000\n<v Bob>How are you\n";
        let entries = parse_captions_to_vec(vtt);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].speaker, "Bob");
        assert_eq!(entries[0].text, "How are you");
    }

    #[test]
    fn test_speaker_is_trimmed_and_has_no_delimiters() {
        let vtt = "00:00:01.000 --> 00:00:02.000\n<v>  Alice Smith :</v>  hi  \n";
        let entries = parse_captions_to_vec(vtt);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].speaker, "Alice Smith");
        assert!(!entries[0].speaker.contains('<'));
        assert!(!entries[0].speaker.contains('>'));
        assert_eq!(entries[0].text, "hi");
    }

    #[test]
    fn test_non_cue_lines_emit_nothing() {
        let vtt = "WEBVTT\n\nNOTE generated by the transcription engine\ntranscript: abc-123\n\n";
        assert!(parse_captions_to_vec(vtt).is_empty());
    }

    #[test]
    fn test_timing_line_without_content_is_dropped() {
        let vtt = "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\n\n00:00:03.000 --> 00:00:04.000\n<v>Alice:</v>Back again\n";
        let entries = parse_captions_to_vec(vtt);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].timestamp, "00:00:03.000");
    }

    #[test]
    fn test_plain_text_line_defaults_to_unknown_speaker() {
        let vtt = "00:00:01.000 --> 00:00:02.000\nsome untagged words\n";
        let entries = parse_captions_to_vec(vtt);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].speaker, "Unknown");
        assert_eq!(entries[0].text, "some untagged words");
    }

    #[test]
    fn test_plain_text_emits_one_entry_per_line() {
        // Multi-line untagged cues deliberately come out as one entry per
        // physical line; search and export rely on this.
        let vtt = "00:00:01.000 --> 00:00:04.000\nfirst line\nsecond line\n";
        let entries = parse_captions_to_vec(vtt);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text, "first line");
        assert_eq!(entries[1].text, "second line");
        assert_eq!(entries[0].timestamp, entries[1].timestamp);
    }

    #[test]
    fn test_plain_text_without_pending_timestamp_is_ignored() {
        let vtt = "WEBVTT\n\nstray line before any cue\n";
        assert!(parse_captions_to_vec(vtt).is_empty());
    }

    #[test]
    fn test_plain_text_completes_partial_tagged_entry() {
        // A tagged line with no text leaves the speaker pending; the next
        // plain line supplies the text and the entry is emitted.
        let vtt = "00:00:01.000 --> 00:00:02.000\n<v>Alice:</v>\ndelayed words\n";
        let entries = parse_captions_to_vec(vtt);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].speaker, "Alice");
        assert_eq!(entries[0].text, "delayed words");
    }

    #[test]
    fn test_identical_timestamps_keep_source_order() {
        let vtt = "00:00:01.000 --> 00:00:02.000\n<v>Alice:</v>first\n00:00:01.000 --> 00:00:02.000\n<v>Bob:</v>second\n";
        let entries = parse_captions_to_vec(vtt);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].speaker, "Alice");
        assert_eq!(entries[1].speaker, "Bob");
        assert_eq!(entries[0].timestamp, entries[1].timestamp);
    }

    #[test]
    fn test_parsing_is_idempotent() {
        let vtt = "WEBVTT\n\n00:00:01.000 --> 00:00:03.000\n<v>Alice:</v>Hello\n\n00:00:04.000 --> 00:00:06.000\nuntagged\n";
        let first = parse_captions_to_vec(vtt);
        let second = parse_captions_to_vec(vtt);

        assert_eq!(first, second);
    }

    #[test]
    fn test_dangling_accumulator_is_not_emitted() {
        // The final timing line opens a cue that never completes.
        let vtt = "00:00:01.000 --> 00:00:02.000\n<v>Alice:</v>done\n00:00:03.000 --> 00:00:04.000\n";
        let entries = parse_captions_to_vec(vtt);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "done");
    }

    #[test]
    fn test_flatten_formats_tagged_lines() {
        let vtt = "WEBVTT\n\n00:00:01.000 --> 00:00:03.000\n<v>Alice:</v>Hello there\n\n00:00:04.000 --> 00:00:05.000\n<v>Bob:</v>Hi\n";
        let text = flatten_to_text(vtt);

        assert_eq!(text, "Alice: Hello there\nBob: Hi");
    }

    #[test]
    fn test_flatten_skips_headers_and_timing_lines() {
        let vtt = "WEBVTT\n\nNOTE engine\ntranscript: id-1\n00:00:01.000 --> 00:00:03.000\nplain words\n";
        let text = flatten_to_text(vtt);

        assert_eq!(text, "plain words");
        assert!(!text.contains("-->"));
        assert!(!text.contains("WEBVTT"));
    }

    #[test]
    fn test_flatten_never_emits_leading_timestamp_lines() {
        let vtt = "00:00:01.000 --> 00:00:02.000\n00:00:01.500 some stray timing text\n<v>Alice:</v>ok\n";
        let text = flatten_to_text(vtt);

        for line in text.lines() {
            assert!(
                !LEADING_TIMESTAMP_RE.is_match(line),
                "flattened output contains timestamp line: {line}"
            );
        }
        assert_eq!(text, "Alice: ok");
    }
}
