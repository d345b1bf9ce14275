use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{NotesError, Result};

const WATCH_URL: &str = "https://www.youtube.com/watch";
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// A single timestamped piece of transcript text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// Offset from the start of the video in seconds
    pub start: f64,
    /// Caption text with markup stripped and entities decoded
    pub text: String,
}

/// Source of timestamped transcript fragments for a video
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the transcript in the first available preferred language.
    ///
    /// Returns fragments in chronological, non-decreasing `start` order.
    async fn fetch(&self, video_id: &str, languages: &[String]) -> Result<Vec<Fragment>>;
}

/// Transcript client backed by YouTube's caption tracks
#[derive(Clone)]
pub struct YouTubeTranscriptClient {
    client: Client,
}

impl YouTubeTranscriptClient {
    /// Create a new transcript client
    pub fn new(timeout_seconds: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    /// Fetch the watch page and pull out the player response JSON
    async fn fetch_player_response(&self, video_id: &str) -> Result<Value> {
        let html = self
            .client
            .get(WATCH_URL)
            .query(&[("v", video_id)])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let raw = extract_json_object(&html, "ytInitialPlayerResponse")
            .ok_or_else(|| NotesError::TranscriptUnavailable(video_id.to_string()))?;

        Ok(serde_json::from_str(raw)?)
    }
}

#[async_trait]
impl TranscriptSource for YouTubeTranscriptClient {
    async fn fetch(&self, video_id: &str, languages: &[String]) -> Result<Vec<Fragment>> {
        info!("🎬 Fetching transcript for video: {}", video_id);

        let player = self.fetch_player_response(video_id).await?;

        let tracks = player
            .pointer("/captions/playerCaptionsTracklistRenderer/captionTracks")
            .and_then(|v| v.as_array())
            .ok_or_else(|| NotesError::TranscriptsDisabled(video_id.to_string()))?;

        let track = select_caption_track(tracks, languages)
            .ok_or_else(|| NotesError::TranscriptUnavailable(video_id.to_string()))?;

        let base_url = track
            .get("baseUrl")
            .and_then(|v| v.as_str())
            .ok_or_else(|| NotesError::TranscriptUnavailable(video_id.to_string()))?;

        debug!("Selected caption track: {}", base_url);

        let xml = self
            .client
            .get(base_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let fragments = parse_timed_text(&xml);
        if fragments.is_empty() {
            return Err(NotesError::TranscriptUnavailable(video_id.to_string()));
        }

        info!("📝 Fetched {} transcript fragments", fragments.len());
        Ok(fragments)
    }
}

/// Pick the caption track for the first preferred language that has one
fn select_caption_track<'a>(tracks: &'a [Value], languages: &[String]) -> Option<&'a Value> {
    for language in languages {
        let found = tracks.iter().find(|track| {
            track
                .get("languageCode")
                .and_then(|v| v.as_str())
                .map(|code| code == language)
                .unwrap_or(false)
        });
        if found.is_some() {
            return found;
        }
    }
    None
}

/// Extract the JSON object assigned to `marker` from a script-laden HTML page.
///
/// Scans forward from the marker to the first `{` and returns the balanced
/// object, tracking string literals so braces inside caption titles don't
/// throw off the depth count.
fn extract_json_object<'a>(html: &'a str, marker: &str) -> Option<&'a str> {
    let marker_pos = html.find(marker)?;
    let open = html[marker_pos..].find('{')? + marker_pos;

    let bytes = html.as_bytes();
    let mut depth: usize = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes[open..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&html[open..=open + i]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse timed-text XML cues into ordered fragments.
///
/// Cues arrive as `<text start="12.4" dur="3.1">caption</text>`; inner markup
/// is stripped and entities decoded. Cues with empty text are dropped.
fn parse_timed_text(xml: &str) -> Vec<Fragment> {
    let cue_re = Regex::new(r#"(?s)<text start="([0-9.]+)"[^>]*>(.*?)</text>"#).unwrap();
    let tag_re = Regex::new(r"<[^>]+>").unwrap();

    cue_re
        .captures_iter(xml)
        .filter_map(|caps| {
            let start: f64 = caps[1].parse().ok()?;
            let raw = tag_re.replace_all(&caps[2], "");
            let text = decode_entities(raw.trim());
            if text.is_empty() {
                None
            } else {
                Some(Fragment { start, text })
            }
        })
        .collect()
}

/// Decode the named and numeric entities YouTube uses in timed-text cues
fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        let Some(end) = rest.find(';') else {
            out.push_str(rest);
            return out;
        };

        let entity = &rest[1..end];
        let decoded = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            "nbsp" => Some(' '),
            _ => entity.strip_prefix('#').and_then(|num| {
                let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
                    Some(hex) => u32::from_str_radix(hex, 16).ok(),
                    None => num.parse::<u32>().ok(),
                };
                code.and_then(char::from_u32)
            }),
        };

        match decoded {
            Some(c) => {
                out.push(c);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_timed_text() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<transcript>
  <text start="0.08" dur="4.16">welcome back to the channel</text>
  <text start="4.24" dur="3.2">today we&#39;re talking about &amp;quot;rust&amp;quot;</text>
  <text start="7.5" dur="2.0"><i>applause</i></text>
  <text start="10.0" dur="1.0">   </text>
</transcript>"#;

        let fragments = parse_timed_text(xml);
        assert_eq!(fragments.len(), 3);
        assert_eq!(fragments[0].start, 0.08);
        assert_eq!(fragments[0].text, "welcome back to the channel");
        assert_eq!(fragments[1].text, "today we're talking about &quot;rust&quot;");
        assert_eq!(fragments[2].text, "applause");
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&lt;tag&gt;"), "<tag>");
        assert_eq!(decode_entities("it&#39;s"), "it's");
        assert_eq!(decode_entities("&#x27;quoted&#x27;"), "'quoted'");
        assert_eq!(decode_entities("no entities"), "no entities");
        assert_eq!(decode_entities("dangling &"), "dangling &");
        assert_eq!(decode_entities("&bogus; stays"), "&bogus; stays");
    }

    #[test]
    fn test_extract_json_object() {
        let html = r#"<script>var ytInitialPlayerResponse = {"a": {"b": "c}"}, "d": 1};</script>"#;
        let raw = extract_json_object(html, "ytInitialPlayerResponse").unwrap();
        let value: Value = serde_json::from_str(raw).unwrap();
        assert_eq!(value["d"], 1);
        assert_eq!(value["a"]["b"], "c}");
    }

    #[test]
    fn test_extract_json_object_missing_marker() {
        assert!(extract_json_object("<html></html>", "ytInitialPlayerResponse").is_none());
    }

    #[test]
    fn test_select_caption_track_prefers_language_order() {
        let tracks = vec![
            json!({"languageCode": "te", "baseUrl": "https://example.com/te"}),
            json!({"languageCode": "hi", "baseUrl": "https://example.com/hi"}),
        ];
        let languages = vec!["en".to_string(), "hi".to_string(), "te".to_string()];

        let track = select_caption_track(&tracks, &languages).unwrap();
        assert_eq!(track["languageCode"], "hi");
    }

    #[test]
    fn test_select_caption_track_no_match() {
        let tracks = vec![json!({"languageCode": "fr", "baseUrl": "https://example.com/fr"})];
        let languages = vec!["en".to_string()];

        assert!(select_caption_track(&tracks, &languages).is_none());
    }
}
