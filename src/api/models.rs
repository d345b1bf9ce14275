//! API data models

use serde::{Deserialize, Serialize};

use crate::aggregate::format_timestamp;
use crate::pipeline::PipelineResult;

/// API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Request body for note generation
#[derive(Debug, Serialize, Deserialize)]
pub struct NotesRequest {
    /// YouTube watch URL containing a v= parameter
    pub url: String,
}

/// One `MM:SS`-stamped line of output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimedLine {
    pub timestamp: String,
    pub text: String,
}

/// Full result of a notes run, formatted for display
#[derive(Debug, Serialize, Deserialize)]
pub struct NotesResponse {
    pub video_id: String,
    pub thumbnail_url: String,
    pub transcript: Vec<TimedLine>,
    pub notes: Vec<TimedLine>,
}

impl NotesResponse {
    pub fn from_result(result: &PipelineResult) -> Self {
        Self {
            video_id: result.video_id.clone(),
            thumbnail_url: result.thumbnail_url.clone(),
            transcript: result
                .transcript
                .iter()
                .map(|bucket| TimedLine {
                    timestamp: format_timestamp(bucket.timestamp as f64),
                    text: bucket.text.clone(),
                })
                .collect(),
            notes: result
                .notes
                .iter()
                .map(|note| TimedLine {
                    timestamp: format_timestamp(note.timestamp as f64),
                    text: note.summary.clone(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Bucket;
    use crate::summarize::Note;

    #[test]
    fn test_notes_response_formats_timestamps() {
        let result = PipelineResult {
            video_id: "abc123".to_string(),
            thumbnail_url: "http://img.youtube.com/vi/abc123/0.jpg".to_string(),
            transcript: vec![Bucket { timestamp: 75, text: "hello".to_string() }],
            notes: vec![Note { timestamp: 75, summary: "a summary".to_string() }],
        };

        let response = NotesResponse::from_result(&result);
        assert_eq!(response.transcript[0].timestamp, "01:15");
        assert_eq!(response.transcript[0].text, "hello");
        assert_eq!(response.notes[0].timestamp, "01:15");
        assert_eq!(response.notes[0].text, "a summary");
    }
}
