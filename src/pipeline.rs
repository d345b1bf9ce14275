use serde::{Deserialize, Serialize};
use tracing::info;

use crate::aggregate::{aggregate, Bucket};
use crate::config::Config;
use crate::error::{NotesError, Result};
use crate::summarize::{create_summarizer, generate_notes, Note, Summarizer};
use crate::transcript::{TranscriptSource, YouTubeTranscriptClient};
use crate::translate::{translate_fragments, GoogleTranslateClient, Translator};

/// Everything one pipeline run produces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    pub video_id: String,
    pub thumbnail_url: String,
    /// Bucketed transcript in ascending timestamp order
    pub transcript: Vec<Bucket>,
    /// One summary per bucket, same order
    pub notes: Vec<Note>,
}

/// Extract the video id from a YouTube watch URL.
///
/// Takes the value of the first `v=` parameter; anything after the next `&`
/// or fragment marker is dropped.
pub fn extract_video_id(url: &str) -> Result<String> {
    let (_, rest) = url
        .split_once("v=")
        .ok_or_else(|| NotesError::InvalidInput(format!("URL has no v= parameter: {}", url)))?;

    let id: String = rest
        .chars()
        .take_while(|c| *c != '&' && *c != '#')
        .collect();

    if id.is_empty() {
        return Err(NotesError::InvalidInput(format!(
            "URL has an empty video id: {}",
            url
        )));
    }

    Ok(id)
}

/// Thumbnail image URL for a video
pub fn thumbnail_url(video_id: &str) -> String {
    format!("http://img.youtube.com/vi/{}/0.jpg", video_id)
}

/// Sequential transcript → translation → aggregation → notes pipeline.
///
/// Owns its collaborators behind trait objects so runs are independent of
/// any particular backing service, and testable without one.
pub struct NotesPipeline {
    transcript_source: Box<dyn TranscriptSource>,
    translator: Option<Box<dyn Translator>>,
    summarizer: Box<dyn Summarizer>,
    language_preferences: Vec<String>,
    target_language: String,
    interval_seconds: u64,
}

impl NotesPipeline {
    /// Build the production pipeline from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let translator: Option<Box<dyn Translator>> = if config.translator.enabled {
            Some(Box::new(GoogleTranslateClient::new(
                config.translator.timeout_seconds,
            )))
        } else {
            None
        };

        Ok(Self {
            transcript_source: Box::new(YouTubeTranscriptClient::new(
                config.transcript.timeout_seconds,
            )),
            translator,
            summarizer: create_summarizer(&config.summarizer)?,
            language_preferences: config.transcript.language_preferences.clone(),
            target_language: config.translator.target_language.clone(),
            interval_seconds: config.aggregation.interval_seconds,
        })
    }

    /// Build a pipeline from explicit collaborators
    pub fn new(
        transcript_source: Box<dyn TranscriptSource>,
        translator: Option<Box<dyn Translator>>,
        summarizer: Box<dyn Summarizer>,
        language_preferences: Vec<String>,
        target_language: String,
        interval_seconds: u64,
    ) -> Self {
        Self {
            transcript_source,
            translator,
            summarizer,
            language_preferences,
            target_language,
            interval_seconds,
        }
    }

    /// Check whether the summarizer API is reachable
    pub async fn summarizer_available(&self) -> bool {
        self.summarizer.is_available().await
    }

    /// Run the full pipeline for one video
    pub async fn run(&self, video_id: &str) -> Result<PipelineResult> {
        let fragments = self
            .transcript_source
            .fetch(video_id, &self.language_preferences)
            .await?;

        let fragments = match &self.translator {
            Some(translator) => {
                translate_fragments(translator.as_ref(), fragments, &self.target_language).await
            }
            None => fragments,
        };

        let transcript = aggregate(&fragments, self.interval_seconds)?;
        info!(
            "📊 Aggregated transcript into {} buckets of {}s",
            transcript.len(),
            self.interval_seconds
        );

        let notes = generate_notes(self.summarizer.as_ref(), &transcript).await;

        Ok(PipelineResult {
            video_id: video_id.to_string(),
            thumbnail_url: thumbnail_url(video_id),
            transcript,
            notes,
        })
    }
}
