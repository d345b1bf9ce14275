//! TubeNotes - YouTube transcript to detailed notes converter
//!
//! Fetches a video's caption transcript, optionally translates it, buckets it
//! into fixed-length time windows, and summarizes each window with Gemini.

pub mod aggregate;
pub mod api;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod summarize;
pub mod transcript;
pub mod translate;

// Re-export main types for easy access
pub use crate::aggregate::{aggregate, format_timestamp, Bucket};
pub use crate::config::{Config, ConfigBuilder};
pub use crate::error::{NotesError, Result};
pub use crate::pipeline::{extract_video_id, thumbnail_url, NotesPipeline, PipelineResult};
pub use crate::summarize::{create_summarizer, Note, Summarizer};
pub use crate::transcript::{Fragment, TranscriptSource, YouTubeTranscriptClient};
pub use crate::translate::{GoogleTranslateClient, Translator};
