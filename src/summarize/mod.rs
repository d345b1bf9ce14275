pub mod gemini;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::aggregate::Bucket;
use crate::config::SummarizerConfig;
use crate::error::Result;

/// Placeholder substituted when the API yields no usable summary
pub const SUMMARY_UNAVAILABLE: &str = "Summary not available due to API response issues.";

/// A per-bucket summary produced by the summarizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Timestamp of the bucket this note summarizes
    pub timestamp: u64,
    /// Natural-language summary of the bucket's text
    pub summary: String,
}

/// LLM-backed text summarization
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize one bucket's worth of transcript text
    async fn summarize(&self, text: &str) -> Result<String>;

    /// Check whether the backing API is reachable
    async fn is_available(&self) -> bool;
}

/// Create a summarizer instance based on configuration
pub fn create_summarizer(config: &SummarizerConfig) -> Result<Box<dyn Summarizer>> {
    Ok(Box::new(gemini::GeminiClient::new(config.clone())?))
}

/// Produce one note per bucket, in bucket order.
///
/// A bucket whose summarization fails gets the placeholder summary and the
/// run continues with the remaining buckets.
pub async fn generate_notes(summarizer: &dyn Summarizer, buckets: &[Bucket]) -> Vec<Note> {
    let mut notes = Vec::with_capacity(buckets.len());

    for bucket in buckets {
        let summary = match summarizer.summarize(&bucket.text).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(
                    "Summarization failed for bucket at {}s: {}",
                    bucket.timestamp, e
                );
                SUMMARY_UNAVAILABLE.to_string()
            }
        };

        debug!("Summarized bucket at {}s", bucket.timestamp);
        notes.push(Note {
            timestamp: bucket.timestamp,
            summary,
        });
    }

    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotesError;

    struct FlakySummarizer;

    #[async_trait]
    impl Summarizer for FlakySummarizer {
        async fn summarize(&self, text: &str) -> Result<String> {
            if text.contains("fail") {
                Err(NotesError::SummarizationFailed("boom".to_string()))
            } else {
                Ok(format!("summary of: {}", text))
            }
        }

        async fn is_available(&self) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn test_generate_notes_substitutes_placeholder_on_failure() {
        let buckets = vec![
            Bucket { timestamp: 0, text: "intro".to_string() },
            Bucket { timestamp: 45, text: "fail here".to_string() },
            Bucket { timestamp: 90, text: "outro".to_string() },
        ];

        let notes = generate_notes(&FlakySummarizer, &buckets).await;

        assert_eq!(notes.len(), 3);
        assert_eq!(notes[0].summary, "summary of: intro");
        assert_eq!(notes[1].timestamp, 45);
        assert_eq!(notes[1].summary, SUMMARY_UNAVAILABLE);
        assert_eq!(notes[2].summary, "summary of: outro");
    }

    #[tokio::test]
    async fn test_generate_notes_empty_buckets() {
        let notes = generate_notes(&FlakySummarizer, &[]).await;
        assert!(notes.is_empty());
    }
}
