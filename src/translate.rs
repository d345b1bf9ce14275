use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::error::{NotesError, Result};
use crate::transcript::Fragment;

const TRANSLATE_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Text translation into a target language
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String>;
}

/// Translator backed by the public Google Translate web endpoint
#[derive(Clone)]
pub struct GoogleTranslateClient {
    client: Client,
}

impl GoogleTranslateClient {
    /// Create a new translate client
    pub fn new(timeout_seconds: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }
}

#[async_trait]
impl Translator for GoogleTranslateClient {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String> {
        let url = Url::parse_with_params(
            TRANSLATE_ENDPOINT,
            &[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target_language),
                ("dt", "t"),
                ("q", text),
            ],
        )
        .map_err(|e| NotesError::TranslationFailed(e.to_string()))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| NotesError::TranslationFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NotesError::TranslationFailed(format!(
                "translate endpoint returned {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| NotesError::TranslationFailed(e.to_string()))?;

        parse_translation(&body)
    }
}

/// Concatenate the translated segments out of the `translate_a/single` array
fn parse_translation(body: &Value) -> Result<String> {
    let segments = body
        .get(0)
        .and_then(|v| v.as_array())
        .ok_or_else(|| NotesError::TranslationFailed("unexpected response shape".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(|v| v.as_str()))
        .collect();

    if translated.is_empty() {
        return Err(NotesError::TranslationFailed(
            "response contained no translated text".to_string(),
        ));
    }

    Ok(translated)
}

/// Translate each fragment's text, keeping timestamps intact.
///
/// A fragment that fails to translate keeps its original text so its
/// contribution to the bucketed transcript is never dropped.
pub async fn translate_fragments(
    translator: &dyn Translator,
    fragments: Vec<Fragment>,
    target_language: &str,
) -> Vec<Fragment> {
    let mut translated = Vec::with_capacity(fragments.len());

    for fragment in fragments {
        match translator.translate(&fragment.text, target_language).await {
            Ok(text) => {
                translated.push(Fragment {
                    start: fragment.start,
                    text,
                });
            }
            Err(e) => {
                warn!(
                    "Translation failed for fragment at {:.1}s, keeping original: {}",
                    fragment.start, e
                );
                translated.push(fragment);
            }
        }
    }

    debug!("Translated {} fragments", translated.len());
    translated
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct FlakyTranslator;

    #[async_trait]
    impl Translator for FlakyTranslator {
        async fn translate(&self, text: &str, _target_language: &str) -> Result<String> {
            if text.contains("fail") {
                Err(NotesError::TranslationFailed("boom".to_string()))
            } else {
                Ok(format!("{} (en)", text))
            }
        }
    }

    #[test]
    fn test_parse_translation() {
        // translate_a/single nests [translated, original, ...] triples
        let body = json!([
            [
                ["Hello ", "Hola ", null],
                ["world", "mundo", null]
            ],
            null,
            "es"
        ]);

        assert_eq!(parse_translation(&body).unwrap(), "Hello world");
    }

    #[test]
    fn test_parse_translation_bad_shape() {
        let body = json!({"error": "nope"});
        assert!(matches!(
            parse_translation(&body),
            Err(NotesError::TranslationFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_translate_fragments_keeps_original_on_failure() {
        let fragments = vec![
            Fragment { start: 0.0, text: "hola".to_string() },
            Fragment { start: 5.0, text: "fail me".to_string() },
            Fragment { start: 10.0, text: "adios".to_string() },
        ];

        let translated = translate_fragments(&FlakyTranslator, fragments, "en").await;

        assert_eq!(translated.len(), 3);
        assert_eq!(translated[0].text, "hola (en)");
        assert_eq!(translated[1].text, "fail me");
        assert_eq!(translated[1].start, 5.0);
        assert_eq!(translated[2].text, "adios (en)");
    }
}
