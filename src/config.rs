use serde::{Deserialize, Serialize};

use crate::error::{NotesError, Result};

/// Configuration for the notes converter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Transcript retrieval settings
    pub transcript: TranscriptConfig,

    /// Translation settings
    pub translator: TranslatorConfig,

    /// Summarizer (Gemini) settings
    pub summarizer: SummarizerConfig,

    /// Transcript aggregation settings
    pub aggregation: AggregationConfig,

    /// HTTP server settings
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptConfig {
    /// Caption languages to try, in preference order
    pub language_preferences: Vec<String>,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// Enable translation of fetched fragments
    pub enabled: bool,

    /// Language to translate fragments into
    pub target_language: String,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizerConfig {
    /// Gemini API key
    pub api_key: Option<String>,

    /// Model to use for summarization
    pub model: String,

    /// Maximum tokens per bucket summary
    pub max_output_tokens: u32,

    /// Temperature for generation (0.0 = deterministic)
    pub temperature: f32,

    /// Request timeout in seconds
    pub timeout_seconds: u64,

    /// Instruction prepended to each bucket's text
    pub instruction: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Width of each transcript bucket in seconds
    pub interval_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to serve the UI and API on
    pub port: u16,
}

/// Instruction template sent ahead of each bucket's transcript text
pub const DEFAULT_INSTRUCTION: &str = "You are a YouTube video summarizer. You will be taking the transcript text \
and summarizing the entire video. Your summary should include detailed explanations for each 45-second interval, \
limited to 3-4 lines. Please provide the summary of the text given here: ";

impl Config {
    /// Load configuration from file, falling back to environment variables
    pub fn load() -> Result<Self> {
        let config_paths = [
            "tubenotes.toml",
            "config/tubenotes.toml",
            "~/.config/tubenotes/config.toml",
            "/etc/tubenotes/config.toml",
        ];

        for path in &config_paths {
            if let Ok(config_str) = std::fs::read_to_string(path) {
                match toml::from_str::<Config>(&config_str) {
                    Ok(mut config) => {
                        tracing::info!("📄 Loaded configuration from: {}", path);
                        config.apply_env();
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config file {}: {}", path, e);
                    }
                }
            }
        }

        Self::from_env()
    }

    /// Build configuration from environment variables alone
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env();
        Ok(config)
    }

    /// Override settings with environment variables
    fn apply_env(&mut self) {
        if let Ok(api_key) = std::env::var("GOOGLE_API_KEY") {
            self.summarizer.api_key = Some(api_key);
        }

        if let Ok(model) = std::env::var("TUBENOTES_MODEL") {
            self.summarizer.model = model;
        }

        if let Ok(interval) = std::env::var("TUBENOTES_INTERVAL_SECONDS") {
            self.aggregation.interval_seconds = interval.parse().unwrap_or(45);
        }

        if let Ok(port) = std::env::var("TUBENOTES_PORT") {
            self.server.port = port.parse().unwrap_or(8080);
        }

        if let Ok(languages) = std::env::var("TUBENOTES_LANGUAGES") {
            self.transcript.language_preferences =
                languages.split(',').map(|l| l.trim().to_string()).collect();
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.aggregation.interval_seconds == 0 {
            return Err(NotesError::InvalidConfiguration(
                "aggregation.interval_seconds must be greater than 0".to_string(),
            ));
        }

        if self.transcript.language_preferences.is_empty() {
            return Err(NotesError::InvalidConfiguration(
                "transcript.language_preferences must not be empty".to_string(),
            ));
        }

        if self.summarizer.api_key.is_none() {
            return Err(NotesError::InvalidConfiguration(
                "summarizer.api_key is required (set GOOGLE_API_KEY)".to_string(),
            ));
        }

        Ok(())
    }

    /// Get runtime configuration summary
    pub fn summary(&self) -> String {
        format!(
            "TubeNotes Configuration:\n\
            - Languages: {}\n\
            - Translation: {} (target: {})\n\
            - Summarizer Model: {}\n\
            - Interval: {}s\n\
            - Port: {}",
            self.transcript.language_preferences.join(", "),
            if self.translator.enabled { "enabled" } else { "disabled" },
            self.translator.target_language,
            self.summarizer.model,
            self.aggregation.interval_seconds,
            self.server.port,
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transcript: TranscriptConfig {
                language_preferences: vec![
                    "en".to_string(),
                    "hi".to_string(),
                    "te".to_string(),
                ],
                timeout_seconds: 30,
            },
            translator: TranslatorConfig {
                enabled: true,
                target_language: "en".to_string(),
                timeout_seconds: 30,
            },
            summarizer: SummarizerConfig {
                api_key: None,
                model: "gemini-pro".to_string(),
                max_output_tokens: 150, // keeps summaries to 3-4 lines
                temperature: 0.1,
                timeout_seconds: 60,
                instruction: DEFAULT_INSTRUCTION.to_string(),
            },
            aggregation: AggregationConfig {
                interval_seconds: 45,
            },
            server: ServerConfig { port: 8080 },
        }
    }
}

/// Configuration builder for programmatic config creation
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.config.summarizer.api_key = Some(api_key);
        self
    }

    pub fn with_interval_seconds(mut self, interval_seconds: u64) -> Self {
        self.config.aggregation.interval_seconds = interval_seconds;
        self
    }

    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        self.config.transcript.language_preferences = languages;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.config.server.port = port;
        self
    }

    pub fn enable_translation(mut self, enable: bool) -> Self {
        self.config.translator.enabled = enable;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
