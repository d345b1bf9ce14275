//! Web UI and JSON API for the notes converter
//!
//! Serves the single-page UI and the endpoint it calls to run the pipeline.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::pipeline::NotesPipeline;

pub mod handlers;
pub mod models;
pub mod server;

/// HTTP server for the UI and the notes API
pub struct ApiServer {
    pipeline: Arc<NotesPipeline>,
    config: Arc<Config>,
    port: u16,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(pipeline: Arc<NotesPipeline>, config: Arc<Config>, port: u16) -> Self {
        Self {
            pipeline,
            config,
            port,
        }
    }

    /// Start the server in a background task
    pub fn start_background(self) -> JoinHandle<Result<()>> {
        tokio::spawn(async move { self.start().await })
    }

    /// Start the server and serve until shutdown
    pub async fn start(self) -> Result<()> {
        info!("🚀 Starting server on port {}", self.port);
        server::start_http_server(self.pipeline, self.config, self.port).await
    }
}
