use anyhow::Result;
use clap::{Arg, Command};
use std::sync::Arc;
use tracing::{info, warn};

use tubenotes::api::ApiServer;
use tubenotes::{Config, NotesPipeline};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("tubenotes=info,warn")
        .init();

    let matches = Command::new("TubeNotes")
        .version("0.1.0")
        .about("YouTube transcript to detailed notes converter")
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .help("Port to serve the UI and API on"),
        )
        .arg(
            Arg::new("interval")
                .short('i')
                .long("interval")
                .value_name("SECONDS")
                .help("Width of each transcript bucket in seconds"),
        )
        .arg(
            Arg::new("no-translate")
                .long("no-translate")
                .help("Skip translating fragments before aggregation")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    // Load configuration
    let mut config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        Config::default()
    });

    if let Some(port) = matches.get_one::<String>("port") {
        config.server.port = port.parse()?;
    }
    if let Some(interval) = matches.get_one::<String>("interval") {
        config.aggregation.interval_seconds = interval.parse()?;
    }
    if matches.get_flag("no-translate") {
        config.translator.enabled = false;
    }

    config.validate()?;

    info!("🚀 TubeNotes starting...");
    info!("{}", config.summary());

    let pipeline = Arc::new(NotesPipeline::from_config(&config)?);
    let port = config.server.port;

    ApiServer::new(pipeline, Arc::new(config), port)
        .start()
        .await?;

    Ok(())
}
