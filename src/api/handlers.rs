//! Request handling logic, kept free of any axum types

use serde_json::{json, Value};

use super::models::NotesResponse;
use crate::error::Result;
use crate::pipeline::{extract_video_id, NotesPipeline};

/// Run the notes pipeline for a watch URL
pub async fn generate_notes(pipeline: &NotesPipeline, url: &str) -> Result<NotesResponse> {
    let video_id = extract_video_id(url)?;
    let result = pipeline.run(&video_id).await?;
    Ok(NotesResponse::from_result(&result))
}

/// Service liveness plus a summarizer reachability probe
pub async fn health_check(pipeline: &NotesPipeline) -> Value {
    json!({
        "status": "ok",
        "summarizer_available": pipeline.summarizer_available().await,
    })
}
