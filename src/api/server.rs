//! HTTP server implementation for the UI and API

use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use super::{
    handlers,
    models::{ApiResponse, NotesRequest, NotesResponse},
};
use crate::config::Config;
use crate::error::{NotesError, Result};
use crate::pipeline::NotesPipeline;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<NotesPipeline>,
    pub config: Arc<Config>,
}

/// Configure and start the HTTP server
pub async fn start_http_server(
    pipeline: Arc<NotesPipeline>,
    config: Arc<Config>,
    port: u16,
) -> Result<()> {
    let app_state = AppState { pipeline, config };

    // Allow browser access from anywhere
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let app = Router::new()
        .route("/", get(serve_ui))
        .route("/health", get(health_handler))
        .route("/api/health", get(health_handler))
        .route("/api/notes", post(notes_handler))
        .with_state(app_state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors));

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("🌐 TubeNotes listening on http://0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Map pipeline errors to response status codes
fn error_status(error: &NotesError) -> StatusCode {
    match error {
        NotesError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        NotesError::TranscriptUnavailable(_) | NotesError::TranscriptsDisabled(_) => {
            StatusCode::NOT_FOUND
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Notes generation handler
async fn notes_handler(
    State(state): State<AppState>,
    Json(request): Json<NotesRequest>,
) -> impl IntoResponse {
    match handlers::generate_notes(&state.pipeline, &request.url).await {
        Ok(response) => (
            StatusCode::OK,
            Json(ApiResponse::success(response)),
        )
            .into_response(),
        Err(e) => {
            warn!("Notes request failed: {}", e);
            (
                error_status(&e),
                Json(ApiResponse::<NotesResponse>::error(e.to_string())),
            )
                .into_response()
        }
    }
}

/// Health check handler
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(handlers::health_check(&state.pipeline).await))
}

/// Serve the single-page UI
async fn serve_ui() -> impl IntoResponse {
    Html(UI_PAGE)
}

const UI_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>YouTube Transcript to Detailed Notes Converter</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 40px; max-width: 800px; }
        input[type=text] { width: 70%; padding: 8px; }
        button { padding: 8px 16px; }
        img { max-width: 100%; margin-top: 16px; }
        .line { background: #f5f5f5; padding: 8px; margin: 6px 0; }
        .timestamp { font-weight: bold; margin-right: 6px; }
        #error { color: #b00020; margin-top: 16px; }
    </style>
</head>
<body>
    <h1>YouTube Transcript to Detailed Notes Converter</h1>

    <input type="text" id="url" placeholder="Enter YouTube Video Link:">
    <button id="generate">Get Detailed Notes</button>

    <div id="error"></div>
    <img id="thumbnail" style="display:none">
    <div id="transcript"></div>
    <div id="notes"></div>

    <script>
        function renderLines(container, title, lines) {
            container.innerHTML = '<h2>' + title + '</h2>';
            for (const line of lines) {
                const div = document.createElement('div');
                div.className = 'line';
                const stamp = document.createElement('span');
                stamp.className = 'timestamp';
                stamp.textContent = line.timestamp + ':';
                div.appendChild(stamp);
                div.appendChild(document.createTextNode(line.text));
                container.appendChild(div);
            }
        }

        document.getElementById('generate').addEventListener('click', async () => {
            const url = document.getElementById('url').value;
            const error = document.getElementById('error');
            error.textContent = '';

            const response = await fetch('/api/notes', {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify({ url }),
            });
            const body = await response.json();

            if (!body.success) {
                error.textContent = body.error;
                return;
            }

            const thumbnail = document.getElementById('thumbnail');
            thumbnail.src = body.data.thumbnail_url;
            thumbnail.style.display = 'block';

            renderLines(document.getElementById('transcript'),
                'Transcript with Timestamps', body.data.transcript);
            renderLines(document.getElementById('notes'),
                'Detailed Notes', body.data.notes);
        });
    </script>
</body>
</html>
"#;
