//! HTTP surface for the upload session
//!
//! | Route           | Purpose                                  |
//! |-----------------|------------------------------------------|
//! | `GET /`         | upload form, status and table preview    |
//! | `POST /upload`  | multipart upload (field `file`)          |
//! | `GET /download` | latest spreadsheet as an attachment      |

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use policy_sheets::ReportConfig;
use tokio::sync::Mutex;

use crate::page;
use crate::session::{Session, SessionState};

/// Session shared by all handlers; held for a whole conversion
pub type SharedSession = Arc<Mutex<Session>>;

/// Multipart field carrying the JSON export
pub const UPLOAD_FIELD: &str = "file";

/// Server settings
#[derive(Debug, Clone)]
pub struct ServeOptions {
    pub bind: SocketAddr,
    /// Largest accepted request body, in bytes
    pub max_upload_bytes: usize,
}

impl Default for ServeOptions {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8501)),
            max_upload_bytes: 64 * 1024 * 1024,
        }
    }
}

/// Build the router over a fresh session
pub fn router(config: ReportConfig, max_upload_bytes: usize) -> Router {
    let session: SharedSession = Arc::new(Mutex::new(Session::new(config)));

    Router::new()
        .route("/", get(index))
        .route("/upload", post(upload))
        .route("/download", get(download))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(session)
}

/// Serve until Ctrl-C
pub async fn serve(config: ReportConfig, options: ServeOptions) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(options.bind)
        .await
        .with_context(|| format!("Failed to bind {}", options.bind))?;
    let addr = listener.local_addr().context("Failed to read bound address")?;
    tracing::info!(%addr, "serving policy report session");

    axum::serve(listener, router(config, options.max_upload_bytes))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

async fn index(State(session): State<SharedSession>) -> Html<String> {
    let session = session.lock().await;
    Html(page::render(&session))
}

async fn upload(State(session): State<SharedSession>, mut multipart: Multipart) -> Response {
    let payload = match read_upload(&mut multipart).await {
        Ok(payload) => payload,
        Err(message) => {
            tracing::warn!(error = %message, "bad upload request");
            return (StatusCode::BAD_REQUEST, message).into_response();
        }
    };

    // One conversion at a time; the lock is held until the page is rendered
    let mut session = session.lock().await;
    let status = match session.handle_upload(&payload) {
        SessionState::Failed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::OK,
    };
    (status, Html(page::render(&session))).into_response()
}

async fn read_upload(multipart: &mut Multipart) -> Result<Vec<u8>, String> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Invalid multipart body: {}", e))?
    {
        if field.name() == Some(UPLOAD_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| format!("Failed to read upload: {}", e))?;
            return Ok(bytes.to_vec());
        }
    }
    Err(format!("Missing multipart field '{}'", UPLOAD_FIELD))
}

async fn download(State(session): State<SharedSession>) -> Response {
    let session = session.lock().await;
    let Some(artifact) = session.artifact() else {
        return (StatusCode::NOT_FOUND, "No report has been generated yet").into_response();
    };

    let disposition = format!(
        "attachment; filename=\"{}\"",
        artifact.file_name().replace('"', "")
    );
    (
        [
            (header::CONTENT_TYPE, artifact.mime_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes().to_vec(),
    )
        .into_response()
}
