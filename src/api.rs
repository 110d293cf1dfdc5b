//! HTTP surface: routing, request logging, and the render pipeline.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tracing::info;

use crate::error::ApiError;
use crate::redact::redact_args;
use crate::renderer::Renderer;
use crate::request::RenderJob;
use crate::stream::body_stream;

/// Trailing argument telling the renderer to write the PDF to stdout.
const STDOUT_ARG: &str = "-";

/// Build the application router around a renderer implementation.
pub fn app(renderer: Arc<dyn Renderer>) -> Router {
    Router::new()
        .route("/status", get(status))
        .route("/", post(render))
        .route("/pdf", post(render))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        // Upload size is the transport's concern, not this layer's.
        .layer(DefaultBodyLimit::disable())
        .with_state(renderer)
}

/// Liveness probe; deliberately absent from the request log.
async fn status() -> StatusCode {
    StatusCode::OK
}

/// Decode the upload, start the renderer, and stream its stdout back.
async fn render(
    State(renderer): State<Arc<dyn Renderer>>,
    method: Method,
    uri: Uri,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    info!("{method} {}", uri.path());

    let job = RenderJob::decode(multipart?).await?;
    let (mut args, doc_output, workspace) = job.into_parts();

    // Documentation options make the renderer print text on its own; a PDF
    // render needs the explicit write-to-stdout trailing argument.
    let content_type = if doc_output {
        "text/plain"
    } else {
        args.push(STDOUT_ARG.to_string());
        "application/pdf"
    };

    let redacted = redact_args(&args);
    info!(args = ?redacted, "starting");

    let process = renderer.spawn(&args).map_err(ApiError::Spawn)?;

    // Committing to 200 here is the point of no return: bytes start flowing
    // before the renderer's outcome is known and cannot be un-sent. Later
    // failures sever the connection instead (see stream::body_stream).
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type)],
        Body::from_stream(body_stream(process, workspace, redacted)),
    )
        .into_response())
}

async fn not_found(method: Method, uri: Uri) -> ApiError {
    info!("{method} {}", uri.path());
    ApiError::PathNotFound(uri.path().to_string())
}

async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    info!("{method} {}", uri.path());
    ApiError::MethodNotAllowed(method.to_string())
}
