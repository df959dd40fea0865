use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::error;

use super::orchestrator::PipelineOrchestrator;
use super::resolver::ContentResolver;
use super::sink::RecordSink;
use super::submission::{Submission, SubmissionRequest};
use crate::error::AppError;

type SharedOrchestrator<C, S> = Arc<PipelineOrchestrator<C, S>>;

/// Router exposing submission intake, queue inspection, and batch processing.
pub fn intake_router<C, S>(orchestrator: SharedOrchestrator<C, S>) -> Router
where
    C: ContentResolver + 'static,
    S: RecordSink + 'static,
{
    Router::new()
        .route("/api/v1/submissions", post(submit_handler::<C, S>))
        .route("/api/v1/submissions/pending", get(pending_handler::<C, S>))
        .route("/api/v1/submissions/process", post(process_handler::<C, S>))
        .route("/api/v1/summary", get(summary_handler::<C, S>))
        .route("/api/v1/candidates", get(candidates_handler::<C, S>))
        .with_state(orchestrator)
}

pub(crate) async fn submit_handler<C, S>(
    State(orchestrator): State<SharedOrchestrator<C, S>>,
    Json(request): Json<SubmissionRequest>,
) -> Result<Response, AppError>
where
    C: ContentResolver + 'static,
    S: RecordSink + 'static,
{
    let submission = Submission::try_from(request)?;
    orchestrator.receive(submission);

    let payload = json!({
        "status": "queued",
        "queue": orchestrator.queue().stats(),
    });
    Ok((StatusCode::ACCEPTED, Json(payload)).into_response())
}

pub(crate) async fn pending_handler<C, S>(
    State(orchestrator): State<SharedOrchestrator<C, S>>,
) -> Response
where
    C: ContentResolver + 'static,
    S: RecordSink + 'static,
{
    Json(orchestrator.pending()).into_response()
}

/// Drains the queue on the blocking pool; resolvers and sinks do synchronous I/O.
pub(crate) async fn process_handler<C, S>(
    State(orchestrator): State<SharedOrchestrator<C, S>>,
) -> Response
where
    C: ContentResolver + 'static,
    S: RecordSink + 'static,
{
    let worker = Arc::clone(&orchestrator);
    match tokio::task::spawn_blocking(move || worker.drain_queue()).await {
        Ok(results) => {
            let payload = json!({
                "processed": results.len(),
                "results": results,
                "summary": orchestrator.summary(),
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(join_error) => {
            error!(error = %join_error, "queue drain did not complete");
            let payload = json!({
                "error": "queue processing did not complete",
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn summary_handler<C, S>(
    State(orchestrator): State<SharedOrchestrator<C, S>>,
) -> Response
where
    C: ContentResolver + 'static,
    S: RecordSink + 'static,
{
    Json(orchestrator.summary()).into_response()
}

pub(crate) async fn candidates_handler<C, S>(
    State(orchestrator): State<SharedOrchestrator<C, S>>,
) -> Response
where
    C: ContentResolver + 'static,
    S: RecordSink + 'static,
{
    Json(orchestrator.candidates()).into_response()
}
