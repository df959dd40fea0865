use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::pipeline::extraction::SinkRow;
use crate::pipeline::resolver::{ContentResolver, ResolutionError};
use crate::pipeline::sink::{InMemorySheetSink, RecordSink, SinkError};
use crate::pipeline::submission::{FileAttachment, Submission};
use crate::pipeline::{PipelineOrchestrator, SubmissionQueue};

pub(super) const SOURCE_LABEL: &str = "WhatsApp/File Upload";

pub(super) const JOHN_SMITH_RESUME: &str = "John Smith
Software Engineer
Email: john.smith@email.com
Phone: +91-9876543210

EDUCATION:
B.Tech in Computer Science
IIT Delhi, 2018

SKILLS:
Python, Java, React, Node.js, AWS, Docker

EXPERIENCE:
Senior Developer at Tech Corp (2020-Present)
- Developed web applications using React and Node.js
";

pub(super) fn text_submission(name: &str, text: &str) -> Submission {
    Submission::new(format!("id-{name}"), name, text, None).expect("valid submission")
}

pub(super) fn file_submission(name: &str, path: &str) -> Submission {
    Submission::new(
        format!("id-{name}"),
        name,
        "Hi, here's my resume",
        Some(FileAttachment::new(path, Some("txt"))),
    )
    .expect("valid submission")
}

pub(super) fn blank_submission(name: &str) -> Submission {
    let mut submission = text_submission(name, "placeholder");
    submission.text = None;
    submission
}

pub(super) type MemoryOrchestrator = PipelineOrchestrator<MemoryResolver, InMemorySheetSink>;

pub(super) fn build_orchestrator() -> (MemoryOrchestrator, Arc<InMemorySheetSink>) {
    let sink = Arc::new(InMemorySheetSink::new());
    let orchestrator = PipelineOrchestrator::new(
        Arc::new(SubmissionQueue::new()),
        Arc::new(MemoryResolver::default()),
        sink.clone(),
        SOURCE_LABEL,
    );
    (orchestrator, sink)
}

pub(super) fn orchestrator_with<C, S>(resolver: C, sink: S) -> PipelineOrchestrator<C, S>
where
    C: ContentResolver,
    S: RecordSink,
{
    PipelineOrchestrator::new(
        Arc::new(SubmissionQueue::new()),
        Arc::new(resolver),
        Arc::new(sink),
        SOURCE_LABEL,
    )
}

/// Serves attachment text from a path-keyed map.
#[derive(Default, Clone)]
pub(super) struct MemoryResolver {
    documents: Arc<Mutex<HashMap<PathBuf, String>>>,
}

impl MemoryResolver {
    pub(super) fn with_document(self, path: &str, text: &str) -> Self {
        self.documents
            .lock()
            .expect("resolver mutex poisoned")
            .insert(PathBuf::from(path), text.to_string());
        self
    }
}

impl ContentResolver for MemoryResolver {
    fn resolve(&self, attachment: &FileAttachment) -> Result<String, ResolutionError> {
        self.documents
            .lock()
            .expect("resolver mutex poisoned")
            .get(&attachment.path)
            .cloned()
            .ok_or_else(|| ResolutionError::NotFound(attachment.path.clone()))
    }
}

/// Finds every attachment but cannot read any of them.
pub(super) struct UnreadableResolver;

impl ContentResolver for UnreadableResolver {
    fn resolve(&self, _attachment: &FileAttachment) -> Result<String, ResolutionError> {
        Err(ResolutionError::UnsupportedType(".xyz".to_string()))
    }
}

pub(super) struct PanickingResolver;

impl ContentResolver for PanickingResolver {
    fn resolve(&self, _attachment: &FileAttachment) -> Result<String, ResolutionError> {
        panic!("decoder crashed")
    }
}

pub(super) struct UnavailableSink;

impl RecordSink for UnavailableSink {
    fn initialize(&self, _target_id: &str, _headers: &[&str]) -> Result<(), SinkError> {
        Err(SinkError::Unavailable("sheet offline".to_string()))
    }

    fn append(&self, _row: &SinkRow) -> Result<(), SinkError> {
        Err(SinkError::Unavailable("sheet offline".to_string()))
    }
}

pub(super) struct PanickingSink;

impl RecordSink for PanickingSink {
    fn initialize(&self, _target_id: &str, _headers: &[&str]) -> Result<(), SinkError> {
        Ok(())
    }

    fn append(&self, _row: &SinkRow) -> Result<(), SinkError> {
        panic!("{}", String::from("row buffer overflow"))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
