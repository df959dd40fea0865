use std::any::Any;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::extraction::{format_for_sink, CandidateRecord, FieldExtractionEngine};
use super::queue::{QueueStats, SubmissionQueue};
use super::resolver::{ContentResolver, ResolutionError};
use super::sink::{RecordSink, SinkError, SHEET_HEADERS};
use super::submission::Submission;

/// Status of a submission; everything except `Processing` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStatus {
    Processing,
    Success,
    PartialSuccess,
    Failed,
}

impl ProcessingStatus {
    pub fn label(self) -> &'static str {
        match self {
            ProcessingStatus::Processing => "processing",
            ProcessingStatus::Success => "success",
            ProcessingStatus::PartialSuccess => "partial_success",
            ProcessingStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, ProcessingStatus::Processing)
    }
}

/// Last pipeline stage a submission reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Received,
    ContentResolved,
    Extracted,
    SinkAttempted,
}

/// Outcome of driving one submission through the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingResult {
    pub status: ProcessingStatus,
    pub stage: PipelineStage,
    pub sender: String,
    pub timestamp: DateTime<Local>,
    #[serde(rename = "message_content")]
    pub content: Option<String>,
    #[serde(rename = "extracted_data")]
    pub extracted: Option<CandidateRecord>,
    #[serde(rename = "sheet_upload")]
    pub sink_delivered: bool,
    pub errors: Vec<String>,
}

impl ProcessingResult {
    fn received(sender: &str) -> Self {
        Self {
            status: ProcessingStatus::Processing,
            stage: PipelineStage::Received,
            sender: sender.to_string(),
            timestamp: Local::now(),
            content: None,
            extracted: None,
            sink_delivered: false,
            errors: Vec::new(),
        }
    }

    fn fail(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.status = ProcessingStatus::Failed;
    }
}

/// Aggregate counts across everything processed so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingSummary {
    pub total_processed: usize,
    pub successful: usize,
    pub partial_success: usize,
    pub failed: usize,
    pub candidates_extracted: usize,
    pub queue_stats: QueueStats,
}

/// Document written by [`PipelineOrchestrator::export`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub summary: ProcessingSummary,
    pub candidates: Vec<CandidateRecord>,
    pub processing_log: Vec<ProcessingResult>,
}

/// Error raised when the export document cannot be written.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize export: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Default)]
struct Ledger {
    candidates: Vec<CandidateRecord>,
    log: Vec<ProcessingResult>,
}

/// Drains the submission queue through content resolution, extraction, and sink delivery.
///
/// Per-submission faults never escape [`Self::process_one`]; they are captured as error
/// messages and a terminal status on the returned [`ProcessingResult`].
pub struct PipelineOrchestrator<C, S> {
    queue: Arc<SubmissionQueue>,
    resolver: Arc<C>,
    sink: Arc<S>,
    engine: FieldExtractionEngine,
    source_label: String,
    ledger: Mutex<Ledger>,
}

impl<C, S> PipelineOrchestrator<C, S>
where
    C: ContentResolver,
    S: RecordSink,
{
    pub fn new(
        queue: Arc<SubmissionQueue>,
        resolver: Arc<C>,
        sink: Arc<S>,
        source_label: impl Into<String>,
    ) -> Self {
        Self {
            queue,
            resolver,
            sink,
            engine: FieldExtractionEngine::new(),
            source_label: source_label.into(),
            ledger: Mutex::new(Ledger::default()),
        }
    }

    pub fn queue(&self) -> &Arc<SubmissionQueue> {
        &self.queue
    }

    pub fn sink(&self) -> &Arc<S> {
        &self.sink
    }

    pub fn receive(&self, submission: Submission) {
        self.queue.enqueue(submission);
    }

    pub fn pending(&self) -> Vec<Submission> {
        self.queue.peek_all()
    }

    /// Seed the sink target with the standard header row.
    pub fn initialize_sink(&self, target_id: &str) -> Result<(), SinkError> {
        self.sink.initialize(target_id, &SHEET_HEADERS)
    }

    pub fn process_one(&self, submission: Submission) -> ProcessingResult {
        info!(sender = %submission.sender_name, "processing submission");
        let mut result = ProcessingResult::received(&submission.sender_name);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.run_stages(&submission, &mut result)
        }));
        if let Err(payload) = outcome {
            let message = panic_message(&*payload);
            warn!(sender = %result.sender, %message, "submission aborted");
            result.fail(format!("Unexpected failure: {message}"));
        }

        info!(
            sender = %result.sender,
            status = result.status.label(),
            errors = result.errors.len(),
            "submission finished"
        );
        self.lock_ledger().log.push(result.clone());
        result
    }

    /// Process until the queue is empty, returning results in dequeue order.
    pub fn drain_queue(&self) -> Vec<ProcessingResult> {
        std::iter::from_fn(|| self.queue.dequeue())
            .map(|submission| self.process_one(submission))
            .collect()
    }

    pub fn summary(&self) -> ProcessingSummary {
        let ledger = self.lock_ledger();
        let count = |status: ProcessingStatus| {
            ledger
                .log
                .iter()
                .filter(|result| result.status == status)
                .count()
        };

        ProcessingSummary {
            total_processed: ledger.log.len(),
            successful: count(ProcessingStatus::Success),
            partial_success: count(ProcessingStatus::PartialSuccess),
            failed: count(ProcessingStatus::Failed),
            candidates_extracted: ledger.candidates.len(),
            queue_stats: self.queue.stats(),
        }
    }

    pub fn candidates(&self) -> Vec<CandidateRecord> {
        self.lock_ledger().candidates.clone()
    }

    pub fn processing_log(&self) -> Vec<ProcessingResult> {
        self.lock_ledger().log.clone()
    }

    pub fn export_document(&self) -> ExportDocument {
        let summary = self.summary();
        let ledger = self.lock_ledger();
        ExportDocument {
            summary,
            candidates: ledger.candidates.clone(),
            processing_log: ledger.log.clone(),
        }
    }

    /// Write the export document as pretty-printed JSON.
    pub fn export_to_writer<W: Write>(&self, writer: W) -> Result<(), ExportError> {
        serde_json::to_writer_pretty(writer, &self.export_document())?;
        Ok(())
    }

    pub fn export(&self, destination: impl AsRef<Path>) -> Result<(), ExportError> {
        let path = destination.as_ref();
        let io_error = |source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        };

        let written = File::create(path).map_err(io_error).and_then(|file| {
            let mut writer = BufWriter::new(file);
            self.export_to_writer(&mut writer)?;
            writer.flush().map_err(io_error)
        });

        match &written {
            Ok(()) => info!(path = %path.display(), "results exported"),
            Err(err) => warn!(path = %path.display(), error = %err, "export failed"),
        }
        written
    }

    fn run_stages(&self, submission: &Submission, result: &mut ProcessingResult) {
        // A missing attachment falls back to the message text; any other resolution
        // failure leaves the submission without content.
        let content = match &submission.attachment {
            Some(attachment) => match self.resolver.resolve(attachment) {
                Ok(text) => Some(text),
                Err(ResolutionError::NotFound(path)) => {
                    debug!(
                        sender = %submission.sender_name,
                        path = %path.display(),
                        "attachment missing, using message text"
                    );
                    submission.text.clone()
                }
                Err(err) => {
                    warn!(
                        sender = %submission.sender_name,
                        path = %attachment.path.display(),
                        error = %err,
                        "attachment could not be resolved"
                    );
                    result.errors.push(format!("File processing failed: {err}"));
                    None
                }
            },
            None => submission.text.clone(),
        };
        result.content = content;
        result.stage = PipelineStage::ContentResolved;

        let Some(content) = result.content.as_deref().filter(|text| !text.is_empty()) else {
            result.fail("No content found to process");
            return;
        };

        let record = self.engine.parse(content);
        self.lock_ledger().candidates.push(record.clone());
        result.stage = PipelineStage::Extracted;

        let row = format_for_sink(&record, &self.source_label);
        result.extracted = Some(record);
        result.stage = PipelineStage::SinkAttempted;

        match self.sink.append(&row) {
            Ok(()) => {
                result.sink_delivered = true;
                result.status = ProcessingStatus::Success;
            }
            Err(err) => {
                warn!(sender = %submission.sender_name, error = %err, "sink delivery failed");
                result.errors.push(format!("Failed to upload to sink: {err}"));
                result.status = ProcessingStatus::PartialSuccess;
            }
        }
    }

    fn lock_ledger(&self) -> std::sync::MutexGuard<'_, Ledger> {
        self.ledger.lock().expect("ledger mutex poisoned")
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
