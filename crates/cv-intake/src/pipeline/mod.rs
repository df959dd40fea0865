//! Submission intake, content resolution, field extraction, and sink delivery.

pub mod extraction;
pub mod orchestrator;
pub mod queue;
pub mod resolver;
pub mod router;
pub mod sink;
pub mod submission;

#[cfg(test)]
mod tests;

pub use extraction::{
    format_for_sink, parse, CandidateField, CandidateRecord, FieldExtractionEngine, SinkRow,
    NOT_SPECIFIED,
};
pub use orchestrator::{
    ExportDocument, ExportError, PipelineOrchestrator, PipelineStage, ProcessingResult,
    ProcessingStatus, ProcessingSummary,
};
pub use queue::{QueueStats, SubmissionQueue};
pub use resolver::{ContentResolver, DocumentKind, FileContentResolver, ResolutionError};
pub use router::intake_router;
pub use sink::{CsvRecordSink, InMemorySheetSink, RecordSink, SinkError, SHEET_HEADERS};
pub use submission::{FileAttachment, Submission, SubmissionError, SubmissionRequest};
