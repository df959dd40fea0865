//! Resume intake pipeline.
//!
//! Submissions land in a [`pipeline::SubmissionQueue`], are drained by the
//! [`pipeline::PipelineOrchestrator`], resolved to plain text, run through the rule-based
//! extraction engine, and delivered to an injected [`pipeline::RecordSink`].

pub mod config;
pub mod error;
pub mod pipeline;
pub mod telemetry;
