use cv_intake::config::{IntakeConfig, SinkKind};
use cv_intake::pipeline::{
    CsvRecordSink, FileContentResolver, InMemorySheetSink, PipelineOrchestrator, RecordSink,
    SinkError, SinkRow, SubmissionQueue,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub(crate) type IntakeOrchestrator = PipelineOrchestrator<FileContentResolver, ConfiguredSink>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Sink strategy selected by `INTAKE_SINK`.
#[derive(Debug)]
pub(crate) enum ConfiguredSink {
    Memory(InMemorySheetSink),
    Csv(CsvRecordSink),
}

impl ConfiguredSink {
    pub(crate) fn from_config(config: &IntakeConfig) -> Self {
        match config.sink {
            SinkKind::Memory => ConfiguredSink::Memory(InMemorySheetSink::new()),
            SinkKind::Csv => ConfiguredSink::Csv(CsvRecordSink::new(&config.sink_path)),
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            ConfiguredSink::Memory(_) => "in-memory demo sheet".to_string(),
            ConfiguredSink::Csv(sink) => format!("csv file {}", sink.path().display()),
        }
    }
}

impl RecordSink for ConfiguredSink {
    fn initialize(&self, target_id: &str, headers: &[&str]) -> Result<(), SinkError> {
        match self {
            ConfiguredSink::Memory(sink) => sink.initialize(target_id, headers),
            ConfiguredSink::Csv(sink) => sink.initialize(target_id, headers),
        }
    }

    fn append(&self, row: &SinkRow) -> Result<(), SinkError> {
        match self {
            ConfiguredSink::Memory(sink) => sink.append(row),
            ConfiguredSink::Csv(sink) => sink.append(row),
        }
    }
}

pub(crate) fn build_orchestrator(config: &IntakeConfig) -> IntakeOrchestrator {
    PipelineOrchestrator::new(
        Arc::new(SubmissionQueue::new()),
        Arc::new(FileContentResolver::new(config.max_file_bytes)),
        Arc::new(ConfiguredSink::from_config(config)),
        config.source_label.clone(),
    )
}

/// Shorten long field values for terminal output.
pub(crate) fn preview(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        return value.to_string();
    }
    let head: String = value.chars().take(limit).collect();
    format!("{head}...")
}
