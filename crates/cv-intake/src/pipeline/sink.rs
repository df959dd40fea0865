use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, info};

use super::extraction::SinkRow;

/// Column headers seeded into a fresh sink target.
pub const SHEET_HEADERS: [&str; 8] = [
    "Timestamp",
    "Full Name",
    "Email",
    "Phone Number",
    "Education",
    "Skills",
    "Experience",
    "Source",
];

/// Structured storage receiving one row per extracted candidate.
///
/// The orchestrator never retries; a failed call is recorded once.
pub trait RecordSink: Send + Sync {
    fn initialize(&self, target_id: &str, headers: &[&str]) -> Result<(), SinkError>;
    fn append(&self, row: &SinkRow) -> Result<(), SinkError>;
}

/// Error enumeration for sink failures.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("header row must have {expected} columns, found {found}")]
    HeaderMismatch { expected: usize, found: usize },
    #[error("sink rejected row: {0}")]
    Rejected(String),
    #[error("sink unavailable: {0}")]
    Unavailable(String),
    #[error("sink io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("sink csv failure: {0}")]
    Csv(#[from] csv::Error),
}

fn check_headers(headers: &[&str]) -> Result<(), SinkError> {
    if headers.len() == SHEET_HEADERS.len() {
        Ok(())
    } else {
        Err(SinkError::HeaderMismatch {
            expected: SHEET_HEADERS.len(),
            found: headers.len(),
        })
    }
}

/// Sheet kept in memory; the default strategy when no durable target is configured.
#[derive(Debug, Default)]
pub struct InMemorySheetSink {
    sheet: Mutex<SheetState>,
}

#[derive(Debug, Default)]
struct SheetState {
    target_id: Option<String>,
    headers: Option<Vec<String>>,
    rows: Vec<SinkRow>,
}

impl InMemorySheetSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target_id(&self) -> Option<String> {
        self.sheet
            .lock()
            .expect("sheet mutex poisoned")
            .target_id
            .clone()
    }

    pub fn headers(&self) -> Option<Vec<String>> {
        self.sheet
            .lock()
            .expect("sheet mutex poisoned")
            .headers
            .clone()
    }

    pub fn rows(&self) -> Vec<SinkRow> {
        self.sheet.lock().expect("sheet mutex poisoned").rows.clone()
    }

    /// Rows keyed by header, falling back to the standard headers when never initialized.
    pub fn export_records(&self) -> Vec<BTreeMap<String, String>> {
        let sheet = self.sheet.lock().expect("sheet mutex poisoned");
        let headers: Vec<String> = match &sheet.headers {
            Some(headers) => headers.clone(),
            None => SHEET_HEADERS.iter().map(|header| header.to_string()).collect(),
        };

        sheet
            .rows
            .iter()
            .map(|row| {
                headers
                    .iter()
                    .enumerate()
                    .map(|(index, header)| {
                        let value = row.values().get(index).cloned().unwrap_or_default();
                        (header.clone(), value)
                    })
                    .collect()
            })
            .collect()
    }
}

impl RecordSink for InMemorySheetSink {
    fn initialize(&self, target_id: &str, headers: &[&str]) -> Result<(), SinkError> {
        check_headers(headers)?;
        let mut sheet = self.sheet.lock().expect("sheet mutex poisoned");
        sheet.target_id = Some(target_id.to_string());
        sheet.headers = Some(headers.iter().map(|header| header.to_string()).collect());
        sheet.rows.clear();
        info!(target_id, "in-memory sheet initialized");
        Ok(())
    }

    fn append(&self, row: &SinkRow) -> Result<(), SinkError> {
        let mut sheet = self.sheet.lock().expect("sheet mutex poisoned");
        sheet.rows.push(row.clone());
        debug!(rows = sheet.rows.len(), "row appended to in-memory sheet");
        Ok(())
    }
}

/// Appends rows to a CSV file; `initialize` truncates it and writes the header row.
#[derive(Debug)]
pub struct CsvRecordSink {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvRecordSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for CsvRecordSink {
    fn initialize(&self, target_id: &str, headers: &[&str]) -> Result<(), SinkError> {
        check_headers(headers)?;
        let _guard = self.write_lock.lock().expect("csv sink mutex poisoned");
        let mut writer = csv::Writer::from_writer(File::create(&self.path)?);
        writer.write_record(headers)?;
        writer.flush()?;
        info!(target_id, path = %self.path.display(), "csv sink initialized");
        Ok(())
    }

    fn append(&self, row: &SinkRow) -> Result<(), SinkError> {
        let _guard = self.write_lock.lock().expect("csv sink mutex poisoned");
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.write_record(row.values())?;
        writer.flush()?;
        debug!(path = %self.path.display(), "row appended to csv sink");
        Ok(())
    }
}
