use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use mime::Mime;
use tracing::debug;

use super::submission::FileAttachment;
use crate::config::DEFAULT_MAX_FILE_BYTES;

mod decode;

const MSWORD: &str = "application/msword";
const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Turns an attached file reference into plain text.
pub trait ContentResolver: Send + Sync {
    fn resolve(&self, attachment: &FileAttachment) -> Result<String, ResolutionError>;
}

/// Error raised when attachment content cannot be obtained.
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("Could not extract text from {kind} file: {reason}")]
    Decode { kind: DocumentKind, reason: String },
    #[error("file is {size} bytes, above the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },
    #[error("Could not extract text from file")]
    EmptyDocument,
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Document families the intake channel accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    PlainText,
    Pdf,
    WordProcessing,
}

impl DocumentKind {
    pub fn from_mime(mime: &Mime) -> Option<Self> {
        if *mime == mime::TEXT_PLAIN {
            return Some(Self::PlainText);
        }
        if *mime == mime::APPLICATION_PDF {
            return Some(Self::Pdf);
        }
        match mime.essence_str() {
            MSWORD | DOCX => Some(Self::WordProcessing),
            _ => None,
        }
    }

    /// Classify by the path extension, then by the sender-declared type.
    pub fn detect(attachment: &FileAttachment) -> Option<Self> {
        mime_guess::from_path(&attachment.path)
            .iter()
            .find_map(|mime| Self::from_mime(&mime))
            .or_else(|| {
                attachment
                    .declared_type
                    .as_deref()
                    .and_then(Self::from_declared)
            })
    }

    fn from_declared(declared: &str) -> Option<Self> {
        let declared = declared.trim();
        if declared.contains('/') {
            return declared
                .parse::<Mime>()
                .ok()
                .and_then(|mime| Self::from_mime(&mime));
        }

        mime_guess::from_ext(declared.trim_start_matches('.'))
            .iter()
            .find_map(|mime| Self::from_mime(&mime))
    }

    pub fn label(self) -> &'static str {
        match self {
            DocumentKind::PlainText => "plain text",
            DocumentKind::Pdf => "PDF",
            DocumentKind::WordProcessing => "Word",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reads attachments from the local filesystem and decodes them to plain text.
///
/// Plain text must be UTF-8. PDF text comes from `pdf-extract`; Word documents are read as
/// OOXML archives, so legacy binary `.doc` files fail to decode.
#[derive(Debug, Clone)]
pub struct FileContentResolver {
    max_file_bytes: u64,
}

impl FileContentResolver {
    pub fn new(max_file_bytes: u64) -> Self {
        Self { max_file_bytes }
    }

    pub fn max_file_bytes(&self) -> u64 {
        self.max_file_bytes
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, ResolutionError> {
        let io_error = |source| ResolutionError::Io {
            path: path.to_path_buf(),
            source,
        };

        let size = fs::metadata(path).map_err(io_error)?.len();
        if size > self.max_file_bytes {
            return Err(ResolutionError::TooLarge {
                size,
                limit: self.max_file_bytes,
            });
        }

        fs::read(path).map_err(io_error)
    }
}

impl Default for FileContentResolver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FILE_BYTES)
    }
}

impl ContentResolver for FileContentResolver {
    fn resolve(&self, attachment: &FileAttachment) -> Result<String, ResolutionError> {
        let path = attachment.path.as_path();
        if !path.is_file() {
            return Err(ResolutionError::NotFound(path.to_path_buf()));
        }

        let kind = DocumentKind::detect(attachment).ok_or_else(|| {
            let extension = path
                .extension()
                .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
                .unwrap_or_else(|| "(none)".to_string());
            ResolutionError::UnsupportedType(extension)
        })?;
        debug!(path = %path.display(), %kind, "resolving attachment");

        let bytes = self.read_bytes(path)?;
        let text = match kind {
            DocumentKind::PlainText => {
                String::from_utf8(bytes).map_err(|err| ResolutionError::Decode {
                    kind,
                    reason: err.to_string(),
                })?
            }
            DocumentKind::Pdf => decode::pdf_text(&bytes)?,
            DocumentKind::WordProcessing => decode::word_text(&bytes)?,
        };

        if text.trim().is_empty() {
            return Err(ResolutionError::EmptyDocument);
        }
        Ok(text)
    }
}
