use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Validation errors raised before a submission reaches the queue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("Sender ID and name are required")]
    MissingSender,
    #[error("Message text is required")]
    MissingMessageText,
    #[error("attachment path is empty")]
    EmptyAttachmentPath,
}

/// File reference carried alongside a message, resolved to text during processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAttachment {
    pub path: PathBuf,
    /// Type declared by the sender (e.g. `txt`, `pdf`); the resolver falls back to the extension.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declared_type: Option<String>,
}

impl FileAttachment {
    pub fn new(path: impl Into<PathBuf>, declared_type: Option<&str>) -> Self {
        Self {
            path: path.into(),
            declared_type: declared_type
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string),
        }
    }
}

/// One inbound resume-bearing message.
///
/// Fields are public so adapters can hand over raw payloads; [`Submission::new`] is the
/// validating intake path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub sender_id: String,
    pub sender_name: String,
    pub text: Option<String>,
    pub attachment: Option<FileAttachment>,
    pub received_at: DateTime<Local>,
}

impl Submission {
    pub fn new(
        sender_id: impl Into<String>,
        sender_name: impl Into<String>,
        text: impl Into<String>,
        attachment: Option<FileAttachment>,
    ) -> Result<Self, SubmissionError> {
        let sender_id = sender_id.into();
        let sender_name = sender_name.into();
        let text = text.into();

        if sender_id.trim().is_empty() || sender_name.trim().is_empty() {
            return Err(SubmissionError::MissingSender);
        }
        if text.trim().is_empty() {
            return Err(SubmissionError::MissingMessageText);
        }
        if let Some(file) = &attachment {
            if file.path.as_os_str().is_empty() {
                return Err(SubmissionError::EmptyAttachmentPath);
            }
        }

        Ok(Self {
            sender_id,
            sender_name,
            text: Some(text),
            attachment,
            received_at: Local::now(),
        })
    }

    pub fn with_received_at(mut self, received_at: DateTime<Local>) -> Self {
        self.received_at = received_at;
        self
    }

    pub fn has_attachment(&self) -> bool {
        self.attachment.is_some()
    }
}

/// Wire payload accepted by the HTTP intake route.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionRequest {
    pub sender_id: String,
    pub sender_name: String,
    pub message: String,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub received_at: Option<DateTime<Local>>,
}

impl TryFrom<SubmissionRequest> for Submission {
    type Error = SubmissionError;

    fn try_from(request: SubmissionRequest) -> Result<Self, Self::Error> {
        let attachment = request
            .file_path
            .map(|path| FileAttachment::new(path, request.file_type.as_deref()));
        let submission = Submission::new(
            request.sender_id,
            request.sender_name,
            request.message,
            attachment,
        )?;

        Ok(match request.received_at {
            Some(received_at) => submission.with_received_at(received_at),
            None => submission,
        })
    }
}
