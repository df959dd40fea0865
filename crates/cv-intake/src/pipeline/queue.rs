use std::collections::VecDeque;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::submission::Submission;

/// FIFO holding area for submissions awaiting processing.
///
/// `dequeue` is a check-then-act operation, so the whole state sits behind one mutex and
/// multiple consumers may share a queue through an `Arc`.
#[derive(Debug, Default)]
pub struct SubmissionQueue {
    state: Mutex<QueueState>,
}

#[derive(Debug, Default)]
struct QueueState {
    pending: VecDeque<Submission>,
    processed: usize,
}

/// Snapshot of queue counters. `pending + processed == total` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStats {
    #[serde(rename = "pending_messages")]
    pub pending: usize,
    #[serde(rename = "processed_messages")]
    pub processed: usize,
    #[serde(rename = "total_messages")]
    pub total: usize,
}

impl SubmissionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&self, submission: Submission) {
        info!(
            sender = %submission.sender_name,
            attachment = submission.has_attachment(),
            "submission received"
        );
        let mut state = self.state.lock().expect("queue mutex poisoned");
        state.pending.push_back(submission);
    }

    /// Remove the head submission; `None` means the queue is drained.
    pub fn dequeue(&self) -> Option<Submission> {
        let mut state = self.state.lock().expect("queue mutex poisoned");
        let submission = state.pending.pop_front()?;
        state.processed += 1;
        Some(submission)
    }

    pub fn peek_all(&self) -> Vec<Submission> {
        let state = self.state.lock().expect("queue mutex poisoned");
        state.pending.iter().cloned().collect()
    }

    /// Drop every pending submission, returning how many were discarded.
    pub fn clear(&self) -> usize {
        let mut state = self.state.lock().expect("queue mutex poisoned");
        let discarded = state.pending.len();
        state.pending.clear();
        discarded
    }

    pub fn stats(&self) -> QueueStats {
        let state = self.state.lock().expect("queue mutex poisoned");
        QueueStats {
            pending: state.pending.len(),
            processed: state.processed,
            total: state.pending.len() + state.processed,
        }
    }

    pub fn len(&self) -> usize {
        self.state.lock().expect("queue mutex poisoned").pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
