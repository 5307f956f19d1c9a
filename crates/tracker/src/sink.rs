use std::sync::{Arc, Mutex};

use crate::models::RunSummary;

/// Receives each completed run when a session stops.
///
/// The session does not wait for or inspect the outcome; implementations own
/// retries and error reporting.
pub trait RunSink: Send {
    fn persist_run(&self, summary: RunSummary);
}

/// Keeps completed runs in memory. Clones share the same list.
#[derive(Debug, Clone, Default)]
pub struct MemoryRunSink {
    runs: Arc<Mutex<Vec<RunSummary>>>,
}

impl MemoryRunSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn runs(&self) -> Vec<RunSummary> {
        self.runs.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn last(&self) -> Option<RunSummary> {
        self.runs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.runs.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RunSink for MemoryRunSink {
    fn persist_run(&self, summary: RunSummary) {
        self.runs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(summary);
    }
}
