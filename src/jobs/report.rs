use std::path::{Path, PathBuf};

use crate::foundation::error::ConfartError;

/// An input that was replaced by a placeholder (or skipped).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemFailure {
    pub input: PathBuf,
    pub reason: String,
    /// The input did not exist, as opposed to failing to decode.
    pub missing: bool,
}

/// Outcome of a batch job: files written plus per-input success accounting.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub outputs: Vec<PathBuf>,
    pub total: usize,
    pub succeeded: usize,
    pub failures: Vec<ItemFailure>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self) {
        self.total += 1;
        self.succeeded += 1;
    }

    pub fn record_failure(&mut self, input: &Path, err: &ConfartError) {
        self.total += 1;
        self.failures.push(ItemFailure {
            input: input.to_path_buf(),
            reason: err.to_string(),
            missing: matches!(err, ConfartError::MissingInput(_)),
        });
    }

    pub fn record_output(&mut self, path: PathBuf) {
        self.outputs.push(path);
    }

    /// Every input made it through.
    pub fn is_complete(&self) -> bool {
        self.succeeded == self.total
    }

    /// `succeeded/total`.
    pub fn ratio(&self) -> String {
        format!("{}/{}", self.succeeded, self.total)
    }

    /// Fold another report (e.g. one page) into this one.
    pub fn merge(&mut self, other: BatchReport) {
        self.outputs.extend(other.outputs);
        self.total += other.total;
        self.succeeded += other.succeeded;
        self.failures.extend(other.failures);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/jobs/report.rs"]
mod tests;
