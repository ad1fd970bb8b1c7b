//! Directory batch processing.
//!
//! Every matching file in the input directory gets exactly one JSON file in
//! the output directory, named after the input with a `.json` extension.
//! Documents that fail to parse get the error record; a document never stops
//! the batch.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rayon::prelude::*;

use crate::error::Result;
use crate::model::OutlineResult;
use crate::outline::OutlineOptions;
use crate::render::{write_json, JsonFormat};
use crate::Outliner;

/// Default directory scanned for input documents.
pub const DEFAULT_INPUT_DIR: &str = "/app/input";

/// Default directory receiving result files.
pub const DEFAULT_OUTPUT_DIR: &str = "/app/output";

/// Options for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Directory scanned (non-recursively) for documents
    pub input_dir: PathBuf,

    /// Directory receiving one `.json` file per document
    pub output_dir: PathBuf,

    /// File extension selecting input documents, matched case-insensitively
    pub extension: String,

    /// Whether to process documents in parallel
    pub parallel: bool,

    /// Result file format
    pub format: JsonFormat,

    /// Per-document extraction options
    pub outline: OutlineOptions,
}

impl BatchOptions {
    /// Create options for the given directories.
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Set the input file extension.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Process documents one at a time.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the result file format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Set per-document extraction options.
    pub fn with_outline_options(mut self, options: OutlineOptions) -> Self {
        self.outline = options;
        self
    }

    /// Result file path for an input document.
    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        let stem = input.file_stem().unwrap_or(input.as_os_str());
        let mut name = stem.to_os_string();
        name.push(".json");
        self.output_dir.join(name)
    }

    fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(&self.extension))
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            extension: "pdf".to_string(),
            parallel: true,
            format: JsonFormat::Pretty,
            outline: OutlineOptions::default(),
        }
    }
}

/// Outcome for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentStatus {
    /// Outline extracted and written
    Extracted {
        /// Number of outline entries
        entries: usize,
    },
    /// The document could not be read; the error record was written
    Failed {
        /// Cause of the failure
        reason: String,
    },
    /// The result file could not be written
    WriteFailed {
        /// Cause of the failure
        reason: String,
    },
}

/// Report for one processed document.
#[derive(Debug, Clone)]
pub struct DocumentReport {
    /// Input document
    pub input: PathBuf,
    /// Result file
    pub output: PathBuf,
    /// Outcome
    pub status: DocumentStatus,
}

impl DocumentReport {
    /// Check if the outline was extracted and written.
    pub fn is_success(&self) -> bool {
        matches!(self.status, DocumentStatus::Extracted { .. })
    }
}

/// Report for a whole batch run.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// When the run finished
    pub finished_at: DateTime<Utc>,
    /// Per-document reports in input order
    pub documents: Vec<DocumentReport>,
}

impl BatchReport {
    /// Number of documents attempted.
    pub fn total(&self) -> usize {
        self.documents.len()
    }

    /// Number of documents whose outline was extracted.
    pub fn succeeded(&self) -> usize {
        self.documents.iter().filter(|d| d.is_success()).count()
    }

    /// Number of documents that failed to read or write.
    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    /// Wall-clock duration of the run.
    pub fn elapsed(&self) -> Duration {
        (self.finished_at - self.started_at)
            .to_std()
            .unwrap_or_default()
    }
}

/// Processes a directory of documents.
pub struct BatchDriver {
    options: BatchOptions,
    outliner: Outliner,
}

impl BatchDriver {
    /// Create a driver.
    pub fn new(options: BatchOptions) -> Self {
        let outliner = Outliner::with_options(&options.outline);
        Self { options, outliner }
    }

    /// Replace the outliner used for each document.
    pub fn with_outliner(mut self, outliner: Outliner) -> Self {
        self.outliner = outliner;
        self
    }

    /// Batch options.
    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// List input documents, sorted by file name.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.options.input_dir)? {
            let path = entry?.path();
            if path.is_file() && self.options.matches(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Run the batch.
    pub fn run(&self) -> Result<BatchReport> {
        self.run_with(|_| {})
    }

    /// Run the batch, calling `on_document` after each document.
    ///
    /// Errors are returned only for batch-level problems: the output
    /// directory can't be created or the input directory can't be listed.
    pub fn run_with<F>(&self, on_document: F) -> Result<BatchReport>
    where
        F: Fn(&DocumentReport) + Sync,
    {
        let started_at = Utc::now();
        fs::create_dir_all(&self.options.output_dir)?;
        let files = self.discover()?;

        log::debug!(
            "{} documents in {}",
            files.len(),
            self.options.input_dir.display()
        );

        let process = |path: &PathBuf| {
            let report = self.process_document(path);
            on_document(&report);
            report
        };

        let documents: Vec<DocumentReport> = if self.options.parallel {
            files.par_iter().map(process).collect()
        } else {
            files.iter().map(process).collect()
        };

        Ok(BatchReport {
            started_at,
            finished_at: Utc::now(),
            documents,
        })
    }

    /// Extract and write the outline of one document.
    pub fn process_document(&self, input: &Path) -> DocumentReport {
        let output = self.options.output_path_for(input);

        let (result, mut status) = match self.outliner.try_extract(input) {
            Ok(result) => {
                let entries = result.len();
                (result, DocumentStatus::Extracted { entries })
            }
            Err(e) => {
                log::error!("Failed to process {}: {}", input.display(), e);
                let reason = e.to_string();
                (OutlineResult::error(), DocumentStatus::Failed { reason })
            }
        };

        match write_json(&output, &result, self.options.format) {
            Ok(()) => log::info!(
                "Processed {} → {}",
                file_name(input),
                file_name(&output)
            ),
            Err(e) => {
                log::warn!("Skipped output {}: {}", output.display(), e);
                status = DocumentStatus::WriteFailed {
                    reason: e.to_string(),
                };
            }
        }

        DocumentReport {
            input: input.to_path_buf(),
            output,
            status,
        }
    }
}

/// Process `input_dir` into `output_dir` with default options.
pub fn process_directory(
    input_dir: impl Into<PathBuf>,
    output_dir: impl Into<PathBuf>,
) -> Result<BatchReport> {
    BatchDriver::new(BatchOptions::new(input_dir, output_dir)).run()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
