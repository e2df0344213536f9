//! JSON run report
//!
//! Records every planned conversion and how it ended, so build scripts can
//! inspect a run without scraping console output.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{RunOptions, RunSummary, TaskRecord, TaskStatus};

/// Metadata about the run
#[derive(Debug, Serialize)]
pub struct RunMetadata {
    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,
    pub teigen_version: String,
    pub base_dir: String,
    /// "strict" or "lenient"
    pub policy: String,
    pub dry_run: bool,
}

/// Task counts by outcome
#[derive(Debug, Serialize)]
pub struct RunCounts {
    pub total: usize,
    pub generated: usize,
    pub skipped: usize,
    pub planned: usize,
    pub failed: usize,
    pub not_attempted: usize,
}

/// Why a task failed
#[derive(Debug, Serialize)]
pub struct FailureEntry {
    pub step: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
}

/// Single task entry in the report
#[derive(Debug, Serialize)]
pub struct TaskReportEntry {
    pub source_language: String,
    pub destination_raw: String,
    pub destination: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    pub source_document: String,
    pub output_path: String,
    pub status: String,
    pub elapsed_ms: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleanup_error: Option<String>,
}

impl From<&TaskRecord> for TaskReportEntry {
    fn from(record: &TaskRecord) -> Self {
        let task = &record.task;
        let failure = match &record.status {
            TaskStatus::Failed(failure) => Some(FailureEntry {
                step: failure.step().to_string(),
                message: failure.to_string(),
                stderr: failure.stderr().map(|s| s.to_string()),
            }),
            _ => None,
        };

        Self {
            source_language: task.source_language.clone(),
            destination_raw: task.destination_raw.clone(),
            destination: task.destination.clone(),
            variant: task.variant.clone(),
            source_document: task.source_document.clone(),
            output_path: task.output_path.display().to_string(),
            status: record.status.as_str().to_string(),
            elapsed_ms: record.elapsed.as_millis(),
            failure,
            cleanup_error: record.cleanup_error.clone(),
        }
    }
}

/// Complete run report
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub metadata: RunMetadata,
    pub counts: RunCounts,
    pub tasks: Vec<TaskReportEntry>,
}

impl RunReport {
    pub fn new(summary: &RunSummary, base_dir: &Path, options: &RunOptions) -> Self {
        Self {
            metadata: RunMetadata {
                timestamp: Utc::now().to_rfc3339(),
                teigen_version: env!("CARGO_PKG_VERSION").to_string(),
                base_dir: base_dir.display().to_string(),
                policy: options.policy.to_string(),
                dry_run: options.dry_run,
            },
            counts: RunCounts {
                total: summary.records.len() + summary.not_attempted,
                generated: summary.generated(),
                skipped: summary.skipped(),
                planned: summary.planned(),
                failed: summary.failed(),
                not_attempted: summary.not_attempted,
            },
            tasks: summary.records.iter().map(TaskReportEntry::from).collect(),
        }
    }
}

/// Write the run report as pretty-printed JSON
pub fn export_run_report(report: &RunReport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize run report to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write run report to {}", output_path.display()))?;

    Ok(())
}
