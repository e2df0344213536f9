//! Error types for planning and running dictionary conversions.
//!
//! `PipelineError` covers everything that aborts a run outright: bad catalog
//! entries, unresolvable language codes, and filesystem failures outside of a
//! single task. Failures of an individual task are not errors in this sense;
//! they are recorded as [`TaskFailure`] values so the driver can keep going.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a conversion run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A destination language could not be resolved to an ISO 639-3 code.
    #[error("Unknown language code '{code}'")]
    UnknownLanguage {
        /// The code as written in the catalog
        code: String,
    },

    /// The catalog contains no targets.
    #[error("Conversion catalog is empty")]
    EmptyCatalog,

    /// A target lists no destination languages.
    #[error("Target '{document}' ({source_language}) has no destination languages")]
    EmptyDestinations {
        /// Source document name of the offending target
        document: String,
        /// Source language of the offending target
        source_language: String,
    },

    /// The catalog file could not be read.
    #[error("Failed to read catalog {}: {source}", .path.display())]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog file is not valid catalog JSON.
    #[error("Failed to parse catalog {}: {source}", .path.display())]
    CatalogParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An external tool could not be started at all.
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The format tool's output file could not be created.
    #[error("Failed to create output file {}: {source}", .path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which step of a task's pipeline went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskFailure {
    /// The transform tool exited unsuccessfully.
    Transform {
        code: Option<i32>,
        stderr: String,
    },

    /// The format tool exited unsuccessfully.
    Format {
        code: Option<i32>,
        stderr: String,
    },

    /// A tool could not be started, or its output file could not be opened.
    Spawn { message: String },
}

impl TaskFailure {
    /// Short name of the failing step, used in reports.
    pub fn step(&self) -> &'static str {
        match self {
            TaskFailure::Transform { .. } => "transform",
            TaskFailure::Format { .. } => "format",
            TaskFailure::Spawn { .. } => "spawn",
        }
    }

    /// Captured standard error of the failing tool, if any.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            TaskFailure::Transform { stderr, .. } | TaskFailure::Format { stderr, .. } => {
                let trimmed = stderr.trim();
                (!trimmed.is_empty()).then_some(trimmed)
            }
            TaskFailure::Spawn { .. } => None,
        }
    }
}

impl fmt::Display for TaskFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskFailure::Transform { code, .. } => {
                write!(f, "Transform failed ({})", describe_code(*code))
            }
            TaskFailure::Format { code, .. } => {
                write!(f, "Format failed ({})", describe_code(*code))
            }
            TaskFailure::Spawn { message } => write!(f, "{}", message),
        }
    }
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}
