//! External tool invocations (transform and format)
//!
//! The driver talks to the tools through [`ToolRunner`] so tests can record
//! invocations instead of spawning processes. [`CommandRunner`] is the real
//! implementation on top of `std::process::Command`.

use std::ffi::OsString;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::error::PipelineError;
use super::task::ConversionTask;

/// Default transform tool.
pub const DEFAULT_TRANSFORM_TOOL: &str = "xsltproc";

/// Default format tool.
pub const DEFAULT_FORMAT_TOOL: &str = "xmllint";

/// Stylesheet parameter carrying the destination language.
pub const TARGET_LANG_PARAM: &str = "targetlang";

/// Arguments for one run of the transform tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformInvocation {
    /// Destination language exactly as written in the catalog
    pub target_lang: String,
    pub stylesheet: PathBuf,
    pub source: PathBuf,
    /// Where the transformed document is written
    pub draft: PathBuf,
}

impl TransformInvocation {
    pub fn for_task(task: &ConversionTask) -> Self {
        Self {
            target_lang: task.destination_raw.clone(),
            stylesheet: task.stylesheet_path.clone(),
            source: task.source_path.clone(),
            draft: task.draft_path.clone(),
        }
    }

    /// `--stringparam targetlang <lang> -o <draft> --novalid <xsl> <xml>`
    pub fn args(&self) -> Vec<OsString> {
        vec![
            "--stringparam".into(),
            TARGET_LANG_PARAM.into(),
            self.target_lang.clone().into(),
            "-o".into(),
            self.draft.clone().into_os_string(),
            "--novalid".into(),
            self.stylesheet.clone().into_os_string(),
            self.source.clone().into_os_string(),
        ]
    }
}

/// Arguments for one run of the format tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatInvocation {
    pub draft: PathBuf,
    /// File receiving the tool's standard output
    pub output: PathBuf,
}

impl FormatInvocation {
    pub fn for_task(task: &ConversionTask) -> Self {
        Self {
            draft: task.draft_path.clone(),
            output: task.output_path.clone(),
        }
    }

    /// `--format <draft>`
    pub fn args(&self) -> Vec<OsString> {
        vec!["--format".into(), self.draft.clone().into_os_string()]
    }
}

/// Exit status and captured standard error of a finished tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolStatus {
    /// Exit code, `None` if the process was killed by a signal
    pub code: Option<i32>,
    pub stderr: String,
}

impl ToolStatus {
    pub fn success() -> Self {
        Self {
            code: Some(0),
            stderr: String::new(),
        }
    }

    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stderr: stderr.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs the two external tools.
///
/// An `Err` means the tool could not be started (or its output file could not
/// be opened); a tool that ran and failed is an `Ok` with a non-zero status.
pub trait ToolRunner {
    fn transform(&mut self, invocation: &TransformInvocation) -> Result<ToolStatus, PipelineError>;

    fn format(&mut self, invocation: &FormatInvocation) -> Result<ToolStatus, PipelineError>;
}

/// Spawns the real tools and blocks until each exits.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    transform_program: OsString,
    format_program: OsString,
}

impl CommandRunner {
    pub fn new(transform_program: impl Into<OsString>, format_program: impl Into<OsString>) -> Self {
        Self {
            transform_program: transform_program.into(),
            format_program: format_program.into(),
        }
    }

    fn run(program: &OsString, args: Vec<OsString>, stdout: Stdio) -> Result<ToolStatus, PipelineError> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| PipelineError::Spawn {
                program: program.to_string_lossy().into_owned(),
                source,
            })?;

        Ok(ToolStatus {
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSFORM_TOOL, DEFAULT_FORMAT_TOOL)
    }
}

impl ToolRunner for CommandRunner {
    fn transform(&mut self, invocation: &TransformInvocation) -> Result<ToolStatus, PipelineError> {
        Self::run(&self.transform_program, invocation.args(), Stdio::null())
    }

    fn format(&mut self, invocation: &FormatInvocation) -> Result<ToolStatus, PipelineError> {
        // Like a shell redirect, the output file is created before the tool runs.
        let file = create_output(&invocation.output)?;
        Self::run(&self.format_program, invocation.args(), Stdio::from(file))
    }
}

fn create_output(path: &Path) -> Result<File, PipelineError> {
    File::create(path).map_err(|source| PipelineError::CreateOutput {
        path: path.to_path_buf(),
        source,
    })
}
