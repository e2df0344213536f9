//! Shared test utilities: scratch base directories and a recording tool runner

#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::Path;

use tempfile::TempDir;

use teigen::pipeline::{
    FormatInvocation, Layout, PipelineError, ToolRunner, ToolStatus, TransformInvocation,
};

/// Create a temporary base directory with empty xml/, xsl/ and tei/ directories
pub fn create_base_dir() -> (TempDir, Layout) {
    let temp_dir = TempDir::new().unwrap();
    let layout = Layout::new(temp_dir.path());
    std::fs::create_dir_all(layout.xml_dir()).unwrap();
    std::fs::create_dir_all(layout.xsl_dir()).unwrap();
    std::fs::create_dir_all(layout.tei_dir()).unwrap();
    (temp_dir, layout)
}

/// Names of the files currently in the TEI directory, sorted
pub fn tei_files(layout: &Layout) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(layout.tei_dir())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// How a scripted tool call should behave
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Write the expected file and exit 0
    Succeed,
    /// Exit with this code without writing anything
    Fail(i32),
    /// Report that the tool could not be started
    Missing,
}

/// Every tool call the fake runner received, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Transform(TransformInvocation),
    Format(FormatInvocation),
}

/// A `ToolRunner` that records calls and simulates the tools on disk.
///
/// A successful transform writes `<TEI lang="..."/>` to the draft; a
/// successful format copies the draft (or an empty document when there is
/// none) to the output, the way `xmllint --format` redirected to a file would.
#[derive(Debug, Default)]
pub struct FakeRunner {
    pub calls: Vec<Call>,
    transform_script: VecDeque<Behavior>,
    format_script: VecDeque<Behavior>,
    /// Whether the draft existed when each format call started
    pub draft_seen_by_format: Vec<bool>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue transform behaviors; once exhausted, transforms succeed
    pub fn with_transforms(mut self, behaviors: &[Behavior]) -> Self {
        self.transform_script.extend(behaviors.iter().cloned());
        self
    }

    /// Queue format behaviors; once exhausted, formats succeed
    pub fn with_formats(mut self, behaviors: &[Behavior]) -> Self {
        self.format_script.extend(behaviors.iter().cloned());
        self
    }

    pub fn transform_calls(&self) -> Vec<&TransformInvocation> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Transform(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    pub fn format_calls(&self) -> Vec<&FormatInvocation> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Format(f) => Some(f),
                _ => None,
            })
            .collect()
    }
}

fn missing(program: &str) -> PipelineError {
    PipelineError::Spawn {
        program: program.to_string(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
    }
}

impl ToolRunner for FakeRunner {
    fn transform(&mut self, invocation: &TransformInvocation) -> Result<ToolStatus, PipelineError> {
        self.calls.push(Call::Transform(invocation.clone()));
        match self.transform_script.pop_front().unwrap_or(Behavior::Succeed) {
            Behavior::Succeed => {
                std::fs::write(
                    &invocation.draft,
                    format!("<TEI lang=\"{}\"/>", invocation.target_lang),
                )?;
                Ok(ToolStatus::success())
            }
            Behavior::Fail(code) => Ok(ToolStatus::failure(code, "xsltproc: stylesheet error")),
            Behavior::Missing => Err(missing("xsltproc")),
        }
    }

    fn format(&mut self, invocation: &FormatInvocation) -> Result<ToolStatus, PipelineError> {
        self.calls.push(Call::Format(invocation.clone()));
        self.draft_seen_by_format.push(invocation.draft.exists());
        match self.format_script.pop_front().unwrap_or(Behavior::Succeed) {
            Behavior::Succeed => {
                let content = std::fs::read_to_string(&invocation.draft).unwrap_or_default();
                write_output(&invocation.output, &content)?;
                Ok(ToolStatus::success())
            }
            Behavior::Fail(code) => {
                write_output(&invocation.output, "")?;
                Ok(ToolStatus::failure(code, "xmllint: parser error"))
            }
            Behavior::Missing => Err(missing("xmllint")),
        }
    }
}

fn write_output(path: &Path, content: &str) -> Result<(), PipelineError> {
    std::fs::write(path, content).map_err(|source| PipelineError::CreateOutput {
        path: path.to_path_buf(),
        source,
    })
}
