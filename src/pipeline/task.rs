//! Directory layout and task planning
//!
//! A task is one (target, destination language) pair with every path it
//! touches already resolved. Planning resolves all language codes up front so
//! a bad catalog entry aborts the run before any tool is started.

use std::path::{Path, PathBuf};

use super::catalog::{Catalog, ConversionTarget};
use super::error::PipelineError;
use super::language::to_alpha3;

/// File name of the shared scratch document inside the TEI directory.
pub const DRAFT_FILE_NAME: &str = "draft.tei";

/// Where inputs, outputs and the draft live relative to a base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    base_dir: PathBuf,
}

impl Layout {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn xml_dir(&self) -> PathBuf {
        self.base_dir.join("xml")
    }

    pub fn xsl_dir(&self) -> PathBuf {
        self.base_dir.join("xsl")
    }

    pub fn tei_dir(&self) -> PathBuf {
        self.base_dir.join("tei")
    }

    /// `xml/<document>.xml`
    pub fn source_path(&self, document: &str) -> PathBuf {
        self.xml_dir().join(format!("{}.xml", document))
    }

    /// `xsl/<document>2tei.xsl`
    pub fn stylesheet_path(&self, document: &str) -> PathBuf {
        self.xsl_dir().join(format!("{}2tei.xsl", document))
    }

    /// The single draft path shared by every task of a run.
    pub fn draft_path(&self) -> PathBuf {
        self.tei_dir().join(DRAFT_FILE_NAME)
    }

    /// `tei/<source>-<destination>[-<variant>].tei`
    pub fn output_path(&self, source_language: &str, destination: &str, variant: Option<&str>) -> PathBuf {
        self.tei_dir()
            .join(output_file_name(source_language, destination, variant))
    }
}

/// File name of a generated dictionary. The downstream packager depends on
/// this exact shape.
pub fn output_file_name(source_language: &str, destination: &str, variant: Option<&str>) -> String {
    match variant {
        Some(variant) => format!("{}-{}-{}.tei", source_language, destination, variant),
        None => format!("{}-{}.tei", source_language, destination),
    }
}

/// One concrete conversion: a target narrowed to a single destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionTask {
    pub source_language: String,
    /// Destination as written in the catalog, handed to the stylesheet
    pub destination_raw: String,
    /// ISO 639-3 destination, used in the output file name
    pub destination: String,
    pub variant: Option<String>,
    pub source_document: String,
    pub source_path: PathBuf,
    pub stylesheet_path: PathBuf,
    pub output_path: PathBuf,
    pub draft_path: PathBuf,
}

impl ConversionTask {
    /// Build the task for one destination of `target`.
    pub fn new(target: &ConversionTarget, destination_raw: &str, layout: &Layout) -> Result<Self, PipelineError> {
        let destination = to_alpha3(destination_raw)?;
        let variant = target.variant.as_deref();

        Ok(Self {
            source_language: target.source_language.clone(),
            destination_raw: destination_raw.to_string(),
            destination: destination.to_string(),
            variant: target.variant.clone(),
            source_document: target.source_document.clone(),
            source_path: layout.source_path(&target.source_document),
            stylesheet_path: layout.stylesheet_path(&target.source_document),
            output_path: layout.output_path(&target.source_language, destination, variant),
            draft_path: layout.draft_path(),
        })
    }

    /// A task is satisfied once its output file exists.
    pub fn is_satisfied(&self) -> bool {
        self.output_path.is_file()
    }

    /// Short label such as `jpn-eng-kanji`, for console output.
    pub fn label(&self) -> String {
        output_file_name(&self.source_language, &self.destination, self.variant.as_deref())
            .trim_end_matches(".tei")
            .to_string()
    }
}

/// Expand a catalog into its tasks, in catalog order.
///
/// Fails on the first unresolvable destination language.
pub fn plan_tasks(catalog: &Catalog, layout: &Layout) -> Result<Vec<ConversionTask>, PipelineError> {
    let mut tasks = Vec::with_capacity(catalog.task_count());
    for target in catalog.targets() {
        for destination in &target.destination_languages {
            tasks.push(ConversionTask::new(target, destination, layout)?);
        }
    }
    Ok(tasks)
}
