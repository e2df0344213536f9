//! Conversion catalog: which dictionaries get converted into which languages

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::PipelineError;

/// One source dictionary and the languages it should be converted into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionTarget {
    /// Language of the source dictionary headwords (e.g. `jpn`)
    pub source_language: String,
    /// Destination languages, in the order their tasks run.
    /// Passed verbatim to the stylesheet; normalized only for file names.
    pub destination_languages: Vec<String>,
    /// Logical document name, selecting `xml/<name>.xml` and `xsl/<name>2tei.xsl`
    pub source_document: String,
    /// Optional suffix distinguishing sub-resources of the same document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
}

impl ConversionTarget {
    pub fn new<S: Into<String>>(
        source_language: S,
        destination_languages: &[&str],
        source_document: S,
    ) -> Self {
        Self {
            source_language: source_language.into(),
            destination_languages: destination_languages.iter().map(|s| s.to_string()).collect(),
            source_document: source_document.into(),
            variant: None,
        }
    }

    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }
}

/// Ordered, immutable list of conversion targets.
///
/// Order matters: tasks run in catalog order and share one draft file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    targets: Vec<ConversionTarget>,
}

impl Catalog {
    /// Build a catalog, rejecting empty catalogs and targets without destinations.
    pub fn new(targets: Vec<ConversionTarget>) -> Result<Self, PipelineError> {
        if targets.is_empty() {
            return Err(PipelineError::EmptyCatalog);
        }
        if let Some(target) = targets.iter().find(|t| t.destination_languages.is_empty()) {
            return Err(PipelineError::EmptyDestinations {
                document: target.source_document.clone(),
                source_language: target.source_language.clone(),
            });
        }
        Ok(Self { targets })
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> Self {
        Self {
            targets: vec![
                ConversionTarget::new(
                    "jpn",
                    &["eng", "ger", "fre", "rus", "spa", "hun", "slv", "dut", "swe"],
                    "JMdict",
                ),
                ConversionTarget::new("jpn", &["en", "fr", "es", "pt"], "kanjidic2")
                    .with_variant("kanji"),
            ],
        }
    }

    /// Load a catalog from a JSON array of targets.
    pub fn from_json_file(path: &Path) -> Result<Self, PipelineError> {
        let content = std::fs::read_to_string(path).map_err(|source| PipelineError::CatalogRead {
            path: path.to_path_buf(),
            source,
        })?;
        let targets: Vec<ConversionTarget> =
            serde_json::from_str(&content).map_err(|source| PipelineError::CatalogParse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::new(targets)
    }

    pub fn targets(&self) -> &[ConversionTarget] {
        &self.targets
    }

    /// Total number of (target, destination) pairs.
    pub fn task_count(&self) -> usize {
        self.targets
            .iter()
            .map(|t| t.destination_languages.len())
            .sum()
    }
}
