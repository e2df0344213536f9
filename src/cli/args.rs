//! Command-line argument definitions using clap

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::pipeline::{
    Catalog, CommandRunner, FailurePolicy, RunOptions, DEFAULT_FORMAT_TOOL, DEFAULT_TRANSFORM_TOOL,
};

/// teigen - Generate bilingual TEI dictionaries from monolingual XML sources
#[derive(Parser, Debug)]
#[command(name = "teigen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base directory holding xml/, xsl/ and tei/.
    /// Defaults to the directory containing the teigen executable.
    #[arg(short, long)]
    pub base_dir: Option<PathBuf>,

    /// JSON catalog of conversion targets, replacing the built-in one
    #[arg(short, long)]
    pub catalog: Option<PathBuf>,

    /// XSLT processor invoked for the transform step
    #[arg(long, default_value = DEFAULT_TRANSFORM_TOOL)]
    pub transform_tool: String,

    /// XML formatter invoked for the format step
    #[arg(long, default_value = DEFAULT_FORMAT_TOOL)]
    pub format_tool: String,

    /// Format the draft even when the transform step failed,
    /// and keep partial output files after a failed format step
    #[arg(long, default_value = "false")]
    pub lenient: bool,

    /// Stop at the first failed conversion
    #[arg(long, default_value = "false")]
    pub fail_fast: bool,

    /// List the conversions that would run without starting any tool
    #[arg(long, default_value = "false")]
    pub dry_run: bool,

    /// Write a JSON report of the run to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
}

impl Cli {
    /// Resolve the base directory, falling back to the executable's directory.
    pub fn base_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.base_dir {
            return Ok(dir.clone());
        }
        let exe = std::env::current_exe().context("Failed to locate the teigen executable")?;
        let exe = exe.canonicalize().unwrap_or(exe);
        exe.parent()
            .map(|p| p.to_path_buf())
            .context("Executable path has no parent directory")
    }

    /// Load the catalog file if one was given, otherwise the built-in catalog.
    pub fn catalog(&self) -> Result<Catalog> {
        match &self.catalog {
            Some(path) => Ok(Catalog::from_json_file(path)?),
            None => Ok(Catalog::builtin()),
        }
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            policy: if self.lenient {
                FailurePolicy::Lenient
            } else {
                FailurePolicy::Strict
            },
            fail_fast: self.fail_fast,
            dry_run: self.dry_run,
        }
    }

    pub fn runner(&self) -> CommandRunner {
        CommandRunner::new(&self.transform_tool, &self.format_tool)
    }
}
