//! Command-line interface implementation for stencil.
//! Provides argument parsing for both binaries using clap.

use crate::constants::{DEFAULT_CONFIG_FILE, DEFAULT_DOCS_OUTPUT, DEFAULT_DOCS_SOURCE};
use crate::demolisher::RemovalMode;
use crate::docs::OutputFormats;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments of the scaffolder.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Stencil: manage a project structure from a declarative description",
    long_about = None
)]
pub struct Args {
    /// Path to the configuration file
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Remove files of the structure and the directories left empty.
    /// Directories holding anything else are kept.
    #[arg(long)]
    pub remove: bool,

    /// Remove all specified directories and their contents
    #[arg(long)]
    pub remove_all: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Requested removal mode, `None` when the structure should be created.
    /// `--remove-all` takes precedence over `--remove`.
    pub fn removal_mode(&self) -> Option<RemovalMode> {
        if self.remove_all {
            Some(RemovalMode::All)
        } else if self.remove {
            Some(RemovalMode::Safe)
        } else {
            None
        }
    }
}

/// Command-line arguments of the documentation pipeline.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Convert AsciiDoc to DocBook, Markdown, and PDF",
    long_about = None
)]
pub struct DocsArgs {
    /// Keep the DocBook output
    #[arg(long)]
    pub docbook: bool,

    /// Output Markdown
    #[arg(long)]
    pub md: bool,

    /// Output PDF
    #[arg(long)]
    pub pdf: bool,

    /// Directory holding the AsciiDoc sources
    #[arg(long, value_name = "DIR", default_value = DEFAULT_DOCS_SOURCE)]
    pub source: PathBuf,

    /// Directory receiving one subtree per output format
    #[arg(long, value_name = "DIR", default_value = DEFAULT_DOCS_OUTPUT)]
    pub output: PathBuf,

    /// Optional pipeline configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

impl DocsArgs {
    pub fn formats(&self) -> OutputFormats {
        OutputFormats {
            docbook: self.docbook,
            markdown: self.md,
            pdf: self.pdf,
        }
    }
}
