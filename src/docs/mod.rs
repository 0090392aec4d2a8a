//! AsciiDoc documentation pipeline.
//!
//! Every matching source document is converted to DocBook, which is then fed
//! to the Markdown and PDF converters. Outputs mirror the source tree under
//! `<output>/<format>/`.

use crate::demolisher::is_empty_tree;
use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub mod config;
pub mod converter;
pub mod postprocess;

use config::DocsConfig;
use converter::{Converter, ExternalConverter};
use postprocess::{postprocess_docbook, postprocess_markdown, rewrite_file};

/// Derived formats kept after a run. DocBook is always produced as the
/// intermediate format and removed unless requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputFormats {
    pub docbook: bool,
    pub markdown: bool,
    pub pdf: bool,
}

impl OutputFormats {
    pub fn is_empty(&self) -> bool {
        !(self.docbook || self.markdown || self.pdf)
    }
}

/// The converter chain used by a [`Pipeline`].
pub struct Converters {
    pub docbook: Box<dyn Converter>,
    pub markdown: Box<dyn Converter>,
    pub pdf: Box<dyn Converter>,
}

impl Converters {
    /// asciidoctor (or asciidoc) followed by pandoc.
    pub fn from_config(config: &DocsConfig) -> Self {
        Self {
            docbook: Box::new(ExternalConverter::docbook(config.backend)),
            markdown: Box::new(ExternalConverter::pandoc_markdown()),
            pdf: Box::new(ExternalConverter::pandoc_pdf(&config.pdf)),
        }
    }
}

/// Files produced for one source document.
#[derive(Debug, PartialEq)]
pub struct Converted {
    pub source: PathBuf,
    pub outputs: Vec<PathBuf>,
}

pub struct Pipeline {
    source_root: PathBuf,
    output_root: PathBuf,
    include: GlobSet,
    formats: OutputFormats,
    converters: Converters,
    date: String,
}

impl Pipeline {
    /// # Errors
    /// * `Error::GlobError` if an include pattern is invalid
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(
        source_root: P,
        output_root: Q,
        config: &DocsConfig,
        formats: OutputFormats,
        converters: Converters,
    ) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &config.include {
            builder.add(Glob::new(pattern)?);
        }
        Ok(Self {
            source_root: source_root.as_ref().to_path_buf(),
            output_root: output_root.as_ref().to_path_buf(),
            include: builder.build()?,
            formats,
            converters,
            date: jiff::Zoned::now().strftime("%Y-%m-%d").to_string(),
        })
    }

    /// Overrides the date stamped into DocBook metadata.
    pub fn with_date<S: Into<String>>(mut self, date: S) -> Self {
        self.date = date.into();
        self
    }

    /// Converts every matching document under the source root, one at a time.
    ///
    /// The first failure aborts the run; documents converted before it keep
    /// their outputs.
    pub fn run(&self) -> Result<Vec<Converted>> {
        if !self.source_root.is_dir() {
            return Err(Error::ConfigError(format!(
                "source directory '{}' not found",
                self.source_root.display()
            )));
        }
        if self.formats.is_empty() {
            warn!("No output format selected; intermediate DocBook files will be discarded");
        }

        let mut converted = Vec::new();
        for entry in WalkDir::new(&self.source_root).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(&self.source_root)
                .map_err(|e| Error::ConfigError(e.to_string()))?;
            if !self.include.is_match(relative) {
                debug!("Skipping {}", relative.display());
                continue;
            }
            converted.push(self.convert_document(entry.path(), relative)?);
        }

        let docbook_root = self.output_root.join("docbook");
        if !self.formats.docbook && is_empty_tree(&docbook_root)? {
            fs::remove_dir_all(&docbook_root)?;
        }
        Ok(converted)
    }

    /// Runs the converter chain for one document.
    ///
    /// # Arguments
    /// * `input` - Source document
    /// * `relative` - Path of the document relative to the source root
    pub fn convert_document(&self, input: &Path, relative: &Path) -> Result<Converted> {
        let docbook = self.output_path("docbook", relative, "xml")?;
        info!("Converting {} into {}", input.display(), docbook.display());

        self.converters.docbook.convert(input, &docbook)?;
        ensure_exists(&docbook)?;
        rewrite_file(&docbook, |content| postprocess_docbook(content, &self.date))?;

        let mut outputs = Vec::new();
        if self.formats.markdown {
            let markdown = self.output_path("md", relative, "md")?;
            self.converters.markdown.convert(&docbook, &markdown)?;
            ensure_exists(&markdown)?;
            rewrite_file(&markdown, postprocess_markdown)?;
            outputs.push(markdown);
        }
        if self.formats.pdf {
            let pdf = self.output_path("pdf", relative, "pdf")?;
            self.converters.pdf.convert(&docbook, &pdf)?;
            ensure_exists(&pdf)?;
            outputs.push(pdf);
        }

        if self.formats.docbook {
            outputs.insert(0, docbook);
        } else {
            debug!("Removing intermediate {}", docbook.display());
            fs::remove_file(&docbook)?;
        }

        Ok(Converted {
            source: input.to_path_buf(),
            outputs,
        })
    }

    /// `<output>/<format>/<relative dir>/<stem>.<extension>`, parents created.
    fn output_path(&self, format: &str, relative: &Path, extension: &str) -> Result<PathBuf> {
        let mut dir = self.output_root.join(format);
        if let Some(parent) = relative.parent() {
            dir.push(parent);
        }
        fs::create_dir_all(&dir)?;
        let mut path = dir.join(relative.file_name().unwrap_or(relative.as_os_str()));
        path.set_extension(extension);
        Ok(path)
    }
}

fn ensure_exists(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(Error::MissingOutputError(path.to_path_buf()))
    }
}
